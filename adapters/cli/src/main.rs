#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Grid Snake experience.
//!
//! The binary is the composition root: it loads the tuning configuration,
//! constructs the world, the session scheduler, and the scoreboard, and then
//! hands a frame closure to the rendering backend. Each frame translates
//! adapter input into commands, applies them, lets the systems react to the
//! emitted events, and rebuilds the scene from a fresh snapshot.

mod config;
mod store;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use grid_snake_core::{Command, ControlAction, Score};
use grid_snake_rendering::{
    ActorCellPresentation, Color, FrameInput, GridPresentation, HudPresentation, Presentation,
    RenderingBackend, Scene, TargetPresentation,
};
use grid_snake_rendering_macroquad::MacroquadBackend;
use grid_snake_system_scoreboard::Scoreboard;
use grid_snake_system_session::Session;
use grid_snake_world::{self as world, query, query::WorldSnapshot, World};

use crate::{config::GameConfig, store::FileStore};

const WINDOW_TITLE: &str = "Grid Snake";
const CELL_LENGTH: f32 = 32.0;

const BACKGROUND_COLOR: Color = Color::from_rgb_u8(0x0a, 0x0a, 0x0a);
const GRID_LINE_COLOR: Color = Color::from_rgb_u8(0x11, 0x11, 0x11);
const BODY_COLOR: Color = Color::from_rgb_u8(0x1f, 0xbf, 0x72);
const TARGET_COLOR: Color = Color::from_rgb_u8(0xff, 0x4d, 0x4f);
const HUD_TEXT_COLOR: Color = Color::from_rgb_u8(0xe6, 0xed, 0xf3);
const HEAD_LIGHTEN_AMOUNT: f32 = 0.15;

/// Classic grid snake with buffered steering and a persistent high score.
#[derive(Debug, Parser)]
#[command(name = "grid-snake")]
struct Args {
    /// Path to a TOML tuning file overriding the classic rules.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed driving target placement; drawn from entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Path of the persisted high-score file.
    #[arg(long, value_name = "FILE", default_value = "highscore.toml")]
    high_score_file: PathBuf,

    /// Render as fast as possible instead of waiting for the display.
    #[arg(long)]
    no_vsync: bool,

    /// Print a frames-per-second line once per second.
    #[arg(long)]
    show_fps: bool,
}

/// Entry point for the Grid Snake command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();

    let game_config = GameConfig::load(args.config.as_deref())
        .context("failed to load the tuning configuration")?;
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut world = World::new(game_config.world_config().with_rng_seed(seed))
        .context("rejected game configuration")?;

    println!("{}", query::welcome_banner(&world));

    let mut scoreboard = Scoreboard::new(FileStore::new(args.high_score_file));
    let mut session = Session::new(query::tick_interval(&world));

    let grid = GridPresentation::new(query::grid_size(&world), CELL_LENGTH, GRID_LINE_COLOR)
        .context("invalid grid presentation")?;
    let scene = build_scene(grid, &query::snapshot(&world), scoreboard.high_score());
    let presentation = Presentation::new(WINDOW_TITLE, BACKGROUND_COLOR, scene);

    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps);

    backend.run(presentation, move |dt, input, scene| {
        let mut commands = Vec::new();
        for action in control_actions(&input) {
            session.control(action, &mut commands);
        }
        // Control input is applied before the timer runs, so a reset or
        // pause disarms the scheduler ahead of this frame's ticks.
        drive(&mut world, &mut session, &mut scoreboard, &mut commands);

        session.frame(dt, &mut commands);
        drive(&mut world, &mut session, &mut scoreboard, &mut commands);

        *scene = build_scene(scene.grid, &query::snapshot(&world), scoreboard.high_score());
    })
}

/// Applies queued commands and routes the emitted events to every system.
fn drive(
    world: &mut World,
    session: &mut Session,
    scoreboard: &mut Scoreboard<FileStore>,
    commands: &mut Vec<Command>,
) {
    if commands.is_empty() {
        return;
    }

    let mut events = Vec::new();
    for command in commands.drain(..) {
        world::apply(world, command, &mut events);
    }
    session.handle(&events);

    let mut emitted = Vec::new();
    scoreboard.handle(&events, &mut emitted);
    session.handle(&emitted);
}

/// Orders the frame's control actions: reset first, steering last.
fn control_actions(input: &FrameInput) -> Vec<ControlAction> {
    let mut actions = Vec::new();
    if input.reset_action {
        actions.push(ControlAction::Reset);
    }
    if input.start_action {
        actions.push(ControlAction::Start);
    }
    if input.toggle_pause_action {
        actions.push(ControlAction::TogglePause);
    }
    if let Some(direction) = input.steer {
        actions.push(ControlAction::Steer(direction));
    }
    actions
}

fn build_scene(grid: GridPresentation, snapshot: &WorldSnapshot, high_score: Score) -> Scene {
    let head_color = BODY_COLOR.lighten(HEAD_LIGHTEN_AMOUNT);
    let actor = snapshot
        .body
        .iter()
        .enumerate()
        .map(|(index, cell)| {
            let color = if index == 0 { head_color } else { BODY_COLOR };
            ActorCellPresentation::new(*cell, color)
        })
        .collect();

    Scene::new(
        grid,
        actor,
        TargetPresentation::new(snapshot.target, TARGET_COLOR),
        HudPresentation::new(snapshot.score, high_score, HUD_TEXT_COLOR),
        snapshot.phase,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_snake_core::{Direction, RunPhase};

    #[test]
    fn control_actions_put_reset_before_everything_else() {
        let input = FrameInput {
            steer: Some(Direction::North),
            start_action: true,
            toggle_pause_action: true,
            reset_action: true,
        };

        assert_eq!(
            control_actions(&input),
            vec![
                ControlAction::Reset,
                ControlAction::Start,
                ControlAction::TogglePause,
                ControlAction::Steer(Direction::North),
            ]
        );
    }

    #[test]
    fn idle_frames_produce_no_actions() {
        assert!(control_actions(&FrameInput::default()).is_empty());
    }

    #[test]
    fn scene_reflects_the_snapshot_with_a_lightened_head() {
        let world = World::new(world::Config::default()).expect("default config is valid");
        let grid = GridPresentation::new(query::grid_size(&world), CELL_LENGTH, GRID_LINE_COLOR)
            .expect("valid grid");

        let scene = build_scene(grid, &query::snapshot(&world), Score::new(9));

        assert_eq!(scene.actor.len(), 3);
        assert_eq!(scene.actor[0].color, BODY_COLOR.lighten(HEAD_LIGHTEN_AMOUNT));
        assert_eq!(scene.actor[1].color, BODY_COLOR);
        assert_eq!(scene.hud.high_score, Score::new(9));
        assert_eq!(scene.phase, RunPhase::Idle);
    }
}
