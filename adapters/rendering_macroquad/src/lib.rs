#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Grid Snake.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The adapter uses Macroquad's immediate-mode UI module so the control panel
//! can host the Start/Pause/Restart buttons. All UI-specific calls live inside
//! the local `ui` module to avoid leaking Macroquad UI types throughout the
//! renderer.

mod ui;

use self::ui::{draw_control_panel_ui, ControlPanelUiContext, ControlPanelUiResult};
use anyhow::Result;
use glam::Vec2;
use grid_snake_core::Direction;
use grid_snake_rendering::{
    status_message, Color, FrameInput, GridGeometry, Presentation, RenderingBackend, Scene,
};
use macroquad::input::{is_key_pressed, KeyCode};
use std::time::Duration;

const WINDOW_MARGIN: f32 = 16.0;
const HUD_STRIP_HEIGHT: f32 = 40.0;
const PANEL_STRIP_HEIGHT: f32 = 56.0;
const HUD_FONT_SIZE: f32 = 28.0;
const OVERLAY_FONT_SIZE: f32 = 34.0;
const ACTOR_OUTLINE_THICKNESS: f32 = 2.0;
const TARGET_RADIUS_FACTOR: f32 = 0.4;
const OVERLAY_DIM_ALPHA: f32 = 0.4;

/// Tracks UI-sourced interactions so they can be merged with physical input
/// on the next frame.
#[derive(Clone, Copy, Debug, Default)]
struct ControlPanelInputState {
    start_latched: bool,
    pause_latched: bool,
    reset_latched: bool,
}

impl ControlPanelInputState {
    fn register(&mut self, result: ControlPanelUiResult) {
        self.start_latched |= result.start_pressed;
        self.pause_latched |= result.pause_pressed;
        self.reset_latched |= result.restart_pressed;
    }

    fn take_start(&mut self) -> bool {
        let latched = self.start_latched;
        self.start_latched = false;
        latched
    }

    fn take_pause(&mut self) -> bool {
        let latched = self.pause_latched;
        self.pause_latched = false;
        latched
    }

    fn take_reset(&mut self) -> bool {
        let latched = self.reset_latched;
        self.reset_latched = false;
        latched
    }
}

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// Arrow keys or WASD to steer the actor.
    steer: Option<Direction>,
    /// `Space` to start the run.
    start_pressed: bool,
    /// `P` to toggle pause.
    pause_pressed: bool,
    /// `R` to reset the session.
    reset_pressed: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let steer = poll_steer();
        let start_pressed = is_key_pressed(KeyCode::Space);
        let pause_pressed = is_key_pressed(KeyCode::P);
        let reset_pressed = is_key_pressed(KeyCode::R);

        Self {
            quit_requested,
            steer,
            start_pressed,
            pause_pressed,
            reset_pressed,
        }
    }
}

fn poll_steer() -> Option<Direction> {
    if is_key_pressed(KeyCode::Up) || is_key_pressed(KeyCode::W) {
        Some(Direction::North)
    } else if is_key_pressed(KeyCode::Down) || is_key_pressed(KeyCode::S) {
        Some(Direction::South)
    } else if is_key_pressed(KeyCode::Left) || is_key_pressed(KeyCode::A) {
        Some(Direction::West)
    } else if is_key_pressed(KeyCode::Right) || is_key_pressed(KeyCode::D) {
        Some(Direction::East)
    } else {
        None
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Clone, Copy, Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints a frames-per-second line once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Clone, Copy, Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    fn record_frame(&mut self, dt: Duration) -> Option<f64> {
        self.elapsed = self.elapsed.saturating_add(dt);
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let fps = f64::from(self.frames) / self.elapsed.as_secs_f64();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(fps)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let side = scene.grid.side_length();
        let window_width = side + 2.0 * WINDOW_MARGIN;
        let window_height =
            side + 2.0 * WINDOW_MARGIN + HUD_STRIP_HEIGHT + PANEL_STRIP_HEIGHT;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: window_width as i32,
            window_height: window_height as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut fps_counter = FpsCounter::default();
            let mut control_panel_input = ControlPanelInputState::default();
            let background = to_macroquad_color(clear_color);

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));

                let frame_input = FrameInput {
                    steer: keyboard.steer,
                    start_action: keyboard.start_pressed || control_panel_input.take_start(),
                    toggle_pause_action: keyboard.pause_pressed
                        || control_panel_input.take_pause(),
                    reset_action: keyboard.reset_pressed || control_panel_input.take_reset(),
                };

                update_scene(frame_dt, frame_input, &mut scene);

                let geometry = scene_geometry(&scene);
                draw_hud(&scene, geometry);
                draw_grid(&scene, geometry);
                draw_target(&scene, geometry);
                draw_actor(&scene, geometry, clear_color);
                draw_status_overlay(&scene, geometry);

                let panel_context = control_panel_context(&scene, geometry, clear_color);
                let mut panel_ui = macroquad::ui::root_ui();
                let panel_result = draw_control_panel_ui(&mut panel_ui, panel_context);
                control_panel_input.register(panel_result);

                if show_fps {
                    if let Some(fps) = fps_counter.record_frame(frame_dt) {
                        println!("FPS: {fps:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn scene_geometry(scene: &Scene) -> GridGeometry {
    let side = scene.grid.side_length();
    let origin_x = (macroquad::window::screen_width() - side) * 0.5;
    let origin_y = WINDOW_MARGIN + HUD_STRIP_HEIGHT;
    GridGeometry::new(Vec2::new(origin_x.max(0.0), origin_y), scene.grid.cell_length)
}

fn draw_grid(scene: &Scene, geometry: GridGeometry) {
    let side = scene.grid.side_length();
    let origin = geometry.cell_top_left(grid_snake_core::CellCoord::new(0, 0));
    let line_color = to_macroquad_color(scene.grid.line_color);

    for index in 1..scene.grid.size.get() {
        let offset = index as f32 * scene.grid.cell_length;
        macroquad::shapes::draw_line(
            origin.x + offset,
            origin.y,
            origin.x + offset,
            origin.y + side,
            1.0,
            line_color,
        );
        macroquad::shapes::draw_line(
            origin.x,
            origin.y + offset,
            origin.x + side,
            origin.y + offset,
            1.0,
            line_color,
        );
    }

    macroquad::shapes::draw_rectangle_lines(origin.x, origin.y, side, side, 2.0, line_color);
}

fn draw_target(scene: &Scene, geometry: GridGeometry) {
    let center = geometry.cell_center(scene.target.cell);
    let radius = geometry.cell_length() * TARGET_RADIUS_FACTOR;
    macroquad::shapes::draw_circle(
        center.x,
        center.y,
        radius,
        to_macroquad_color(scene.target.color),
    );
}

fn draw_actor(scene: &Scene, geometry: GridGeometry, outline: Color) {
    let cell_length = geometry.cell_length();
    let outline_color = to_macroquad_color(outline);

    for segment in &scene.actor {
        let top_left = geometry.cell_top_left(segment.cell);
        macroquad::shapes::draw_rectangle(
            top_left.x,
            top_left.y,
            cell_length,
            cell_length,
            to_macroquad_color(segment.color),
        );
        macroquad::shapes::draw_rectangle_lines(
            top_left.x + 1.0,
            top_left.y + 1.0,
            cell_length - 2.0,
            cell_length - 2.0,
            ACTOR_OUTLINE_THICKNESS,
            outline_color,
        );
    }
}

fn draw_hud(scene: &Scene, geometry: GridGeometry) {
    let origin = geometry.cell_top_left(grid_snake_core::CellCoord::new(0, 0));
    let side = scene.grid.side_length();
    let baseline = origin.y - 12.0;
    let text_color = to_macroquad_color(scene.hud.text_color);

    let score_text = format!("Score: {}", scene.hud.score.get());
    macroquad::text::draw_text(&score_text, origin.x, baseline, HUD_FONT_SIZE, text_color);

    let best_text = format!("Best: {}", scene.hud.high_score.get());
    let best_width = macroquad::text::measure_text(&best_text, None, HUD_FONT_SIZE as u16, 1.0);
    macroquad::text::draw_text(
        &best_text,
        origin.x + side - best_width.width,
        baseline,
        HUD_FONT_SIZE,
        text_color,
    );
}

fn draw_status_overlay(scene: &Scene, geometry: GridGeometry) {
    let Some(message) = status_message(scene.phase) else {
        return;
    };

    let origin = geometry.cell_top_left(grid_snake_core::CellCoord::new(0, 0));
    let side = scene.grid.side_length();
    let dim = to_macroquad_color(Color::from_rgb_u8(0, 0, 0).with_alpha(OVERLAY_DIM_ALPHA));
    macroquad::shapes::draw_rectangle(origin.x, origin.y, side, side, dim);

    let metrics = macroquad::text::measure_text(message, None, OVERLAY_FONT_SIZE as u16, 1.0);
    macroquad::text::draw_text(
        message,
        origin.x + (side - metrics.width) * 0.5,
        origin.y + side * 0.5,
        OVERLAY_FONT_SIZE,
        to_macroquad_color(scene.hud.text_color),
    );
}

fn control_panel_context(scene: &Scene, geometry: GridGeometry, background: Color) -> ControlPanelUiContext {
    let origin = geometry.cell_top_left(grid_snake_core::CellCoord::new(0, 0));
    let side = scene.grid.side_length();

    ControlPanelUiContext {
        x: origin.x,
        y: origin.y + side + 8.0,
        width: side,
        height: PANEL_STRIP_HEIGHT - 8.0,
        background: to_macroquad_color(background),
        phase: scene.phase,
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
