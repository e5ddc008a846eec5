#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Grid Snake adapters.
//!
//! Backends receive a [`Presentation`] describing the initial scene and a
//! closure that refreshes the [`Scene`] from the latest world snapshot once
//! per frame. Scenes are plain data: nothing in this crate can reach back
//! into the simulation.

use anyhow::Result as AnyResult;
use glam::Vec2;
use grid_snake_core::{CellCoord, Direction, GridSize, RunPhase, Score};
use std::{error::Error, fmt, time::Duration};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }

    /// Returns the same color with the provided alpha channel.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            ..self
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Input snapshot gathered by adapters before updating the scene.
///
/// Carries the complete control surface: one buffered steering request plus
/// the three lifecycle actions, each true when pressed on this frame either
/// on the keyboard or in the adapter's control panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Direction requested by the player on this frame, if any.
    pub steer: Option<Direction>,
    /// Whether a start action was triggered on this frame.
    pub start_action: bool,
    /// Whether a pause toggle was triggered on this frame.
    pub toggle_pause_action: bool,
    /// Whether a reset action was triggered on this frame.
    pub reset_action: bool,
}

/// Describes the square play grid that backends should draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Number of cells along each grid axis.
    pub size: GridSize,
    /// Side length of a single cell expressed in screen units.
    pub cell_length: f32,
    /// Color used when drawing grid lines.
    pub line_color: Color,
}

impl GridPresentation {
    /// Creates a new grid descriptor.
    ///
    /// Returns an error when the grid has no cells or the cell length is not
    /// positive.
    pub fn new(
        size: GridSize,
        cell_length: f32,
        line_color: Color,
    ) -> Result<Self, RenderingError> {
        if size.get() == 0 {
            return Err(RenderingError::EmptyGrid);
        }
        if cell_length <= f32::EPSILON {
            return Err(RenderingError::InvalidCellLength { cell_length });
        }

        Ok(Self {
            size,
            cell_length,
            line_color,
        })
    }

    /// Total side length of the grid in screen units.
    #[must_use]
    pub fn side_length(&self) -> f32 {
        self.size.get() as f32 * self.cell_length
    }
}

/// Maps grid cells onto screen-space positions for a backend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridGeometry {
    origin: Vec2,
    cell_length: f32,
}

impl GridGeometry {
    /// Creates a new geometry anchored at the grid's top-left corner.
    #[must_use]
    pub const fn new(origin: Vec2, cell_length: f32) -> Self {
        Self {
            origin,
            cell_length,
        }
    }

    /// Screen position of the cell's top-left corner.
    #[must_use]
    pub fn cell_top_left(&self, cell: CellCoord) -> Vec2 {
        self.origin
            + Vec2::new(
                cell.column() as f32 * self.cell_length,
                cell.row() as f32 * self.cell_length,
            )
    }

    /// Screen position of the cell's center.
    #[must_use]
    pub fn cell_center(&self, cell: CellCoord) -> Vec2 {
        self.cell_top_left(cell) + Vec2::splat(self.cell_length * 0.5)
    }

    /// Side length of a single cell in screen units.
    #[must_use]
    pub const fn cell_length(&self) -> f32 {
        self.cell_length
    }
}

/// Single actor cell rendered as a filled square.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorCellPresentation {
    /// Cell occupied by this body segment.
    pub cell: CellCoord,
    /// Fill color of the segment.
    pub color: Color,
}

impl ActorCellPresentation {
    /// Creates a new actor cell descriptor.
    #[must_use]
    pub const fn new(cell: CellCoord, color: Color) -> Self {
        Self { cell, color }
    }
}

/// Consumable target rendered as a filled disc scaled to a single cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetPresentation {
    /// Cell occupied by the target.
    pub cell: CellCoord,
    /// Fill color of the disc.
    pub color: Color,
}

impl TargetPresentation {
    /// Creates a new target descriptor.
    #[must_use]
    pub const fn new(cell: CellCoord, color: Color) -> Self {
        Self { cell, color }
    }
}

/// Score readouts displayed alongside the play grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HudPresentation {
    /// Score of the current game.
    pub score: Score,
    /// Best score across sessions.
    pub high_score: Score,
    /// Color used for HUD text.
    pub text_color: Color,
}

impl HudPresentation {
    /// Creates a new HUD descriptor.
    #[must_use]
    pub const fn new(score: Score, high_score: Score, text_color: Color) -> Self {
        Self {
            score,
            high_score,
            text_color,
        }
    }
}

/// Scene description combining the grid, its inhabitants and the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Play grid that composes the main area.
    pub grid: GridPresentation,
    /// Actor body cells ordered head first.
    pub actor: Vec<ActorCellPresentation>,
    /// Consumable target.
    pub target: TargetPresentation,
    /// Score readouts.
    pub hud: HudPresentation,
    /// Lifecycle phase driving the status overlay.
    pub phase: RunPhase,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub const fn new(
        grid: GridPresentation,
        actor: Vec<ActorCellPresentation>,
        target: TargetPresentation,
        hud: HudPresentation,
        phase: RunPhase,
    ) -> Self {
        Self {
            grid,
            actor,
            target,
            hud,
            phase,
        }
    }
}

/// Status line a backend should overlay for the provided phase, if any.
#[must_use]
pub fn status_message(phase: RunPhase) -> Option<&'static str> {
    match phase {
        RunPhase::Idle => Some("Press Space or Start"),
        RunPhase::Running => None,
        RunPhase::Paused => Some("Paused - press P to resume"),
        RunPhase::GameOver => Some("Game over - press R to restart"),
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Grid Snake scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter, and may mutate the scene
    /// before it is rendered. Backends draw whatever the closure leaves in
    /// the scene and never mutate simulation state themselves.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The grid must contain at least one cell.
    EmptyGrid,
    /// Cell side lengths must be positive to produce a visible grid.
    InvalidCellLength {
        /// Provided cell length that failed validation.
        cell_length: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must contain at least one cell"),
            Self::InvalidCellLength { cell_length } => {
                write!(f, "cell_length must be positive (received {cell_length})")
            }
        }
    }
}

impl Error for RenderingError {}
