#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Grid Snake engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Grid Snake.";

/// Lifecycle phase of a single game session.
///
/// `GameOver` is terminal for the current game; only a reset exits it. The
/// classic `running`/`game_over` flag pair is derived from this phase, which
/// makes their mutual exclusion hold by construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunPhase {
    /// Fresh or reset session that has not started ticking yet.
    Idle,
    /// Ticks are being accepted and the actor advances.
    Running,
    /// Ticks are suspended with the full session state preserved.
    Paused,
    /// The actor collided; no further ticks or steering are accepted.
    GameOver,
}

impl RunPhase {
    /// Reports whether the session currently accepts ticks.
    #[must_use]
    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    /// Reports whether the session reached its terminal phase.
    #[must_use]
    pub const fn is_game_over(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

/// Cardinal movement directions available to the actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Returns the direction pointing exactly opposite to this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }
}

/// Side length of the square play grid measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridSize(u32);

impl GridSize {
    /// Creates a new grid size wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the underlying cell count per axis.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Reports whether the provided cell lies inside the grid bounds.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.0 && cell.row() < self.0
    }

    /// Total number of cells contained in the grid.
    #[must_use]
    pub const fn cell_count(&self) -> u64 {
        self.0 as u64 * self.0 as u64
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Returns the adjacent cell one unit step in the provided direction.
    ///
    /// Yields `None` when the step would leave the coordinate space at the
    /// zero edges; the upper grid bound is the world's responsibility since
    /// only it knows the configured [`GridSize`].
    #[must_use]
    pub const fn neighbor(self, direction: Direction) -> Option<Self> {
        match direction {
            Direction::North => {
                if self.row == 0 {
                    None
                } else {
                    Some(Self::new(self.column, self.row - 1))
                }
            }
            Direction::East => Some(Self::new(self.column + 1, self.row)),
            Direction::South => Some(Self::new(self.column, self.row + 1)),
            Direction::West => {
                if self.column == 0 {
                    None
                } else {
                    Some(Self::new(self.column - 1, self.row))
                }
            }
        }
    }
}

/// Number of targets consumed during the current game.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Score(u32);

impl Score {
    /// Creates a new score wrapper with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the score.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the score increased by one consumed target.
    #[must_use]
    pub const fn incremented(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

/// Terminal collision that ended a game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameOverCause {
    /// The actor's head left the grid bounds.
    WallCollision,
    /// The actor's head landed on an occupied body cell.
    SelfCollision,
}

/// Player-facing actions exposed by the control surface.
///
/// Adapters translate keyboard input and UI buttons into these actions; the
/// session system maps them to commands, and the world validates them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlAction {
    /// Begin ticking from `Idle` or `Paused`.
    Start,
    /// Suspend a running session or resume a paused one.
    TogglePause,
    /// Discard the current session and reinitialize.
    Reset,
    /// Buffer a direction for the next tick.
    Steer(Direction),
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Buffers the direction the next tick will commit.
    SetDirection {
        /// Direction requested by the player.
        direction: Direction,
    },
    /// Advances the simulation by exactly one discrete step.
    Tick,
    /// Requests the transition into the `Running` phase.
    StartRun,
    /// Suspends a running session or resumes a paused one.
    TogglePause,
    /// Discards the current session and reinitializes the world.
    ResetRun,
}

/// Events broadcast by the world (and systems) after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Announces that the session entered the `Running` phase.
    RunStarted {
        /// Interval at which ticks should be scheduled.
        tick_interval: Duration,
    },
    /// Announces that a running session was suspended.
    RunPaused,
    /// Announces that the world was reinitialized to a fresh session.
    SessionReset {
        /// Interval at which ticks should be scheduled once started.
        tick_interval: Duration,
    },
    /// Confirms that the actor's head advanced by one cell.
    ActorAdvanced {
        /// Cell the head occupied before the step.
        from: CellCoord,
        /// Cell the head occupies after the step.
        to: CellCoord,
    },
    /// Confirms that the actor consumed the target and grew.
    TargetConsumed {
        /// Cell at which the target was consumed.
        cell: CellCoord,
        /// Score after the consumption.
        score: Score,
    },
    /// Announces the location of a freshly placed target.
    TargetPlaced {
        /// Cell at which the new target was placed.
        cell: CellCoord,
    },
    /// Announces that the tick interval decreased.
    SpeedChanged {
        /// Interval that takes effect on the next scheduled tick.
        tick_interval: Duration,
    },
    /// Announces that the current game reached its terminal phase.
    GameEnded {
        /// Final score of the finished game.
        score: Score,
        /// Collision that ended the game.
        cause: GameOverCause,
    },
    /// Announces that a finished game improved the persisted high score.
    HighScoreUpdated {
        /// New high score value.
        score: Score,
    },
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Direction, GridSize, Score};
    use serde::{de::DeserializeOwned, Serialize};

    #[test]
    fn opposite_is_an_involution() {
        for direction in [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ] {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
        }
    }

    #[test]
    fn neighbor_steps_one_unit() {
        let origin = CellCoord::new(3, 3);
        assert_eq!(
            origin.neighbor(Direction::North),
            Some(CellCoord::new(3, 2))
        );
        assert_eq!(origin.neighbor(Direction::East), Some(CellCoord::new(4, 3)));
        assert_eq!(
            origin.neighbor(Direction::South),
            Some(CellCoord::new(3, 4))
        );
        assert_eq!(origin.neighbor(Direction::West), Some(CellCoord::new(2, 3)));
    }

    #[test]
    fn neighbor_refuses_to_underflow() {
        let corner = CellCoord::new(0, 0);
        assert_eq!(corner.neighbor(Direction::North), None);
        assert_eq!(corner.neighbor(Direction::West), None);
        assert_eq!(corner.neighbor(Direction::East), Some(CellCoord::new(1, 0)));
        assert_eq!(
            corner.neighbor(Direction::South),
            Some(CellCoord::new(0, 1))
        );
    }

    #[test]
    fn grid_size_contains_matches_bounds() {
        let grid = GridSize::new(4);
        assert!(grid.contains(CellCoord::new(0, 0)));
        assert!(grid.contains(CellCoord::new(3, 3)));
        assert!(!grid.contains(CellCoord::new(4, 0)));
        assert!(!grid.contains(CellCoord::new(0, 4)));
        assert_eq!(grid.cell_count(), 16);
    }

    #[test]
    fn score_increment_is_monotonic() {
        let score = Score::new(0);
        assert_eq!(score.incremented().get(), 1);
        assert!(score.incremented() > score);
        assert_eq!(Score::new(u32::MAX).incremented().get(), u32::MAX);
    }

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn cell_coord_round_trips_through_bincode() {
        assert_round_trip(&CellCoord::new(7, 13));
    }

    #[test]
    fn direction_round_trips_through_bincode() {
        assert_round_trip(&Direction::West);
    }

    #[test]
    fn score_round_trips_through_bincode() {
        assert_round_trip(&Score::new(42));
    }

    #[test]
    fn grid_size_round_trips_through_bincode() {
        assert_round_trip(&GridSize::new(20));
    }
}
