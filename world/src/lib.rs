#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Grid Snake.
//!
//! The [`World`] owns the complete session state: the actor body, the
//! committed and pending directions, the target, the score, the tick
//! interval, and the lifecycle phase. All mutation flows through [`apply`],
//! which executes a [`Command`] and broadcasts the resulting [`Event`]s.
//! Adapters and systems read state exclusively through the [`query`] module.

use std::{collections::VecDeque, time::Duration};

use grid_snake_core::{
    CellCoord, Command, Direction, Event, GameOverCause, GridSize, RunPhase, Score, WELCOME_BANNER,
};
use thiserror::Error;

const DEFAULT_GRID_SIZE: GridSize = GridSize::new(20);
const DEFAULT_INITIAL_LENGTH: u32 = 3;
const DEFAULT_INITIAL_INTERVAL: Duration = Duration::from_millis(180);
const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(70);
const DEFAULT_INTERVAL_DECREMENT: Duration = Duration::from_millis(5);
const DEFAULT_SPEED_UP_EVERY: u32 = 5;

const TARGET_SAMPLING_SEED: u64 = 0x9e37_79b9_7f4a_7c15;

/// Tuning parameters required to construct a [`World`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    grid_size: GridSize,
    initial_length: u32,
    initial_interval: Duration,
    min_interval: Duration,
    interval_decrement: Duration,
    speed_up_every: u32,
    rng_seed: u64,
}

impl Config {
    /// Replaces the grid side length.
    #[must_use]
    pub const fn with_grid_size(mut self, grid_size: GridSize) -> Self {
        self.grid_size = grid_size;
        self
    }

    /// Replaces the actor's starting length.
    #[must_use]
    pub const fn with_initial_length(mut self, initial_length: u32) -> Self {
        self.initial_length = initial_length;
        self
    }

    /// Replaces the tick interval a fresh session starts with.
    #[must_use]
    pub const fn with_initial_interval(mut self, initial_interval: Duration) -> Self {
        self.initial_interval = initial_interval;
        self
    }

    /// Replaces the floor below which the tick interval never drops.
    #[must_use]
    pub const fn with_min_interval(mut self, min_interval: Duration) -> Self {
        self.min_interval = min_interval;
        self
    }

    /// Replaces the amount subtracted from the interval on each speed-up.
    #[must_use]
    pub const fn with_interval_decrement(mut self, interval_decrement: Duration) -> Self {
        self.interval_decrement = interval_decrement;
        self
    }

    /// Replaces the score interval at which the session speeds up.
    #[must_use]
    pub const fn with_speed_up_every(mut self, speed_up_every: u32) -> Self {
        self.speed_up_every = speed_up_every;
        self
    }

    /// Replaces the seed that drives target placement.
    #[must_use]
    pub const fn with_rng_seed(mut self, rng_seed: u64) -> Self {
        self.rng_seed = rng_seed;
        self
    }

    /// Side length of the play grid.
    #[must_use]
    pub const fn grid_size(&self) -> GridSize {
        self.grid_size
    }

    /// Starting length of the actor body.
    #[must_use]
    pub const fn initial_length(&self) -> u32 {
        self.initial_length
    }

    /// Tick interval a fresh session starts with.
    #[must_use]
    pub const fn initial_interval(&self) -> Duration {
        self.initial_interval
    }

    /// Floor below which the tick interval never drops.
    #[must_use]
    pub const fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Amount subtracted from the tick interval on each speed-up.
    #[must_use]
    pub const fn interval_decrement(&self) -> Duration {
        self.interval_decrement
    }

    /// Score interval at which the session speeds up.
    #[must_use]
    pub const fn speed_up_every(&self) -> u32 {
        self.speed_up_every
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_length == 0 {
            return Err(ConfigError::ZeroInitialLength);
        }
        if self.grid_size.get() <= self.initial_length {
            return Err(ConfigError::UndersizedGrid {
                grid: self.grid_size.get(),
                initial_length: self.initial_length,
            });
        }
        if self.initial_interval.is_zero() || self.min_interval.is_zero() {
            return Err(ConfigError::ZeroTickInterval);
        }
        if self.interval_decrement.is_zero() {
            return Err(ConfigError::ZeroIntervalDecrement);
        }
        if self.min_interval > self.initial_interval {
            return Err(ConfigError::FloorAboveInitial {
                min_ms: duration_millis(self.min_interval),
                initial_ms: duration_millis(self.initial_interval),
            });
        }
        if self.speed_up_every == 0 {
            return Err(ConfigError::ZeroSpeedUpInterval);
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            initial_length: DEFAULT_INITIAL_LENGTH,
            initial_interval: DEFAULT_INITIAL_INTERVAL,
            min_interval: DEFAULT_MIN_INTERVAL,
            interval_decrement: DEFAULT_INTERVAL_DECREMENT,
            speed_up_every: DEFAULT_SPEED_UP_EVERY,
            rng_seed: TARGET_SAMPLING_SEED,
        }
    }
}

/// Construction-time configuration faults. These are programming or
/// deployment errors and surface at startup, never mid-game.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The grid cannot host the initial actor plus one free target cell.
    #[error("grid size {grid} cannot host an actor of length {initial_length} plus a free target cell")]
    UndersizedGrid {
        /// Configured grid side length.
        grid: u32,
        /// Configured initial actor length.
        initial_length: u32,
    },
    /// The actor body must never be empty.
    #[error("initial actor length must be positive")]
    ZeroInitialLength,
    /// Tick intervals must be positive to schedule ticks at all.
    #[error("tick intervals must be positive")]
    ZeroTickInterval,
    /// A zero decrement would make speed progression unobservable.
    #[error("interval decrement must be positive")]
    ZeroIntervalDecrement,
    /// The interval floor must not exceed the starting interval.
    #[error("minimum tick interval {min_ms} ms exceeds the initial interval {initial_ms} ms")]
    FloorAboveInitial {
        /// Configured floor in milliseconds.
        min_ms: u64,
        /// Configured starting interval in milliseconds.
        initial_ms: u64,
    },
    /// A zero speed-up interval would divide by zero on every consumption.
    #[error("speed-up score interval must be positive")]
    ZeroSpeedUpInterval,
}

/// Represents the authoritative Grid Snake session state.
#[derive(Clone, Debug)]
pub struct World {
    banner: &'static str,
    config: Config,
    actor: VecDeque<CellCoord>,
    direction: Direction,
    pending_direction: Direction,
    target: CellCoord,
    score: Score,
    tick_interval: Duration,
    phase: RunPhase,
    rng_state: u64,
}

impl World {
    /// Creates a new world ready for simulation.
    ///
    /// Fails fast when the configuration cannot produce a playable session;
    /// see [`ConfigError`] for the individual preconditions.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut world = Self {
            banner: WELCOME_BANNER,
            config,
            actor: VecDeque::new(),
            direction: Direction::East,
            pending_direction: Direction::East,
            target: CellCoord::new(0, 0),
            score: Score::new(0),
            tick_interval: config.initial_interval,
            phase: RunPhase::Idle,
            rng_state: config.rng_seed,
        };
        world.reset_session();
        Ok(world)
    }

    fn reset_session(&mut self) {
        let length = self.config.initial_length;
        let side = self.config.grid_size.get();
        let start_column = (side - length) / 2;
        let row = side / 2;

        self.actor.clear();
        for offset in 0..length {
            // Head first: the east-most cell of the centered segment.
            let column = start_column + (length - 1 - offset);
            self.actor.push_back(CellCoord::new(column, row));
        }

        self.direction = Direction::East;
        self.pending_direction = Direction::East;
        self.score = Score::new(0);
        self.tick_interval = self.config.initial_interval;
        self.phase = RunPhase::Idle;
        self.target = self.random_free_cell();
    }

    fn buffer_direction(&mut self, direction: Direction) {
        if self.phase.is_game_over() {
            return;
        }
        // Reversals are compared against the committed direction, not the
        // buffered one: the buffer may hold any non-reversing value.
        if direction == self.direction.opposite() {
            return;
        }
        self.pending_direction = direction;
    }

    fn step(&mut self, out_events: &mut Vec<Event>) {
        // The scheduler stops ticking outside `Running`; this guard also
        // discards ticks queued earlier in a frame that ended or reset the
        // session, so they never touch reinitialized state.
        if self.phase != RunPhase::Running {
            return;
        }

        self.direction = self.pending_direction;

        let Some(&head) = self.actor.front() else {
            return;
        };

        let next_head = match head.neighbor(self.direction) {
            Some(cell) if self.config.grid_size.contains(cell) => cell,
            _ => {
                self.end_game(GameOverCause::WallCollision, out_events);
                return;
            }
        };

        // Checked against every body cell, tail included: the tail has not
        // been popped yet, so a move onto the vacating tail cell ends the
        // game.
        if self.actor.iter().any(|cell| *cell == next_head) {
            self.end_game(GameOverCause::SelfCollision, out_events);
            return;
        }

        self.actor.push_front(next_head);
        out_events.push(Event::ActorAdvanced {
            from: head,
            to: next_head,
        });

        if next_head == self.target {
            self.score = self.score.incremented();
            out_events.push(Event::TargetConsumed {
                cell: next_head,
                score: self.score,
            });
            self.target = self.random_free_cell();
            out_events.push(Event::TargetPlaced { cell: self.target });
            self.advance_speed(out_events);
        } else {
            let _ = self.actor.pop_back();
        }
    }

    fn advance_speed(&mut self, out_events: &mut Vec<Event>) {
        let score = self.score.get();
        if score == 0 || score % self.config.speed_up_every != 0 {
            return;
        }
        if self.tick_interval <= self.config.min_interval {
            return;
        }

        let lowered = self
            .tick_interval
            .saturating_sub(self.config.interval_decrement);
        self.tick_interval = lowered.max(self.config.min_interval);
        out_events.push(Event::SpeedChanged {
            tick_interval: self.tick_interval,
        });
    }

    fn start(&mut self, out_events: &mut Vec<Event>) {
        match self.phase {
            RunPhase::Idle | RunPhase::Paused => {
                self.phase = RunPhase::Running;
                out_events.push(Event::RunStarted {
                    tick_interval: self.tick_interval,
                });
            }
            RunPhase::Running | RunPhase::GameOver => {}
        }
    }

    fn toggle_pause(&mut self, out_events: &mut Vec<Event>) {
        match self.phase {
            RunPhase::Running => {
                self.phase = RunPhase::Paused;
                out_events.push(Event::RunPaused);
            }
            RunPhase::Idle | RunPhase::Paused => self.start(out_events),
            RunPhase::GameOver => {}
        }
    }

    fn reset(&mut self, out_events: &mut Vec<Event>) {
        self.reset_session();
        out_events.push(Event::SessionReset {
            tick_interval: self.tick_interval,
        });
    }

    fn end_game(&mut self, cause: GameOverCause, out_events: &mut Vec<Event>) {
        self.phase = RunPhase::GameOver;
        out_events.push(Event::GameEnded {
            score: self.score,
            cause,
        });
    }

    /// Draws a uniformly distributed cell that the actor does not occupy.
    ///
    /// Rejection-samples the grid, so it terminates with probability 1 as
    /// long as at least one free cell exists. A body covering the entire
    /// grid is unreachable under play (no win condition is modeled) and
    /// remains a caller precondition.
    fn random_free_cell(&mut self) -> CellCoord {
        let side = u64::from(self.config.grid_size.get());
        debug_assert!(
            (self.actor.len() as u64) < self.config.grid_size.cell_count(),
            "target sampling requires at least one free cell"
        );

        loop {
            self.rng_state = next_random(self.rng_state);
            let column = ((self.rng_state >> 32) % side) as u32;
            self.rng_state = next_random(self.rng_state);
            let row = ((self.rng_state >> 32) % side) as u32;

            let cell = CellCoord::new(column, row);
            if !self.actor.iter().any(|occupied| *occupied == cell) {
                return cell;
            }
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::SetDirection { direction } => world.buffer_direction(direction),
        Command::Tick => world.step(out_events),
        Command::StartRun => world.start(out_events),
        Command::TogglePause => world.toggle_pause(out_events),
        Command::ResetRun => world.reset(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use grid_snake_core::{CellCoord, Direction, GridSize, RunPhase, Score};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Side length of the configured play grid.
    #[must_use]
    pub fn grid_size(world: &World) -> GridSize {
        world.config.grid_size
    }

    /// Direction most recently committed by a tick.
    #[must_use]
    pub fn direction(world: &World) -> Direction {
        world.direction
    }

    /// Direction the next tick will commit.
    #[must_use]
    pub fn pending_direction(world: &World) -> Direction {
        world.pending_direction
    }

    /// Cell currently occupied by the target.
    #[must_use]
    pub fn target(world: &World) -> CellCoord {
        world.target
    }

    /// Score accumulated during the current game.
    #[must_use]
    pub fn score(world: &World) -> Score {
        world.score
    }

    /// Interval at which ticks should currently be scheduled.
    #[must_use]
    pub fn tick_interval(world: &World) -> Duration {
        world.tick_interval
    }

    /// Lifecycle phase of the current session.
    #[must_use]
    pub fn phase(world: &World) -> RunPhase {
        world.phase
    }

    /// Captures the read-only snapshot consumed by presentation adapters.
    #[must_use]
    pub fn snapshot(world: &World) -> WorldSnapshot {
        WorldSnapshot {
            body: world.actor.iter().copied().collect(),
            target: world.target,
            score: world.score,
            tick_interval: world.tick_interval,
            phase: world.phase,
        }
    }

    /// Immutable copy of everything presentation needs for one frame.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct WorldSnapshot {
        /// Actor body cells ordered head first.
        pub body: Vec<CellCoord>,
        /// Cell currently occupied by the target.
        pub target: CellCoord,
        /// Score accumulated during the current game.
        pub score: Score,
        /// Interval at which ticks are currently scheduled.
        pub tick_interval: Duration,
        /// Lifecycle phase of the session.
        pub phase: RunPhase,
    }

    impl WorldSnapshot {
        /// Cell occupied by the actor's head.
        #[must_use]
        pub fn head(&self) -> Option<CellCoord> {
            self.body.first().copied()
        }

        /// Derived `running` flag of the classic model.
        #[must_use]
        pub fn running(&self) -> bool {
            self.phase.is_running()
        }

        /// Derived `game_over` flag of the classic model.
        #[must_use]
        pub fn game_over(&self) -> bool {
            self.phase.is_game_over()
        }
    }
}

fn next_random(state: u64) -> u64 {
    state.wrapping_mul(636_413_622_384_679_3005).wrapping_add(1)
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
