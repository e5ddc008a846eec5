#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session system that schedules ticks and relays control-surface input.
//!
//! The world owns the lifecycle phase; this system owns time. It mirrors the
//! phase by consuming world events, arms or disarms its repeating tick timer
//! accordingly, and converts adapter frame deltas into discrete
//! [`Command::Tick`] values. Control actions pass through unvalidated; the
//! world decides which transitions are legal.

use std::time::Duration;

use grid_snake_core::{Command, ControlAction, Event, RunPhase};

/// Pure system that owns the repeating tick timer for one game session.
#[derive(Debug)]
pub struct Session {
    phase: RunPhase,
    timer: TickTimer,
}

impl Session {
    /// Creates a new session scheduler tuned to the world's current interval.
    #[must_use]
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            phase: RunPhase::Idle,
            timer: TickTimer::new(tick_interval),
        }
    }

    /// Lifecycle phase as mirrored from the world's event stream.
    #[must_use]
    pub const fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Reports whether the repeating timer is currently armed.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.timer.armed
    }

    /// Interval the timer is currently tuned to.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        self.timer.interval
    }

    /// Consumes world events to keep the timer aligned with the lifecycle.
    ///
    /// Arming and rearming always restart the accumulator, so a tick from an
    /// old cadence can never fire once a new interval is armed, and at most
    /// one timer is live at any moment.
    pub fn handle(&mut self, events: &[Event]) {
        for event in events {
            match event {
                Event::RunStarted { tick_interval } => {
                    self.phase = RunPhase::Running;
                    self.timer.arm(*tick_interval);
                }
                Event::RunPaused => {
                    self.phase = RunPhase::Paused;
                    self.timer.disarm();
                }
                Event::SessionReset { tick_interval } => {
                    self.phase = RunPhase::Idle;
                    self.timer.disarm();
                    self.timer.retune(*tick_interval);
                }
                Event::SpeedChanged { tick_interval } => {
                    if self.timer.armed {
                        self.timer.arm(*tick_interval);
                    } else {
                        self.timer.retune(*tick_interval);
                    }
                }
                Event::GameEnded { .. } => {
                    self.phase = RunPhase::GameOver;
                    self.timer.disarm();
                }
                Event::ActorAdvanced { .. }
                | Event::TargetConsumed { .. }
                | Event::TargetPlaced { .. }
                | Event::HighScoreUpdated { .. } => {}
            }
        }
    }

    /// Accumulates a frame delta and emits one tick per elapsed interval.
    ///
    /// Large deltas emit several ticks so simulated time never drifts behind
    /// wall-clock time on slow frames.
    pub fn frame(&mut self, dt: Duration, out: &mut Vec<Command>) {
        self.timer.advance(dt, out);
    }

    /// Translates a control-surface action into its world command.
    pub fn control(&self, action: ControlAction, out: &mut Vec<Command>) {
        let command = match action {
            ControlAction::Start => Command::StartRun,
            ControlAction::TogglePause => Command::TogglePause,
            ControlAction::Reset => Command::ResetRun,
            ControlAction::Steer(direction) => Command::SetDirection { direction },
        };
        out.push(command);
    }
}

/// Cancellable repeating timer realized as a frame-delta accumulator.
#[derive(Debug)]
struct TickTimer {
    interval: Duration,
    elapsed: Duration,
    armed: bool,
}

impl TickTimer {
    fn new(interval: Duration) -> Self {
        Self {
            interval,
            elapsed: Duration::ZERO,
            armed: false,
        }
    }

    fn arm(&mut self, interval: Duration) {
        self.interval = interval;
        self.elapsed = Duration::ZERO;
        self.armed = true;
    }

    fn disarm(&mut self) {
        self.elapsed = Duration::ZERO;
        self.armed = false;
    }

    fn retune(&mut self, interval: Duration) {
        self.interval = interval;
    }

    fn advance(&mut self, dt: Duration, out: &mut Vec<Command>) {
        if !self.armed || self.interval.is_zero() {
            return;
        }

        self.elapsed = self.elapsed.saturating_add(dt);
        while self.elapsed >= self.interval {
            self.elapsed -= self.interval;
            out.push(Command::Tick);
        }
    }
}
