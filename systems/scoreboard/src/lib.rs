#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! High-score tracking system backed by a pluggable key-value store.
//!
//! The scoreboard mirrors the best finished score across sessions. It loads
//! the persisted value once at construction, reacts to `GameEnded` events by
//! writing through on improvement, and otherwise leaves the store untouched.
//! Persistence is non-essential to gameplay: a failing store degrades to
//! in-memory tracking instead of propagating an error.

use grid_snake_core::{Event, Score};
use thiserror::Error;

/// Error surfaced by high-score persistence backends.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store could not be read or written.
    #[error("high score store unavailable: {reason}")]
    Unavailable {
        /// Human-readable description of the fault.
        reason: String,
    },
}

/// Key-value backend holding the single persisted high-score value.
pub trait HighScoreStore {
    /// Reads the persisted high score; `None` when no value was ever saved.
    fn load(&mut self) -> Result<Option<Score>, StoreError>;

    /// Persists a new high score.
    fn save(&mut self, score: Score) -> Result<(), StoreError>;
}

/// System that tracks the best finished score across game sessions.
#[derive(Debug)]
pub struct Scoreboard<S> {
    store: S,
    high_score: Score,
}

impl<S: HighScoreStore> Scoreboard<S> {
    /// Creates a scoreboard seeded from the store.
    ///
    /// An absent value or a load fault both start the high score at zero.
    #[must_use]
    pub fn new(mut store: S) -> Self {
        let high_score = match store.load() {
            Ok(Some(score)) => score,
            Ok(None) | Err(_) => Score::new(0),
        };
        Self { store, high_score }
    }

    /// Best finished score observed so far, including the persisted seed.
    #[must_use]
    pub fn high_score(&self) -> Score {
        self.high_score
    }

    /// Read-only access to the backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes world events and writes through improving final scores.
    ///
    /// Emits [`Event::HighScoreUpdated`] for every improvement. Save faults
    /// are swallowed; the in-memory value still advances so the HUD keeps
    /// showing the best score of the process.
    pub fn handle(&mut self, events: &[Event], out_events: &mut Vec<Event>) {
        for event in events {
            let Event::GameEnded { score, .. } = event else {
                continue;
            };
            if *score <= self.high_score {
                continue;
            }

            self.high_score = *score;
            let _ = self.store.save(*score);
            out_events.push(Event::HighScoreUpdated { score: *score });
        }
    }
}

/// In-memory store used by tests and as a last-resort fallback backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryStore {
    value: Option<Score>,
    saves: u32,
}

impl MemoryStore {
    /// Creates an empty store with no persisted value.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: None,
            saves: 0,
        }
    }

    /// Creates a store seeded with a previously persisted value.
    #[must_use]
    pub const fn with_value(score: Score) -> Self {
        Self {
            value: Some(score),
            saves: 0,
        }
    }

    /// Value currently held by the store.
    #[must_use]
    pub const fn value(&self) -> Option<Score> {
        self.value
    }

    /// Number of save calls the store has received.
    #[must_use]
    pub const fn saves(&self) -> u32 {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<Option<Score>, StoreError> {
        Ok(self.value)
    }

    fn save(&mut self, score: Score) -> Result<(), StoreError> {
        self.value = Some(score);
        self.saves = self.saves.saturating_add(1);
        Ok(())
    }
}
