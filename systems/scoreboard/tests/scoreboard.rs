use std::time::Duration;

use grid_snake_core::{Event, GameOverCause, Score};
use grid_snake_system_scoreboard::{HighScoreStore, MemoryStore, Scoreboard, StoreError};

struct FailingStore;

impl HighScoreStore for FailingStore {
    fn load(&mut self) -> Result<Option<Score>, StoreError> {
        Err(StoreError::Unavailable {
            reason: "store offline".to_string(),
        })
    }

    fn save(&mut self, _score: Score) -> Result<(), StoreError> {
        Err(StoreError::Unavailable {
            reason: "store offline".to_string(),
        })
    }
}

fn game_ended(score: u32) -> Event {
    Event::GameEnded {
        score: Score::new(score),
        cause: GameOverCause::WallCollision,
    }
}

#[test]
fn absent_value_starts_the_high_score_at_zero() {
    let scoreboard = Scoreboard::new(MemoryStore::new());
    assert_eq!(scoreboard.high_score(), Score::new(0));
}

#[test]
fn persisted_value_seeds_the_high_score() {
    let scoreboard = Scoreboard::new(MemoryStore::with_value(Score::new(12)));
    assert_eq!(scoreboard.high_score(), Score::new(12));
}

#[test]
fn load_fault_degrades_to_zero() {
    let scoreboard = Scoreboard::new(FailingStore);
    assert_eq!(scoreboard.high_score(), Score::new(0));
}

#[test]
fn improving_game_over_saves_exactly_once() {
    let mut scoreboard = Scoreboard::new(MemoryStore::with_value(Score::new(4)));
    let mut emitted = Vec::new();

    scoreboard.handle(&[game_ended(7)], &mut emitted);

    assert_eq!(scoreboard.high_score(), Score::new(7));
    assert_eq!(scoreboard.store().saves(), 1, "exactly one write-through");
    assert_eq!(scoreboard.store().value(), Some(Score::new(7)));
    assert_eq!(
        emitted,
        vec![Event::HighScoreUpdated {
            score: Score::new(7),
        }]
    );
}

#[test]
fn non_improving_game_over_never_touches_the_store() {
    let mut scoreboard = Scoreboard::new(MemoryStore::with_value(Score::new(9)));
    let mut emitted = Vec::new();

    scoreboard.handle(&[game_ended(9)], &mut emitted);
    scoreboard.handle(&[game_ended(3)], &mut emitted);

    assert_eq!(scoreboard.high_score(), Score::new(9));
    assert_eq!(scoreboard.store().saves(), 0);
    assert!(emitted.is_empty());
}

#[test]
fn save_fault_still_advances_the_in_memory_value() {
    let mut scoreboard = Scoreboard::new(FailingStore);
    let mut emitted = Vec::new();

    scoreboard.handle(&[game_ended(5)], &mut emitted);

    assert_eq!(scoreboard.high_score(), Score::new(5));
    assert_eq!(
        emitted,
        vec![Event::HighScoreUpdated {
            score: Score::new(5),
        }]
    );
}

#[test]
fn session_reset_leaves_the_high_score_unchanged() {
    let mut scoreboard = Scoreboard::new(MemoryStore::new());
    let mut emitted = Vec::new();

    scoreboard.handle(&[game_ended(6)], &mut emitted);
    scoreboard.handle(
        &[Event::SessionReset {
            tick_interval: Duration::from_millis(180),
        }],
        &mut emitted,
    );

    assert_eq!(scoreboard.high_score(), Score::new(6));
    assert_eq!(scoreboard.store().value(), Some(Score::new(6)));
    assert_eq!(scoreboard.store().saves(), 1);
}

#[test]
fn other_events_are_ignored() {
    let mut scoreboard = Scoreboard::new(MemoryStore::new());
    let mut emitted = Vec::new();

    scoreboard.handle(
        &[
            Event::RunPaused,
            Event::TargetConsumed {
                cell: grid_snake_core::CellCoord::new(1, 1),
                score: Score::new(99),
            },
        ],
        &mut emitted,
    );

    assert_eq!(scoreboard.high_score(), Score::new(0));
    assert!(emitted.is_empty());
}
