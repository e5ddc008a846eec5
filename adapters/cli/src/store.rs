//! TOML-file-backed high-score persistence.

use std::{fs, path::PathBuf};

use grid_snake_core::Score;
use grid_snake_system_scoreboard::{HighScoreStore, StoreError};
use serde::{Deserialize, Serialize};

/// Persists the single high-score value as a small TOML document.
///
/// A missing file means no score was ever saved; anything unreadable is
/// reported as a store fault and left for the scoreboard to degrade on.
#[derive(Clone, Debug)]
pub(crate) struct FileStore {
    path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
struct HighScoreRecord {
    high_score: u32,
}

impl FileStore {
    pub(crate) fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl HighScoreStore for FileStore {
    fn load(&mut self) -> Result<Option<Score>, StoreError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path).map_err(|error| StoreError::Unavailable {
            reason: error.to_string(),
        })?;
        let record: HighScoreRecord =
            toml::from_str(&raw).map_err(|error| StoreError::Unavailable {
                reason: error.to_string(),
            })?;
        Ok(Some(Score::new(record.high_score)))
    }

    fn save(&mut self, score: Score) -> Result<(), StoreError> {
        let record = HighScoreRecord {
            high_score: score.get(),
        };
        let raw = toml::to_string(&record).map_err(|error| StoreError::Unavailable {
            reason: error.to_string(),
        })?;
        fs::write(&self.path, raw).map_err(|error| StoreError::Unavailable {
            reason: error.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn scratch_path(name: &str) -> PathBuf {
        env::temp_dir().join(format!(
            "grid-snake-{name}-{}.toml",
            std::process::id()
        ))
    }

    #[test]
    fn missing_file_loads_as_absent() {
        let mut store = FileStore::new(scratch_path("missing"));
        assert!(matches!(store.load(), Ok(None)));
    }

    #[test]
    fn save_then_load_round_trips() {
        let path = scratch_path("round-trip");
        let mut store = FileStore::new(path.clone());

        store.save(Score::new(17)).expect("save succeeds");
        let loaded = store.load().expect("load succeeds");

        assert_eq!(loaded, Some(Score::new(17)));
        fs::remove_file(path).expect("scratch file cleanup");
    }

    #[test]
    fn malformed_file_surfaces_a_store_fault() {
        let path = scratch_path("malformed");
        fs::write(&path, "not = \"a high score record\"").expect("scratch file write");

        let mut store = FileStore::new(path.clone());
        assert!(store.load().is_err());
        fs::remove_file(path).expect("scratch file cleanup");
    }
}
