//! TOML tuning configuration for the Grid Snake binary.

use std::{fs, path::Path, time::Duration};

use anyhow::{Context, Result};
use grid_snake_core::GridSize;
use grid_snake_world::Config as WorldConfig;
use serde::Deserialize;

/// Tuning knobs accepted from a TOML file.
///
/// Every field is optional; omitted keys keep the classic rules. Validation
/// beyond parsing is the world's job, so a playable-but-weird file (for
/// example a one-cell decrement) is accepted here and judged there.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    grid_size: u32,
    initial_length: u32,
    initial_interval_ms: u64,
    min_interval_ms: u64,
    interval_decrement_ms: u64,
    speed_up_every: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_length: 3,
            initial_interval_ms: 180,
            min_interval_ms: 70,
            interval_decrement_ms: 5,
            speed_up_every: 5,
        }
    }
}

impl GameConfig {
    /// Loads the configuration file, falling back to defaults when no path
    /// was provided.
    pub(crate) fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Converts the file representation into the world's typed configuration.
    pub(crate) fn world_config(&self) -> WorldConfig {
        WorldConfig::default()
            .with_grid_size(GridSize::new(self.grid_size))
            .with_initial_length(self.initial_length)
            .with_initial_interval(Duration::from_millis(self.initial_interval_ms))
            .with_min_interval(Duration::from_millis(self.min_interval_ms))
            .with_interval_decrement(Duration::from_millis(self.interval_decrement_ms))
            .with_speed_up_every(self.speed_up_every)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classic_rules() {
        let config = GameConfig::default();
        let world_config = config.world_config();

        assert_eq!(world_config.grid_size(), GridSize::new(20));
        assert_eq!(world_config.initial_length(), 3);
        assert_eq!(world_config.initial_interval(), Duration::from_millis(180));
        assert_eq!(world_config.min_interval(), Duration::from_millis(70));
        assert_eq!(
            world_config.interval_decrement(),
            Duration::from_millis(5)
        );
        assert_eq!(world_config.speed_up_every(), 5);
    }

    #[test]
    fn partial_files_fall_back_to_defaults() {
        let config: GameConfig =
            toml::from_str("grid_size = 24\ninitial_interval_ms = 150\n").expect("valid file");

        assert_eq!(config.world_config().grid_size(), GridSize::new(24));
        assert_eq!(
            config.world_config().initial_interval(),
            Duration::from_millis(150)
        );
        assert_eq!(config.world_config().min_interval(), Duration::from_millis(70));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let parsed: Result<GameConfig, _> = toml::from_str("grid_sized = 24\n");
        assert!(parsed.is_err());
    }
}
