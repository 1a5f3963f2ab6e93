//! Runtime configuration from environment variables.

use std::env;
use std::path::PathBuf;

use crate::store::{app_data_dir, default_stats_path};
use crate::types::PATTERN_SPEED_MS;

/// Startup configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub stats_path: PathBuf,
    pub log_path: PathBuf,
    pub muted: bool,
    /// Fixed RNG seed; `None` seeds from the clock.
    pub seed: Option<u32>,
    pub pattern_speed_ms: u32,
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            stats_path: default_stats_path(),
            log_path: app_data_dir().join("memory-quest.log"),
            muted: false,
            seed: None,
            pattern_speed_ms: PATTERN_SPEED_MS,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Read `MEMORY_QUEST_*` and `RUST_LOG`. Unparseable values keep their
    /// defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let stats_path = non_empty("MEMORY_QUEST_STATS_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.stats_path);
        let log_path = non_empty("MEMORY_QUEST_LOG_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_path);
        let muted = non_empty("MEMORY_QUEST_MUTED")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(defaults.muted);
        let seed = non_empty("MEMORY_QUEST_SEED").and_then(|s| s.parse::<u32>().ok());
        let pattern_speed_ms = non_empty("MEMORY_QUEST_PATTERN_SPEED_MS")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(defaults.pattern_speed_ms);
        let log_filter = non_empty("RUST_LOG").unwrap_or(defaults.log_filter);

        Self {
            stats_path,
            log_path,
            muted,
            seed,
            pattern_speed_ms,
            log_filter,
        }
    }
}
