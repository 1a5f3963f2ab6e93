//! Stats persistence - where [`PlayerStats`] lives between runs
//!
//! The stats record is one flat JSON object stored under the key
//! [`STATS_STORAGE_KEY`]. Two [`StatsStore`] implementations are provided:
//!
//! - [`JsonFileStore`]: a JSON file on disk, written through a temporary
//!   sibling and renamed into place so a failed write never truncates the
//!   previous snapshot
//! - [`MemoryStore`]: an in-memory key-value map, for tests and headless runs
//!
//! Decoding is lenient. Missing keys take their defaults and unknown theme
//! ids are dropped, but a blob that is not a JSON object at all is a
//! [`StoreError::Decode`]. The session treats any load error as "start from
//! defaults".

use std::io;
use std::path::PathBuf;

use memory_quest_core::PlayerStats;
use memory_quest_types::STATS_STORAGE_KEY;

pub use memory_quest_core::StatsStore;

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Name of the per-user data directory.
pub const APP_DIR: &str = "memory-quest";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("stats I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("saved stats are malformed: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("could not encode stats: {0}")]
    Encode(#[source] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// Parse a stored blob into normalized stats.
pub fn decode_stats(bytes: &[u8]) -> Result<PlayerStats> {
    let stats: PlayerStats = serde_json::from_slice(bytes).map_err(StoreError::Decode)?;
    Ok(stats.normalized())
}

pub fn encode_stats(stats: &PlayerStats) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(stats).map_err(StoreError::Encode)
}

/// Per-user data directory, or the current directory when the platform has
/// none.
pub fn app_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// `<data dir>/memory-quest/memoryMatchQuest_stats.json`
pub fn default_stats_path() -> PathBuf {
    app_data_dir().join(format!("{STATS_STORAGE_KEY}.json"))
}
