use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use memory_quest_core::{PlayerStats, StatsStore};
use memory_quest_types::STATS_STORAGE_KEY;

use crate::{decode_stats, encode_stats, StoreError};

/// In-memory key-value store holding the stats blob as JSON text.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    reject_saves: bool,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `json` already stored under the stats key.
    pub fn with_raw(json: impl Into<String>) -> Self {
        let mut store = Self::new();
        store.entries.insert(STATS_STORAGE_KEY.to_string(), json.into());
        store
    }

    /// Stored JSON text, if any.
    pub fn raw(&self) -> Option<&str> {
        self.entries.get(STATS_STORAGE_KEY).map(String::as_str)
    }

    /// Make every following save fail (the stored blob is left as is).
    pub fn reject_saves(&mut self, reject: bool) {
        self.reject_saves = reject;
    }

    /// Successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl StatsStore for MemoryStore {
    type Error = StoreError;

    fn load(&mut self) -> Result<Option<PlayerStats>, StoreError> {
        self.raw().map(|raw| decode_stats(raw.as_bytes())).transpose()
    }

    fn save(&mut self, stats: &PlayerStats) -> Result<(), StoreError> {
        if self.reject_saves {
            return Err(StoreError::Io {
                path: PathBuf::from(STATS_STORAGE_KEY),
                source: io::Error::other("storage rejected the write"),
            });
        }
        let bytes = encode_stats(stats)?;
        let text = String::from_utf8(bytes).map_err(|e| StoreError::Io {
            path: PathBuf::from(STATS_STORAGE_KEY),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })?;
        self.entries.insert(STATS_STORAGE_KEY.to_string(), text);
        self.saves += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_loads_none() {
        assert!(MemoryStore::new().load().unwrap().is_none());
    }

    #[test]
    fn raw_blob_is_decoded() {
        let mut store = MemoryStore::with_raw(r#"{"totalGamesPlayed":7}"#);
        assert_eq!(store.load().unwrap().unwrap().total_games_played, 7);
    }

    #[test]
    fn rejected_save_keeps_previous_blob() {
        let mut store = MemoryStore::with_raw(r#"{"bestScore":30}"#);
        store.reject_saves(true);
        let newer = PlayerStats {
            best_score: 99,
            ..PlayerStats::default()
        };
        assert!(store.save(&newer).is_err());
        assert_eq!(store.save_count(), 0);
        assert_eq!(store.load().unwrap().unwrap().best_score, 30);
    }

    #[test]
    fn saved_blob_uses_camel_case() {
        let mut store = MemoryStore::new();
        store.save(&PlayerStats::default()).unwrap();
        assert!(store.raw().unwrap().contains("\"bestScore\""));
        assert_eq!(store.save_count(), 1);
    }
}
