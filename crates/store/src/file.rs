use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use memory_quest_core::{PlayerStats, StatsStore};

use crate::{decode_stats, encode_stats, StoreError};

/// Stats kept in a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn io_err(&self, path: &Path, source: io::Error) -> StoreError {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl StatsStore for JsonFileStore {
    type Error = StoreError;

    fn load(&mut self) -> Result<Option<PlayerStats>, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.io_err(&self.path, e)),
        };
        decode_stats(&bytes).map(Some)
    }

    fn save(&mut self, stats: &PlayerStats) -> Result<(), StoreError> {
        let bytes = encode_stats(stats)?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| self.io_err(dir, e))?;
        }

        let tmp = self.tmp_path();
        fs::write(&tmp, &bytes).map_err(|e| self.io_err(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            // Best effort; the target file is untouched either way.
            let _ = fs::remove_file(&tmp);
            self.io_err(&self.path, e)
        })?;
        log::debug!("wrote {} bytes to {}", bytes.len(), self.path.display());
        Ok(())
    }
}
