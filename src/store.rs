use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Where the best score survives between runs.
pub trait HighScoreStore {
    /// The stored record, 0 when there is none.
    fn load(&mut self) -> u32;
    fn save(&mut self, score: u32);
}

impl<S: HighScoreStore + ?Sized> HighScoreStore for Box<S> {
    fn load(&mut self) -> u32 {
        (**self).load()
    }

    fn save(&mut self, score: u32) {
        (**self).save(score)
    }
}

/// Keeps the record in memory and counts writes.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub high_score: u32,
    pub loads: usize,
    pub saves: usize,
}

impl MemoryStore {
    pub fn with_high_score(high_score: u32) -> Self {
        Self {
            high_score,
            ..Self::default()
        }
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> u32 {
        self.loads += 1;
        self.high_score
    }

    fn save(&mut self, score: u32) {
        self.saves += 1;
        self.high_score = score;
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Record {
    high_score: u32,
}

/// A small JSON file holding the record.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    const FILE_NAME: &'static str = "high_score.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The per-user data directory, if the platform has one.
    pub fn default_location() -> Option<Self> {
        let dirs = ProjectDirs::from("dev", "snekfolio", "snekfolio")?;
        Some(Self::new(dirs.data_local_dir().join(Self::FILE_NAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the record. A missing file is a record of 0.
    pub fn read(&self) -> Result<u32, StoreError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let record: Record = serde_json::from_str(&text).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(record.high_score)
    }

    pub fn write(&self, high_score: u32) -> Result<(), StoreError> {
        let io_err = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(&Record { high_score }).map_err(|source| {
            StoreError::Parse {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, text).map_err(io_err)
    }
}

impl HighScoreStore for FileStore {
    fn load(&mut self) -> u32 {
        self.read().unwrap_or_else(|err| {
            warn!("ignoring stored high score: {err}");
            0
        })
    }

    fn save(&mut self, score: u32) {
        if let Err(err) = self.write(score) {
            warn!("high score not saved: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("snekfolio-{}-{name}", std::process::id()))
            .join(FileStore::FILE_NAME)
    }

    #[test]
    fn missing_file_is_zero() {
        let mut store = FileStore::new(scratch("missing"));
        assert_eq!(store.read().unwrap(), 0);
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn saved_score_is_loaded_back() {
        let path = scratch("roundtrip");
        let mut store = FileStore::new(&path);
        store.save(17);
        assert_eq!(FileStore::new(&path).load(), 17);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn garbage_is_reported_and_treated_as_zero() {
        let path = scratch("garbage");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();
        let mut store = FileStore::new(&path);
        assert!(matches!(store.read(), Err(StoreError::Parse { .. })));
        assert_eq!(store.load(), 0);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn memory_store_counts_calls() {
        let mut store = MemoryStore::with_high_score(4);
        assert_eq!(store.load(), 4);
        store.save(9);
        assert_eq!((store.high_score, store.loads, store.saves), (9, 1, 1));
    }
}
