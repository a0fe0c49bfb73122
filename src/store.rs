//! Per-canvas persistence store
//!
//! Each canvas instance owns one record, keyed by its slot, so a portrait
//! canvas and the main battle canvas can be open at once without clobbering
//! each other. Records hold the lossless data URL of the last committed state.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid store key: {0:?}")]
    InvalidKey(String),
}

/// Which canvas a record belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CanvasSlot {
    /// Full-size fighter submission canvas
    #[default]
    Main,
    /// Account portrait canvas
    Account,
    Custom(String),
}

impl CanvasSlot {
    pub fn key(&self) -> &str {
        match self {
            CanvasSlot::Main => "doodle_main_canvas",
            CanvasSlot::Account => "doodle_account_canvas",
            CanvasSlot::Custom(key) => key,
        }
    }
}

/// Key-value store for canvas records
pub trait CanvasStore: Send + Sync {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Overwrite the record for `key`
    fn save(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removing a missing record is not an error
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store, shareable between canvases
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}

impl CanvasStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.records.read().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.records.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.records.write().remove(key);
        Ok(())
    }
}

/// One file per record under a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the platform data directory
    pub fn in_data_dir() -> Self {
        Self::new(default_store_dir())
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.dataurl", key)))
    }
}

impl CanvasStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.record_path(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.record_path(key)?;
        std::fs::create_dir_all(&self.dir)?;

        // Records are replaced atomically
        let tmp = path.with_extension("tmp");
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)?;
        tracing::debug!("Saved canvas record {:?} ({} bytes)", path, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.record_path(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Get the default store directory path
fn default_store_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("doodle-canvas")
        .join("canvas_store")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_keys_are_distinct() {
        assert_eq!(CanvasSlot::Main.key(), "doodle_main_canvas");
        assert_eq!(CanvasSlot::Account.key(), "doodle_account_canvas");
        assert_eq!(CanvasSlot::Custom("arena_preview".into()).key(), "arena_preview");
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.load("a").unwrap(), None);
        store.save("a", "one").unwrap();
        store.save("b", "two").unwrap();
        store.save("a", "three").unwrap();
        assert_eq!(store.load("a").unwrap().as_deref(), Some("three"));
        assert_eq!(store.len(), 2);
        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert_eq!(store.load("a").unwrap(), None);
        assert_eq!(store.load("b").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.load("doodle_main_canvas").unwrap(), None);
        store.save("doodle_main_canvas", "data:image/png;base64,AAAA").unwrap();
        assert_eq!(
            store.load("doodle_main_canvas").unwrap().as_deref(),
            Some("data:image/png;base64,AAAA")
        );
        store.remove("doodle_main_canvas").unwrap();
        store.remove("doodle_main_canvas").unwrap();
        assert_eq!(store.load("doodle_main_canvas").unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert!(matches!(
            store.save("../escape", "x"),
            Err(StoreError::InvalidKey(_))
        ));
        assert!(store.load("").is_err());
    }
}
