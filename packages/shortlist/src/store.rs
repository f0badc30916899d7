//! Key/value persistence collaborators.
//!
//! The shortlist state talks to storage through the narrow
//! [`KeyValueStore`] contract. [`JsonFileStore`] is the production
//! implementation (one JSON file, rewritten in full on every write);
//! [`MemoryStore`] backs tests and ephemeral sessions.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::paths;

/// Errors raised by a persistence collaborator.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be serialized for storage.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Minimal string key/value contract the shortlist state persists through.
///
/// `get` returns `None` for keys that were never written. A completed `set`
/// must be durable before it returns; there is no separate flush step.
pub trait KeyValueStore {
    /// Reads the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing storage cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// In-memory store that forgets everything when dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// On-disk shape of the state file.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StateFile {
    /// When the last completed write happened.
    saved_at: DateTime<Utc>,
    /// All stored key/value pairs.
    values: BTreeMap<String, String>,
}

/// Write-through store backed by a single JSON file.
///
/// Every `set` rewrites the whole file; the state is a handful of short
/// lists, so a full rewrite stays cheaper than anything incremental. A
/// missing file reads as empty. A corrupt file is logged, read as empty,
/// and replaced by the next write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store at `path`, loading any existing state.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read. A file
    /// that reads fine but does not parse is not an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<StateFile>(&contents) {
                Ok(state) => state.values,
                Err(error) => {
                    warn!(
                        "state file {} is corrupt ({error}); starting empty",
                        path.display()
                    );
                    BTreeMap::new()
                }
            },
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(error) => return Err(error.into()),
        };
        Ok(Self { path, values })
    }

    /// Opens the store at the default path, `data/shortlists.json` under
    /// the project root.
    ///
    /// # Errors
    ///
    /// Returns an error when the file exists but cannot be read.
    pub fn open_default() -> Result<Self, StoreError> {
        Self::open(paths::default_state_path())
    }

    /// The file this store writes to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            paths::ensure_dir(parent)?;
        }
        let state = StateFile {
            saved_at: Utc::now(),
            values: self.values.clone(),
        };
        let contents = serde_json::to_string_pretty(&state)?;
        std::fs::write(&self.path, contents)?;
        debug!("saved {} key(s) to {}", self.values.len(), self.path.display());
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value.to_string());
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("favorites").unwrap(), None);
        store.set("favorites", "[1,2]").unwrap();
        assert_eq!(store.get("favorites").unwrap().as_deref(), Some("[1,2]"));
        store.set("favorites", "[]").unwrap();
        assert_eq!(store.get("favorites").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn json_file_store_survives_reopen() {
        let tmp = std::env::temp_dir().join("estate_map_store_test_reopen");
        let _ = std::fs::remove_dir_all(&tmp);
        let path = tmp.join("state.json");

        {
            let mut store = JsonFileStore::open(&path).unwrap();
            store.set("favorites", "[3,7]").unwrap();
            store.set("hasVisited", "true").unwrap();
        }

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("favorites").unwrap().as_deref(), Some("[3,7]"));
        assert_eq!(store.get("hasVisited").unwrap().as_deref(), Some("true"));

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn json_file_store_stamps_saved_at() {
        let tmp = std::env::temp_dir().join("estate_map_store_test_stamp");
        let _ = std::fs::remove_dir_all(&tmp);
        let path = tmp.join("state.json");

        let mut store = JsonFileStore::open(&path).unwrap();
        store.set("compareList", "[1]").unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let state: StateFile = serde_json::from_str(&contents).unwrap();
        assert_eq!(state.values.get("compareList").map(String::as_str), Some("[1]"));
        assert!(state.saved_at <= Utc::now());

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let tmp = std::env::temp_dir().join("estate_map_store_test_missing");
        let _ = std::fs::remove_dir_all(&tmp);

        let store = JsonFileStore::open(tmp.join("never-written.json")).unwrap();
        assert_eq!(store.get("favorites").unwrap(), None);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn corrupt_file_reads_as_empty_and_heals_on_write() {
        let tmp = std::env::temp_dir().join("estate_map_store_test_corrupt");
        let _ = std::fs::remove_dir_all(&tmp);
        std::fs::create_dir_all(&tmp).unwrap();
        let path = tmp.join("state.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.get("favorites").unwrap(), None);

        store.set("favorites", "[5]").unwrap();
        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.get("favorites").unwrap().as_deref(), Some("[5]"));

        let _ = std::fs::remove_dir_all(&tmp);
    }
}
