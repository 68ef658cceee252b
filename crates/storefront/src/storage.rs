//! Client-local key/value storage for cart and wishlist state.
//!
//! Each container is stored under a fixed key as a JSON document of the form
//! `{"items": [...]}`. Loading happens once at session start and saving at
//! session end (or after each change); nothing is ambient or global.
//!
//! # Backends
//!
//! - [`FileStorage`] - One `<key>.json` file per key under a data directory
//! - [`MemoryStorage`] - `HashMap` backed, for tests and ephemeral sessions

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors that can occur when reading or writing local storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be serialized.
    #[error("serialization error for {key}: {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Key contains characters that cannot name a file.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// String values addressed by fixed keys.
pub trait LocalStorage {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete the value under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// A container persisted under a fixed storage key.
///
/// Stored data that no longer parses (an older format, a hand edit) is
/// discarded with a warning and the container starts empty.
pub trait Persisted: Serialize + DeserializeOwned + Default {
    const STORAGE_KEY: &'static str;

    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn load(storage: &impl LocalStorage) -> Result<Self, StorageError> {
        let Some(raw) = storage.get(Self::STORAGE_KEY)? else {
            return Ok(Self::default());
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(
                    key = Self::STORAGE_KEY,
                    error = %e,
                    "discarding unreadable stored state"
                );
                Ok(Self::default())
            }
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError` if serialization or the backend write fails.
    fn save(&self, storage: &mut impl LocalStorage) -> Result<(), StorageError> {
        let raw = serde_json::to_string(self).map_err(|source| StorageError::Serialization {
            key: Self::STORAGE_KEY.to_string(),
            source,
        })?;
        storage.set(Self::STORAGE_KEY, raw)
    }
}

/// In-memory storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    values: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.values.remove(key);
        Ok(())
    }
}

/// File-backed storage: `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Use `dir` as the storage root. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(key: &str) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |source| StorageError::Io {
        key: key.to_string(),
        source,
    }
}

impl LocalStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key)(e)),
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(io_error(key))?;

        // Write-then-rename so a crash never leaves a half-written file.
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, value).map_err(io_error(key))?;
        std::fs::rename(&tmp, &path).map_err(io_error(key))?;
        tracing::debug!(key, path = %path.display(), "saved local state");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key)(e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Notes {
        items: Vec<String>,
    }

    impl Persisted for Notes {
        const STORAGE_KEY: &'static str = "notes-storage";
    }

    #[test]
    fn test_load_missing_key_yields_default() {
        let storage = MemoryStorage::new();
        assert_eq!(Notes::load(&storage).unwrap(), Notes::default());
    }

    #[test]
    fn test_save_writes_items_document() {
        let mut storage = MemoryStorage::new();
        let notes = Notes {
            items: vec!["a".to_string()],
        };
        notes.save(&mut storage).unwrap();
        assert_eq!(
            storage.get("notes-storage").unwrap().as_deref(),
            Some(r#"{"items":["a"]}"#)
        );
        assert_eq!(Notes::load(&storage).unwrap(), notes);
    }

    #[test]
    fn test_unreadable_state_degrades_to_default() {
        let mut storage = MemoryStorage::new();
        storage.set("notes-storage", "{not json".to_string()).unwrap();
        assert_eq!(Notes::load(&storage).unwrap(), Notes::default());
    }

    #[test]
    fn test_file_storage_round_trip_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("state"));

        assert_eq!(storage.get("cart-storage").unwrap(), None);
        storage.set("cart-storage", "{}".to_string()).unwrap();
        assert_eq!(storage.get("cart-storage").unwrap().as_deref(), Some("{}"));
        assert!(dir.path().join("state/cart-storage.json").exists());

        storage.remove("cart-storage").unwrap();
        storage.remove("cart-storage").unwrap();
        assert_eq!(storage.get("cart-storage").unwrap(), None);
    }

    #[test]
    fn test_file_storage_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert!(matches!(
            storage.get("../escape"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
