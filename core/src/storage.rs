//! Key-value storage backends.
//!
//! # Design
//! `Storage` mirrors the browser `localStorage` surface the task collection
//! was designed against: string keys, string values, whole-value replace.
//! Backends know nothing about tasks; the persistence adapter owns the
//! encoding. Calls are synchronous and non-suspending.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

/// Synchronous string key-value store.
pub trait Storage {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces whatever is stored under `key`.
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }
}

/// In-process storage. Never fails.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-populated with one raw value, e.g. a legacy or corrupt blob.
    pub fn with_item(key: &str, value: &str) -> Self {
        let mut items = HashMap::new();
        items.insert(key.to_string(), value.to_string());
        Self { items }
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Directory-backed storage: key `k` lives in `<dir>/k.json`.
///
/// Writes go to a sibling temporary file that is then renamed over the
/// target, so a crash mid-write leaves the previous value in place.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key != "."
            && key != ".."
            && !key.contains(['/', '\\', '\0']);
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("task-core-storage-{}", uuid::Uuid::now_v7()))
    }

    #[test]
    fn memory_storage_missing_key_is_none() {
        let storage = MemoryStorage::new();
        assert!(storage.get_item("tasks").unwrap().is_none());
    }

    #[test]
    fn memory_storage_set_replaces_value() {
        let mut storage = MemoryStorage::with_item("tasks", "[1]");
        storage.set_item("tasks", "[2]").unwrap();
        assert_eq!(storage.get_item("tasks").unwrap().as_deref(), Some("[2]"));
    }

    #[test]
    fn file_storage_roundtrips_value() {
        let dir = scratch_dir();
        let mut storage = FileStorage::new(&dir);
        assert!(storage.get_item("tasks").unwrap().is_none());

        storage.set_item("tasks", "[]").unwrap();
        assert_eq!(storage.get_item("tasks").unwrap().as_deref(), Some("[]"));
        assert!(dir.join("tasks.json").exists());
        assert!(!dir.join("tasks.json.tmp").exists());

        storage.set_item("tasks", r#"[{"id":"1"}]"#).unwrap();
        assert_eq!(
            storage.get_item("tasks").unwrap().as_deref(),
            Some(r#"[{"id":"1"}]"#)
        );

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn file_storage_rejects_path_like_keys() {
        let mut storage = FileStorage::new(scratch_dir());
        for key in ["", "..", "a/b", "a\\b"] {
            let err = storage.set_item(key, "[]").unwrap_err();
            assert!(matches!(err, StorageError::InvalidKey(_)), "key {key:?}");
        }
    }

    #[test]
    fn boxed_storage_delegates() {
        let mut storage: Box<dyn Storage> = Box::new(MemoryStorage::new());
        storage.set_item("k", "v").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v"));
    }
}
