//! Whole-collection persistence for the task list.
//!
//! # Design
//! `TaskRepository` is the only component that talks to a `Storage`. It
//! reads and writes the entire collection as one JSON array under one key;
//! there is no partial update and no merge. It holds no copy of the tasks
//! between calls, so every `load_all` reflects what storage holds right now.
//!
//! Failures are absorbed here: a missing, unreadable or corrupt value loads
//! as an empty collection and a failed write is logged and dropped. The
//! codec itself is exposed as `decode_tasks` / `encode_tasks` for hosts that
//! perform their own storage I/O.

use tracing::{debug, error, warn};

use crate::error::TaskError;
use crate::storage::Storage;
use crate::types::Task;

/// Decode a stored value into a task list.
///
/// `None` and blank strings decode to an empty list.
pub fn decode_tasks(raw: Option<&str>) -> Result<Vec<Task>, TaskError> {
    match raw {
        None => Ok(Vec::new()),
        Some(s) if s.trim().is_empty() => Ok(Vec::new()),
        Some(s) => serde_json::from_str(s).map_err(|e| TaskError::Deserialization(e.to_string())),
    }
}

/// Encode a task list into the stored JSON array form.
pub fn encode_tasks(tasks: &[Task]) -> Result<String, TaskError> {
    serde_json::to_string(tasks).map_err(|e| TaskError::Serialization(e.to_string()))
}

/// Load/save boundary between the task collection and a storage key.
#[derive(Debug, Clone)]
pub struct TaskRepository<S> {
    storage: S,
    key: String,
}

impl<S: Storage> TaskRepository<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Read the stored collection. Never fails; degrades to an empty list.
    pub fn load_all(&self) -> Vec<Task> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %self.key, error = %e, "storage read failed, starting empty");
                return Vec::new();
            }
        };
        match decode_tasks(raw.as_deref()) {
            Ok(tasks) => tasks,
            Err(e) => {
                warn!(key = %self.key, error = %e, "stored tasks unreadable, starting empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the stored collection with `tasks`.
    pub fn save_all(&mut self, tasks: &[Task]) {
        let encoded = match encode_tasks(tasks) {
            Ok(encoded) => encoded,
            Err(e) => {
                error!(key = %self.key, error = %e, "could not encode tasks, write skipped");
                return;
            }
        };
        match self.storage.set_item(&self.key, &encoded) {
            Ok(()) => debug!(key = %self.key, count = tasks.len(), "tasks saved"),
            Err(e) => error!(key = %self.key, error = %e, "storage write failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryStorage;

    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn get_item(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn set_item(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }
    }

    fn sample() -> Task {
        Task {
            id: "1".to_string(),
            title: "A".to_string(),
            description: String::new(),
            due_date: "2025-01-01".to_string(),
            completed: false,
            completed_date: None,
            deleted: false,
        }
    }

    #[test]
    fn decode_none_and_blank_are_empty() {
        assert!(decode_tasks(None).unwrap().is_empty());
        assert!(decode_tasks(Some("")).unwrap().is_empty());
        assert!(decode_tasks(Some("  \n")).unwrap().is_empty());
    }

    #[test]
    fn decode_bad_json_is_error() {
        let err = decode_tasks(Some("not json")).unwrap_err();
        assert!(matches!(err, TaskError::Deserialization(_)));
    }

    #[test]
    fn encode_produces_json_array() {
        let encoded = encode_tasks(&[sample()]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value[0]["id"], "1");
        assert_eq!(value[0]["dueDate"], "2025-01-01");
    }

    #[test]
    fn load_all_on_empty_storage_is_empty() {
        let repo = TaskRepository::new(MemoryStorage::new(), "tasks");
        assert!(repo.load_all().is_empty());
    }

    #[test]
    fn load_all_on_corrupt_value_is_empty() {
        let repo = TaskRepository::new(MemoryStorage::with_item("tasks", "{oops"), "tasks");
        assert!(repo.load_all().is_empty());
    }

    #[test]
    fn load_all_on_non_array_value_is_empty() {
        let repo = TaskRepository::new(MemoryStorage::with_item("tasks", "null"), "tasks");
        assert!(repo.load_all().is_empty());
    }

    #[test]
    fn save_then_load_returns_same_collection() {
        let mut repo = TaskRepository::new(MemoryStorage::new(), "tasks");
        repo.save_all(&[sample()]);
        assert_eq!(repo.load_all(), vec![sample()]);
    }

    #[test]
    fn save_all_overwrites_previous_value() {
        let mut repo = TaskRepository::new(MemoryStorage::new(), "tasks");
        repo.save_all(&[sample()]);
        repo.save_all(&[]);
        assert!(repo.load_all().is_empty());
        assert_eq!(repo.storage().get_item("tasks").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn unavailable_storage_degrades_silently() {
        let mut repo = TaskRepository::new(BrokenStorage, "tasks");
        repo.save_all(&[sample()]);
        assert!(repo.load_all().is_empty());
    }

    #[test]
    fn key_is_isolated() {
        let mut repo = TaskRepository::new(MemoryStorage::with_item("other", "[]"), "tasks");
        repo.save_all(&[sample()]);
        assert_eq!(repo.storage().get_item("other").unwrap().as_deref(), Some("[]"));
    }
}
