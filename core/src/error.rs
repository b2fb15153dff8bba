//! Error types for the task core.
//!
//! # Design
//! `TaskError` is what lifecycle operations report to the calling view.
//! `NotFound` gets its own variant because views distinguish "that task is
//! gone" from "the input was rejected." Storage failures never reach the
//! view: the persistence adapter logs `StorageError`s and degrades to an
//! empty collection or a skipped write.

use thiserror::Error;

/// Errors returned by lifecycle operations and the pure codec.
#[derive(Debug, Error)]
pub enum TaskError {
    /// A required field is missing or malformed. Nothing was written.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// No task with this id exists in the collection. Nothing was written.
    #[error("task not found: {0}")]
    NotFound(String),

    /// The collection could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The stored value could not be deserialized into a task list.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl TaskError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        TaskError::Validation {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors raised by a `Storage` backend.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be mapped onto the backing medium.
    #[error("invalid storage key `{0}`")]
    InvalidKey(String),

    /// The backend refused the operation (quota, disabled, detached host).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_message_names_the_field() {
        let err = TaskError::validation("title", "must not be empty");
        assert_eq!(err.to_string(), "invalid title: must not be empty");
    }

    #[test]
    fn not_found_message_carries_the_id() {
        let err = TaskError::NotFound("42".to_string());
        assert_eq!(err.to_string(), "task not found: 42");
    }

    #[test]
    fn io_errors_convert_into_storage_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: StorageError = io.into();
        assert!(matches!(err, StorageError::Io(_)));
    }
}
