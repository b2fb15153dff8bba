//! Store configuration: which key holds the collection and, for file-backed
//! hosts, which directory holds the keys.

use std::path::PathBuf;

/// Storage key used by every build so far.
pub const DEFAULT_STORAGE_KEY: &str = "tasks";
pub const DEFAULT_DATA_DIR: &str = ".tasks";

pub const STORAGE_KEY_ENV: &str = "TASK_STORE_KEY";
pub const DATA_DIR_ENV: &str = "TASK_STORE_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_key: String,
    pub data_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
        }
    }
}

impl StoreConfig {
    /// Defaults overridden by `TASK_STORE_KEY` / `TASK_STORE_DIR` when set
    /// to a non-empty value.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let set = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            storage_key: set(STORAGE_KEY_ENV).unwrap_or(defaults.storage_key),
            data_dir: set(DATA_DIR_ENV).map(PathBuf::from).unwrap_or(defaults.data_dir),
        }
    }
}
