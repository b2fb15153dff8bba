//! Task lifecycle and persistence core for a single-user to-do manager.
//!
//! # Overview
//! A task is active, completed or trashed, derived from its `completed` and
//! `deleted` flags. `TaskStore` moves tasks between those states and answers
//! the list queries behind each view, reading and writing the whole
//! collection through a key-value `Storage` on every call.
//!
//! # Design
//! - `Storage` is the only I/O seam. `MemoryStorage` and `FileStorage` ship
//!   here; hosts with their own medium implement the trait.
//! - `TaskRepository` is a whole-collection JSON codec over one key. It
//!   never fails: unreadable storage loads as an empty list.
//! - `lifecycle` and `query` are pure functions over `Vec<Task>` / `&[Task]`;
//!   `TaskStore` only adds load/save around them.
//! - `Clock` supplies today's date so date stamping and date windows are
//!   deterministic under test.

pub mod clock;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod notice;
pub mod persistence;
pub mod query;
pub mod storage;
pub mod store;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::StoreConfig;
pub use error::{StorageError, TaskError};
pub use notice::{Notice, NoticeKind, NoticeSlot};
pub use persistence::{decode_tasks, encode_tasks, TaskRepository};
pub use query::due_status;
pub use storage::{FileStorage, MemoryStorage, Storage};
pub use store::TaskStore;
pub use types::{
    CompletedSort, CompletionWindow, DueFilter, DueStatus, Lifecycle, NewTask, Task,
};
