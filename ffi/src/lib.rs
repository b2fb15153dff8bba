//! C-ABI wrapper around `task-core`.
//!
//! # Overview
//! Exposes the task lifecycle operations and list queries through
//! `extern "C"` functions so a host UI written in any language with a C FFI
//! can drive the core without knowing Rust types or linking serde.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - One function per core operation, mirroring `TaskStore` 1:1.
//! - A single `FfiTaskResult` envelope with `FfiDataTag` + `void* data`
//!   conveys success payloads and errors uniformly.
//! - Successful lifecycle operations also return the notice a view shows
//!   afterwards (`notice_kind`, `notice_message`). `NoticeSlot` timing stays
//!   with the host, which owns its own render loop.
//! - View options (due filter, completion window, sort) are passed as C
//!   strings using the same short names the core parses; null means default.
//! - The C caller owns all returned pointers and must call the matching
//!   `task_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;
use std::path::PathBuf;
use std::str::FromStr;

use task_core::clock::parse_date;
use task_core::{
    Clock, CompletedSort, CompletionWindow, DueFilter, FileStorage, MemoryStorage, NewTask,
    Notice, StoreConfig, SystemClock, Task, TaskError, TaskStore,
};
use tracing_subscriber::EnvFilter;

use types::*;

/// Environment variable holding the log filter for `task_logging_init`.
pub const LOG_ENV: &str = "TASK_LOG";

// ---------------------------------------------------------------------------
// Argument helpers
// ---------------------------------------------------------------------------

/// Copy a C string into an owned `String`. Returns `None` for null.
fn read_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
}

/// Parse an optional view option; null selects the default.
fn read_option<T>(ptr: *const c_char) -> Result<T, String>
where
    T: FromStr<Err = TaskError> + Default,
{
    match read_str(ptr) {
        None => Ok(T::default()),
        Some(s) => s.parse().map_err(|e: TaskError| e.to_string()),
    }
}

fn open_store(storage: HostStorage, config: &StoreConfig) -> *mut FfiTaskStore {
    let inner = TaskStore::with_config(storage, config);
    tracing::debug!(key = %config.storage_key, "task store opened");
    Box::into_raw(Box::new(FfiTaskStore { inner }))
}

// ---------------------------------------------------------------------------
// Store lifecycle
// ---------------------------------------------------------------------------

/// Open a store persisted under `data_dir`.
///
/// When `data_dir` is null the directory comes from `TASK_STORE_DIR` (or the
/// default `.tasks`). The storage key always comes from `TASK_STORE_KEY` or
/// defaults to `tasks`. Returns null if an internal panic occurs.
/// The caller must free the returned pointer with `task_store_free`.
#[unsafe(no_mangle)]
pub extern "C" fn task_store_open(data_dir: *const c_char) -> *mut FfiTaskStore {
    catch_unwind(|| {
        let mut config = StoreConfig::from_env();
        if let Some(dir) = read_str(data_dir) {
            config.data_dir = PathBuf::from(dir);
        }
        let storage = HostStorage::File(FileStorage::new(config.data_dir.clone()));
        open_store(storage, &config)
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Open a store that lives only as long as the handle.
///
/// The caller must free the returned pointer with `task_store_free`.
#[unsafe(no_mangle)]
pub extern "C" fn task_store_open_in_memory() -> *mut FfiTaskStore {
    catch_unwind(|| open_store(HostStorage::Memory(MemoryStorage::new()), &StoreConfig::default()))
        .unwrap_or(std::ptr::null_mut())
}

/// Free a store created by `task_store_open*`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn task_store_free(store: *mut FfiTaskStore) {
    if !store.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(store) });
        });
    }
}

/// Install a stderr `tracing` subscriber filtered by `TASK_LOG`
/// (default `warn`). Returns false if a subscriber is already installed.
#[unsafe(no_mangle)]
pub extern "C" fn task_logging_init() -> bool {
    catch_unwind(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok()
    })
    .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Lifecycle operations
// ---------------------------------------------------------------------------

/// Create a task.
///
/// `title` is required; a blank title yields `Validation`. `description`
/// and `due_date` may be null (treated as empty). `due_date` must be
/// `YYYY-MM-DD` when present.
/// Returns a result with `data_tag = Task` on success.
#[unsafe(no_mangle)]
pub extern "C" fn task_create(
    store: *mut FfiTaskStore,
    title: *const c_char,
    description: *const c_char,
    due_date: *const c_char,
) -> *mut FfiTaskResult {
    catch_unwind(|| {
        if store.is_null() {
            return FfiTaskResult::null_arg("store");
        }
        let Some(title) = read_str(title) else {
            return FfiTaskResult::null_arg("title");
        };
        let store = unsafe { &mut *store };
        let input = NewTask {
            title,
            description: read_str(description).unwrap_or_default(),
            due_date: read_str(due_date).unwrap_or_default(),
        };
        let today = store.inner.today();
        match store.inner.create(input) {
            Ok(task) => FfiTaskResult::ok_task(task, Notice::created(), today),
            Err(e) => FfiTaskResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiTaskResult::panic("panic in task_create"))
}

type IdOp = fn(&mut HostTaskStore, &str) -> Result<Task, TaskError>;
type NoticeFor = fn(&Task) -> Notice;

/// Shared body of the single-task operations.
fn run_id_op(
    store: *mut FfiTaskStore,
    id: *const c_char,
    op: IdOp,
    notice: NoticeFor,
    name: &'static str,
) -> *mut FfiTaskResult {
    catch_unwind(|| {
        if store.is_null() {
            return FfiTaskResult::null_arg("store");
        }
        let Some(id) = read_str(id) else {
            return FfiTaskResult::null_arg("id");
        };
        let store = unsafe { &mut *store };
        let today = store.inner.today();
        match op(&mut store.inner, &id) {
            Ok(task) => {
                let notice = notice(&task);
                FfiTaskResult::ok_task(task, notice, today)
            }
            Err(e) => FfiTaskResult::from_error(e),
        }
    })
    .unwrap_or_else(|_| FfiTaskResult::panic(&format!("panic in {name}")))
}

/// Mark a task completed. Re-completing keeps the first completion date.
/// Returns `NotFound` if no task has `id`.
#[unsafe(no_mangle)]
pub extern "C" fn task_complete(store: *mut FfiTaskStore, id: *const c_char) -> *mut FfiTaskResult {
    run_id_op(store, id, TaskStore::complete, Notice::completed, "task_complete")
}

/// Move a task to the trash. Returns `NotFound` if no task has `id`.
#[unsafe(no_mangle)]
pub extern "C" fn task_trash(store: *mut FfiTaskStore, id: *const c_char) -> *mut FfiTaskResult {
    run_id_op(store, id, TaskStore::trash, Notice::trashed, "task_trash")
}

/// Take a task out of the trash. Returns `NotFound` if no task has `id`.
#[unsafe(no_mangle)]
pub extern "C" fn task_restore(store: *mut FfiTaskStore, id: *const c_char) -> *mut FfiTaskResult {
    run_id_op(store, id, TaskStore::restore, Notice::restored, "task_restore")
}

/// Permanently delete a task. The removed task is returned.
/// Returns `NotFound` if no task has `id`.
#[unsafe(no_mangle)]
pub extern "C" fn task_purge(store: *mut FfiTaskStore, id: *const c_char) -> *mut FfiTaskResult {
    run_id_op(store, id, TaskStore::purge, Notice::purged, "task_purge")
}

/// Permanently delete every trashed task. `count` holds how many were removed.
#[unsafe(no_mangle)]
pub extern "C" fn task_purge_all(store: *mut FfiTaskStore) -> *mut FfiTaskResult {
    catch_unwind(|| {
        if store.is_null() {
            return FfiTaskResult::null_arg("store");
        }
        let store = unsafe { &mut *store };
        FfiTaskResult::ok_count(store.inner.purge_all(), Notice::purged_all())
    })
    .unwrap_or_else(|_| FfiTaskResult::panic("panic in task_purge_all"))
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// List active tasks narrowed by `filter` (`all`, `today`, `upcoming`;
/// null means `all`). Returns a result with `data_tag = TaskList`.
#[unsafe(no_mangle)]
pub extern "C" fn task_list_active(
    store: *const FfiTaskStore,
    filter: *const c_char,
) -> *mut FfiTaskResult {
    catch_unwind(|| {
        if store.is_null() {
            return FfiTaskResult::null_arg("store");
        }
        let filter: DueFilter = match read_option(filter) {
            Ok(f) => f,
            Err(msg) => return FfiTaskResult::invalid_arg(msg),
        };
        let store = unsafe { &*store };
        FfiTaskResult::ok_task_list(store.inner.list_by_due_filter(filter), store.inner.today())
    })
    .unwrap_or_else(|_| FfiTaskResult::panic("panic in task_list_active"))
}

/// List completed tasks within `window` (`all`, `week`, `month`) ordered by
/// `sort` (`recent`, `oldest`, `alphabetical`). Null selects `all` /
/// `recent`. Returns a result with `data_tag = TaskList`.
#[unsafe(no_mangle)]
pub extern "C" fn task_list_completed(
    store: *const FfiTaskStore,
    window: *const c_char,
    sort: *const c_char,
) -> *mut FfiTaskResult {
    catch_unwind(|| {
        if store.is_null() {
            return FfiTaskResult::null_arg("store");
        }
        let window: CompletionWindow = match read_option(window) {
            Ok(w) => w,
            Err(msg) => return FfiTaskResult::invalid_arg(msg),
        };
        let sort: CompletedSort = match read_option(sort) {
            Ok(s) => s,
            Err(msg) => return FfiTaskResult::invalid_arg(msg),
        };
        let store = unsafe { &*store };
        FfiTaskResult::ok_task_list(store.inner.list_completed(window, sort), store.inner.today())
    })
    .unwrap_or_else(|_| FfiTaskResult::panic("panic in task_list_completed"))
}

/// List trashed tasks. Returns a result with `data_tag = TaskList`.
#[unsafe(no_mangle)]
pub extern "C" fn task_list_trashed(store: *const FfiTaskStore) -> *mut FfiTaskResult {
    catch_unwind(|| {
        if store.is_null() {
            return FfiTaskResult::null_arg("store");
        }
        let store = unsafe { &*store };
        FfiTaskResult::ok_task_list(store.inner.list_trashed(), store.inner.today())
    })
    .unwrap_or_else(|_| FfiTaskResult::panic("panic in task_list_trashed"))
}

/// Classify `due_date` relative to `today` (both `YYYY-MM-DD`).
///
/// A null or empty `due_date` is `None`. A null or unparsable `today` uses
/// the local calendar date.
#[unsafe(no_mangle)]
pub extern "C" fn task_due_status(due_date: *const c_char, today: *const c_char) -> FfiDueStatus {
    catch_unwind(|| {
        let due_date = read_str(due_date).unwrap_or_default();
        let today = read_str(today)
            .and_then(|s| parse_date(&s))
            .unwrap_or_else(|| SystemClock.today());
        task_core::due_status(&due_date, today).into()
    })
    .unwrap_or(FfiDueStatus::None)
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiTaskResult` returned by any store function.
/// Safe to call with null. Uses `data_tag` to determine what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn task_free_result(result: *mut FfiTaskResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        for message in [result.error_message, result.notice_message] {
            if !message.is_null() {
                drop(unsafe { CString::from_raw(message) });
            }
        }
        if !result.data.is_null() {
            match result.data_tag {
                FfiDataTag::Task => {
                    let task = unsafe { Box::from_raw(result.data as *mut FfiTask) };
                    free_ffi_task_fields(&task);
                }
                FfiDataTag::TaskList => {
                    let list = unsafe { Box::from_raw(result.data as *mut FfiTaskList) };
                    if !list.items.is_null() && list.len > 0 {
                        let items: Box<[FfiTask]> = unsafe {
                            Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                                list.items,
                                list.len as usize,
                            ))
                        };
                        for item in items.iter() {
                            free_ffi_task_fields(item);
                        }
                    }
                }
                FfiDataTag::None => {}
            }
        }
    });
}

/// Free the C-string fields of an `FfiTask` (but not the struct itself).
fn free_ffi_task_fields(task: &FfiTask) {
    for field in [
        task.id,
        task.title,
        task.description,
        task.due_date,
        task.completed_date,
    ] {
        if !field.is_null() {
            drop(unsafe { CString::from_raw(field) });
        }
    }
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn task_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { CString::from_raw(s) });
        });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
