//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type but uses C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use chrono::NaiveDate;
use task_core::{
    DueStatus, FileStorage, MemoryStorage, Notice, NoticeKind, Storage, StorageError, Task,
    TaskError, TaskStore,
};

/// Storage backends a host can open a store over.
#[derive(Debug)]
pub enum HostStorage {
    Memory(MemoryStorage),
    File(FileStorage),
}

impl Storage for HostStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self {
            HostStorage::Memory(s) => s.get_item(key),
            HostStorage::File(s) => s.get_item(key),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        match self {
            HostStorage::Memory(s) => s.set_item(key, value),
            HostStorage::File(s) => s.set_item(key, value),
        }
    }
}

pub(crate) type HostTaskStore = TaskStore<HostStorage>;

/// Opaque handle to a `TaskStore`. C callers receive a pointer to this and
/// pass it back into every FFI function.
pub struct FfiTaskStore {
    pub(crate) inner: HostTaskStore,
}

/// Allocate a C string. Interior NUL bytes cannot cross the boundary, so a
/// string containing one is replaced by an empty string.
pub(crate) fn c_string(s: impl Into<Vec<u8>>) -> *mut c_char {
    CString::new(s).unwrap_or_default().into_raw()
}

// ---------------------------------------------------------------------------
// Task types
// ---------------------------------------------------------------------------

/// Due-date urgency as a C enum.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDueStatus {
    None = 0,
    Overdue = 1,
    DueToday = 2,
    DueTomorrow = 3,
    Upcoming = 4,
}

impl From<DueStatus> for FfiDueStatus {
    fn from(s: DueStatus) -> Self {
        match s {
            DueStatus::None => FfiDueStatus::None,
            DueStatus::Overdue => FfiDueStatus::Overdue,
            DueStatus::DueToday => FfiDueStatus::DueToday,
            DueStatus::DueTomorrow => FfiDueStatus::DueTomorrow,
            DueStatus::Upcoming => FfiDueStatus::Upcoming,
        }
    }
}

/// A single task exposed to C.
///
/// `completed_date` is null when the task has no completion date.
/// `due_status` is computed against the store's date when the result was
/// built.
#[repr(C)]
pub struct FfiTask {
    pub id: *mut c_char,
    pub title: *mut c_char,
    pub description: *mut c_char,
    pub due_date: *mut c_char,
    pub completed_date: *mut c_char,
    pub completed: bool,
    pub deleted: bool,
    pub due_status: FfiDueStatus,
}

impl FfiTask {
    fn from_core(task: Task, today: NaiveDate) -> Self {
        let due_status = task_core::due_status(&task.due_date, today).into();
        FfiTask {
            id: c_string(task.id),
            title: c_string(task.title),
            description: c_string(task.description),
            due_date: c_string(task.due_date),
            completed_date: task
                .completed_date
                .map(c_string)
                .unwrap_or(std::ptr::null_mut()),
            completed: task.completed,
            deleted: task.deleted,
            due_status,
        }
    }
}

/// A list of tasks exposed to C.
#[repr(C)]
pub struct FfiTaskList {
    pub items: *mut FfiTask,
    pub len: u32,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error codes returned in `FfiTaskResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Validation = 2,
    InvalidArg = 3,
    Panic = 4,
    NullArg = 5,
    Codec = 6,
}

/// Kind of the notice attached to a successful operation.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiNoticeKind {
    None = 0,
    Success = 1,
    Warning = 2,
    Error = 3,
}

impl From<NoticeKind> for FfiNoticeKind {
    fn from(k: NoticeKind) -> Self {
        match k {
            NoticeKind::Success => FfiNoticeKind::Success,
            NoticeKind::Warning => FfiNoticeKind::Warning,
            NoticeKind::Error => FfiNoticeKind::Error,
        }
    }
}

/// Tag that tells `task_free_result` what `FfiTaskResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Task = 1,
    TaskList = 2,
}

/// Result envelope for every store operation.
///
/// On success `error_code` is `Ok`, `error_message` is null, and `data`
/// points to the payload tagged by `data_tag`. `count` carries the number of
/// removed tasks for `task_purge_all` and the list length for list queries.
/// On failure `error_code` describes the category, `error_message` is a
/// human-readable C string, and `data` is null.
///
/// Lifecycle operations that succeed also carry the notice a view shows
/// afterwards in `notice_kind` / `notice_message`. Queries and failures
/// leave `notice_kind = None` and `notice_message` null. How long to show
/// the notice is up to the host.
#[repr(C)]
pub struct FfiTaskResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub count: u32,
    pub data_tag: FfiDataTag,
    pub data: *mut std::ffi::c_void,
    pub notice_kind: FfiNoticeKind,
    pub notice_message: *mut c_char,
}

impl FfiTaskResult {
    fn boxed(
        error_code: FfiErrorCode,
        error_message: *mut c_char,
        count: u32,
        data_tag: FfiDataTag,
        data: *mut std::ffi::c_void,
    ) -> *mut Self {
        Box::into_raw(Box::new(FfiTaskResult {
            error_code,
            error_message,
            count,
            data_tag,
            data,
            notice_kind: FfiNoticeKind::None,
            notice_message: std::ptr::null_mut(),
        }))
    }

    fn with_notice(result: *mut Self, notice: Notice) -> *mut Self {
        let r = unsafe { &mut *result };
        r.notice_kind = notice.kind.into();
        r.notice_message = c_string(notice.message);
        result
    }

    /// Build a success result carrying a single `FfiTask` and its notice.
    pub(crate) fn ok_task(task: Task, notice: Notice, today: NaiveDate) -> *mut Self {
        let ffi_task = Box::new(FfiTask::from_core(task, today));
        let result = Self::boxed(
            FfiErrorCode::Ok,
            std::ptr::null_mut(),
            1,
            FfiDataTag::Task,
            Box::into_raw(ffi_task) as *mut std::ffi::c_void,
        );
        Self::with_notice(result, notice)
    }

    /// Build a success result carrying an `FfiTaskList`.
    pub(crate) fn ok_task_list(tasks: Vec<Task>, today: NaiveDate) -> *mut Self {
        let len = tasks.len() as u32;
        let ffi_tasks: Box<[FfiTask]> = tasks
            .into_iter()
            .map(|t| FfiTask::from_core(t, today))
            .collect();

        // Freed in `task_free_result` by rebuilding the boxed slice from
        // `items` and `len`.
        let items = if ffi_tasks.is_empty() {
            std::ptr::null_mut()
        } else {
            Box::into_raw(ffi_tasks) as *mut FfiTask
        };

        let ffi_list = Box::new(FfiTaskList { items, len });
        Self::boxed(
            FfiErrorCode::Ok,
            std::ptr::null_mut(),
            len,
            FfiDataTag::TaskList,
            Box::into_raw(ffi_list) as *mut std::ffi::c_void,
        )
    }

    /// Build a success result with only a count and a notice (purge-all).
    pub(crate) fn ok_count(count: usize, notice: Notice) -> *mut Self {
        let result = Self::boxed(
            FfiErrorCode::Ok,
            std::ptr::null_mut(),
            count as u32,
            FfiDataTag::None,
            std::ptr::null_mut(),
        );
        Self::with_notice(result, notice)
    }

    /// Build an error result from a `TaskError`.
    pub(crate) fn from_error(err: TaskError) -> *mut Self {
        let error_code = match &err {
            TaskError::NotFound(_) => FfiErrorCode::NotFound,
            TaskError::Validation { .. } => FfiErrorCode::Validation,
            TaskError::Serialization(_) | TaskError::Deserialization(_) => FfiErrorCode::Codec,
        };
        Self::boxed(
            error_code,
            c_string(err.to_string()),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::NullArg,
            c_string(format!("null argument: {name}")),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Build an error result for an argument that could not be interpreted.
    pub(crate) fn invalid_arg(msg: String) -> *mut Self {
        Self::boxed(
            FfiErrorCode::InvalidArg,
            c_string(msg),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::boxed(
            FfiErrorCode::Panic,
            c_string(msg),
            0,
            FfiDataTag::None,
            std::ptr::null_mut(),
        )
    }
}
