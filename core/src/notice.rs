//! Transient notifications shown after a lifecycle operation.
//!
//! A view holds one `NoticeSlot`. Showing a notice replaces whatever was
//! pending, and a notice disappears once its deadline passes. The caller
//! supplies `now`, so the slot needs no timer of its own: a view polls
//! `current` on each render tick and drops the slot when it unmounts.

use std::time::{Duration, Instant};

use crate::types::Task;

/// How long a notice stays visible unless superseded.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub kind: NoticeKind,
}

impl Notice {
    pub fn new(kind: NoticeKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn created() -> Self {
        Self::new(NoticeKind::Success, "Task successfully added!")
    }

    pub fn completed(task: &Task) -> Self {
        Self::new(NoticeKind::Success, format!("\"{}\" marked as completed", task.title))
    }

    pub fn trashed(task: &Task) -> Self {
        Self::new(NoticeKind::Warning, format!("\"{}\" moved to trash", task.title))
    }

    pub fn restored(task: &Task) -> Self {
        Self::new(NoticeKind::Success, format!("\"{}\" restored successfully", task.title))
    }

    pub fn purged(task: &Task) -> Self {
        Self::new(NoticeKind::Error, format!("\"{}\" permanently deleted", task.title))
    }

    pub fn purged_all() -> Self {
        Self::new(NoticeKind::Warning, "All items permanently deleted")
    }
}

/// At most one pending notice with a dismissal deadline.
#[derive(Debug, Clone)]
pub struct NoticeSlot {
    ttl: Duration,
    pending: Option<(Notice, Instant)>,
}

impl Default for NoticeSlot {
    fn default() -> Self {
        Self::new(DEFAULT_NOTICE_TTL)
    }
}

impl NoticeSlot {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, pending: None }
    }

    /// Show `notice` from `now`, cancelling any pending one.
    pub fn show(&mut self, notice: Notice, now: Instant) {
        self.pending = Some((notice, now + self.ttl));
    }

    pub fn dismiss(&mut self) {
        self.pending = None;
    }

    /// The visible notice at `now`. Expired notices are cleared.
    pub fn current(&mut self, now: Instant) -> Option<&Notice> {
        if self.pending.as_ref().is_some_and(|(_, deadline)| now >= *deadline) {
            self.pending = None;
        }
        self.pending.as_ref().map(|(notice, _)| notice)
    }
}
