//! Domain types for the task collection.
//!
//! # Design
//! `Task` is the only entity and has one fixed shape. Its lifecycle bucket is
//! derived from the `completed` / `deleted` flags on every read and never
//! stored, so the two flags cannot disagree with a separate status field.
//! Dates stay as `YYYY-MM-DD` strings because that is the persisted form and
//! fixed-width ISO dates compare correctly as plain strings.
//!
//! The view option enums (`CompletionWindow`, `CompletedSort`, `DueFilter`)
//! parse from and print to the short names the views pass around, so hosts
//! on the other side of the FFI boundary can hand them over as strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TaskError;

/// A single task record as persisted in storage.
///
/// Fields other than `id` and `title` default when absent so that records
/// written by older builds still decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// `YYYY-MM-DD`, or empty for "no due date".
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

impl Task {
    pub fn lifecycle(&self) -> Lifecycle {
        match (self.completed, self.deleted) {
            (_, true) => Lifecycle::Trashed,
            (true, false) => Lifecycle::Completed,
            (false, false) => Lifecycle::Active,
        }
    }

    pub fn is_active(&self) -> bool {
        self.lifecycle() == Lifecycle::Active
    }

    pub fn is_completed(&self) -> bool {
        self.lifecycle() == Lifecycle::Completed
    }

    pub fn is_trashed(&self) -> bool {
        self.deleted
    }
}

/// Input for creating a task. The id and flags are assigned by the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: String,
}

impl NewTask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.due_date = due_date.into();
        self
    }
}

/// Lifecycle bucket computed from a task's flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Completed,
    Trashed,
}

/// Time window applied to the completed-tasks list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletionWindow {
    #[default]
    All,
    /// Completed within the last 7 calendar days, today included.
    LastWeek,
    /// Completed within the last 30 calendar days, today included.
    LastMonth,
}

/// Ordering applied to the completed-tasks list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CompletedSort {
    #[default]
    MostRecent,
    Oldest,
    Alphabetical,
}

/// Due-date filter applied to the active-tasks list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DueFilter {
    #[default]
    All,
    Today,
    Upcoming,
}

/// Due-date urgency of a task relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    None,
    Overdue,
    DueToday,
    DueTomorrow,
    Upcoming,
}

fn invalid_option(field: &'static str, value: &str) -> TaskError {
    TaskError::Validation {
        field,
        reason: format!("unknown value `{value}`"),
    }
}

impl FromStr for CompletionWindow {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "week" => Ok(Self::LastWeek),
            "month" => Ok(Self::LastMonth),
            other => Err(invalid_option("window", other)),
        }
    }
}

impl fmt::Display for CompletionWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::LastWeek => "week",
            Self::LastMonth => "month",
        })
    }
}

impl FromStr for CompletedSort {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recent" => Ok(Self::MostRecent),
            "oldest" => Ok(Self::Oldest),
            "alphabetical" => Ok(Self::Alphabetical),
            other => Err(invalid_option("sort", other)),
        }
    }
}

impl fmt::Display for CompletedSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MostRecent => "recent",
            Self::Oldest => "oldest",
            Self::Alphabetical => "alphabetical",
        })
    }
}

impl FromStr for DueFilter {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "today" => Ok(Self::Today),
            "upcoming" => Ok(Self::Upcoming),
            other => Err(invalid_option("filter", other)),
        }
    }
}

impl fmt::Display for DueFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Upcoming => "upcoming",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(completed: bool, deleted: bool) -> Task {
        Task {
            id: "1".to_string(),
            title: "A".to_string(),
            description: String::new(),
            due_date: String::new(),
            completed,
            completed_date: None,
            deleted,
        }
    }

    #[test]
    fn lifecycle_is_derived_from_flags() {
        assert_eq!(task(false, false).lifecycle(), Lifecycle::Active);
        assert_eq!(task(true, false).lifecycle(), Lifecycle::Completed);
        assert_eq!(task(false, true).lifecycle(), Lifecycle::Trashed);
        assert_eq!(task(true, true).lifecycle(), Lifecycle::Trashed);
    }

    #[test]
    fn task_serializes_with_camel_case_keys() {
        let mut t = task(true, false);
        t.due_date = "2025-01-01".to_string();
        t.completed_date = Some("2025-01-02".to_string());
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["dueDate"], "2025-01-01");
        assert_eq!(json["completedDate"], "2025-01-02");
        assert_eq!(json["completed"], true);
        assert_eq!(json["deleted"], false);
    }

    #[test]
    fn absent_completed_date_is_omitted() {
        let json = serde_json::to_value(task(false, false)).unwrap();
        assert!(json.get("completedDate").is_none());
        assert_eq!(json["description"], "");
        assert_eq!(json["dueDate"], "");
    }

    #[test]
    fn legacy_record_decodes_with_defaults() {
        let t: Task = serde_json::from_str(r#"{"id":"7","title":"Old"}"#).unwrap();
        assert_eq!(t.description, "");
        assert_eq!(t.due_date, "");
        assert!(!t.completed);
        assert!(!t.deleted);
        assert!(t.completed_date.is_none());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let t: Task = serde_json::from_str(
            r#"{"id":"7","title":"Old","completionMessage":true,"completed":false,"deleted":false}"#,
        )
        .unwrap();
        assert_eq!(t.id, "7");
        let json = serde_json::to_value(&t).unwrap();
        assert!(json.get("completionMessage").is_none());
    }

    #[test]
    fn view_options_parse_short_names() {
        assert_eq!("week".parse::<CompletionWindow>().unwrap(), CompletionWindow::LastWeek);
        assert_eq!("alphabetical".parse::<CompletedSort>().unwrap(), CompletedSort::Alphabetical);
        assert_eq!("upcoming".parse::<DueFilter>().unwrap(), DueFilter::Upcoming);
        assert_eq!(CompletionWindow::LastMonth.to_string(), "month");
        assert_eq!(CompletedSort::MostRecent.to_string(), "recent");
        assert_eq!(DueFilter::Today.to_string(), "today");
    }

    #[test]
    fn unknown_view_option_is_rejected() {
        let err = "fortnight".parse::<CompletionWindow>().unwrap_err();
        assert!(matches!(err, TaskError::Validation { field: "window", .. }));
    }

    #[test]
    fn new_task_builder_sets_fields() {
        let input = NewTask::new("Buy milk").description("2 litres").due_date("2025-03-01");
        assert_eq!(input.title, "Buy milk");
        assert_eq!(input.description, "2 litres");
        assert_eq!(input.due_date, "2025-03-01");
    }
}
