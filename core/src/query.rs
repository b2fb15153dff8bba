//! Read-only views over a task collection.
//!
//! These back the three list screens (active, completed, trash) and the
//! due-date badge. They take a snapshot slice and return owned copies, so a
//! view can patch its copy locally without touching storage.

use std::cmp::Ordering;

use chrono::{Days, NaiveDate};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::clock::{format_date, parse_date};
use crate::types::{CompletedSort, CompletionWindow, DueFilter, DueStatus, Task};

/// Tasks that are neither completed nor trashed, in stored order.
pub fn list_active(tasks: &[Task]) -> Vec<Task> {
    tasks.iter().filter(|t| t.is_active()).cloned().collect()
}

/// Trashed tasks, completed or not, in stored order.
pub fn list_trashed(tasks: &[Task]) -> Vec<Task> {
    tasks.iter().filter(|t| t.is_trashed()).cloned().collect()
}

/// Active tasks narrowed by due date.
///
/// `Today` matches `due_date == today`; `Upcoming` matches
/// `due_date > today` as strings, which is exact for `YYYY-MM-DD` and never
/// matches an empty due date.
pub fn list_by_due_filter(tasks: &[Task], filter: DueFilter, today: NaiveDate) -> Vec<Task> {
    let today = format_date(today);
    tasks
        .iter()
        .filter(|t| t.is_active())
        .filter(|t| match filter {
            DueFilter::All => true,
            DueFilter::Today => t.due_date == today,
            DueFilter::Upcoming => t.due_date.as_str() > today.as_str(),
        })
        .cloned()
        .collect()
}

/// Completed, non-trashed tasks within `window`, ordered by `sort`.
///
/// Every returned copy carries its effective completed date (see
/// [`effective_completed_date`]); storage is not modified.
pub fn list_completed(
    tasks: &[Task],
    window: CompletionWindow,
    sort: CompletedSort,
    today: NaiveDate,
) -> Vec<Task> {
    let mut completed: Vec<Task> = tasks
        .iter()
        .filter(|t| t.is_completed())
        .map(|t| {
            let mut t = t.clone();
            t.completed_date = Some(effective_completed_date(&t, today));
            t
        })
        .collect();

    if let Some(from) = window_start(window, today) {
        completed.retain(|t| {
            completed_on(t).is_some_and(|d| from <= d && d <= today)
        });
    }

    match sort {
        CompletedSort::MostRecent => completed.sort_by(|a, b| completed_on(b).cmp(&completed_on(a))),
        CompletedSort::Oldest => completed.sort_by_key(completed_on),
        CompletedSort::Alphabetical => completed.sort_by(|a, b| compare_titles(&a.title, &b.title)),
    }
    completed
}

/// Date a completed task is shown as completed on.
///
/// Records completed before the date was tracked fall back to their due
/// date, then to today.
pub fn effective_completed_date(task: &Task, today: NaiveDate) -> String {
    match &task.completed_date {
        Some(date) if !date.is_empty() => date.clone(),
        _ if !task.due_date.is_empty() => task.due_date.clone(),
        _ => format_date(today),
    }
}

/// Classify a due date relative to today. An empty due date is `None`.
pub fn due_status(due_date: &str, today: NaiveDate) -> DueStatus {
    if due_date.is_empty() {
        return DueStatus::None;
    }
    let today_str = format_date(today);
    let tomorrow = today.succ_opt().map(format_date);
    if due_date < today_str.as_str() {
        DueStatus::Overdue
    } else if due_date == today_str {
        DueStatus::DueToday
    } else if tomorrow.as_deref() == Some(due_date) {
        DueStatus::DueTomorrow
    } else {
        DueStatus::Upcoming
    }
}

/// Title ordering for the alphabetical sort, following root-locale
/// collation levels: base letters first (accents and case ignored), then
/// accents, then case with lowercase first. The exact string breaks any
/// remaining tie so the order is total.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| accented_letters(a).cmp(&accented_letters(b)))
        .then_with(|| case_pattern(a).cmp(case_pattern(b)))
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn accented_letters(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn case_pattern(s: &str) -> impl Iterator<Item = bool> + '_ {
    s.chars().map(char::is_uppercase)
}

fn window_start(window: CompletionWindow, today: NaiveDate) -> Option<NaiveDate> {
    let days = match window {
        CompletionWindow::All => return None,
        CompletionWindow::LastWeek => 7,
        CompletionWindow::LastMonth => 30,
    };
    Some(today.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN))
}

// Unparsable dates are `None`, which orders before every real date.
fn completed_on(task: &Task) -> Option<NaiveDate> {
    task.completed_date.as_deref().and_then(parse_date)
}
