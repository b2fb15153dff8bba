//! Verify queries and the persistence codec against JSON test vectors stored
//! in `test-vectors/`.
//!
//! Each vector file lists named cases with inputs and expected outputs, so
//! other front ends reimplementing the views can check themselves against the
//! same data.

use chrono::NaiveDate;
use task_core::query::{due_status, list_completed};
use task_core::{
    CompletedSort, CompletionWindow, DueStatus, MemoryStorage, Task, TaskRepository,
};

fn parse_day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Parse the status string from test vectors into `DueStatus`.
fn parse_status(s: &str) -> DueStatus {
    match s {
        "none" => DueStatus::None,
        "overdue" => DueStatus::Overdue,
        "due_today" => DueStatus::DueToday,
        "due_tomorrow" => DueStatus::DueTomorrow,
        "upcoming" => DueStatus::Upcoming,
        other => panic!("unknown due status: {other}"),
    }
}

fn expected_ids(case: &serde_json::Value) -> Vec<String> {
    case["expected_ids"]
        .as_array()
        .unwrap()
        .iter()
        .map(|id| id.as_str().unwrap().to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Due status
// ---------------------------------------------------------------------------

#[test]
fn due_status_test_vectors() {
    let raw = include_str!("../../test-vectors/due_status.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let today = parse_day(case["today"].as_str().unwrap());
        let due_date = case["due_date"].as_str().unwrap();
        let expected = parse_status(case["expected"].as_str().unwrap());

        assert_eq!(due_status(due_date, today), expected, "{name}");
    }
}

// ---------------------------------------------------------------------------
// Completed list
// ---------------------------------------------------------------------------

#[test]
fn completed_list_test_vectors() {
    let raw = include_str!("../../test-vectors/completed_list.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let today = parse_day(vectors["today"].as_str().unwrap());
    let tasks: Vec<Task> = serde_json::from_value(vectors["tasks"].clone()).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let window: CompletionWindow = case["window"].as_str().unwrap().parse().unwrap();
        let sort: CompletedSort = case["sort"].as_str().unwrap().parse().unwrap();

        let listed = list_completed(&tasks, window, sort, today);
        let ids: Vec<String> = listed.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids, expected_ids(case), "{name}");
        assert!(listed.iter().all(|t| t.completed_date.is_some()), "{name}: dates filled");
    }
}

// ---------------------------------------------------------------------------
// Stored collections
// ---------------------------------------------------------------------------

#[test]
fn stored_collection_test_vectors() {
    let raw = include_str!("../../test-vectors/stored_collections.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let storage = match case["stored"].as_str() {
            Some(stored) => MemoryStorage::with_item("tasks", stored),
            None => MemoryStorage::new(),
        };

        let repo = TaskRepository::new(storage, "tasks");
        let ids: Vec<String> = repo.load_all().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, expected_ids(case), "{name}");
    }
}
