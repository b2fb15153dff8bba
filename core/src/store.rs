//! Read-transform-write wrapper around the lifecycle transitions.
//!
//! # Design
//! `TaskStore` keeps no tasks in memory. Every operation loads the full
//! collection, applies one transition from `lifecycle`, and saves the full
//! collection back: one load and at most one save per call. Operations that
//! find nothing to change (unknown id, empty trash, rejected input) skip the
//! save entirely.
//!
//! Mutating operations take `&mut self`, which serializes them within one
//! process. Two stores over the same storage medium are not coordinated:
//! the last save wins and silently drops the other store's edit. Supporting
//! real concurrent writers would need a version token checked on save.

use chrono::NaiveDate;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::clock::{parse_date, Clock, SystemClock};
use crate::config::StoreConfig;
use crate::error::TaskError;
use crate::lifecycle;
use crate::persistence::TaskRepository;
use crate::query;
use crate::storage::Storage;
use crate::types::{CompletedSort, CompletionWindow, DueFilter, NewTask, Task};

/// Task lifecycle operations and queries over one storage key.
#[derive(Debug, Clone)]
pub struct TaskStore<S, C = SystemClock> {
    repo: TaskRepository<S>,
    clock: C,
}

impl<S: Storage> TaskStore<S> {
    /// A store over the default `tasks` key using the system date.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, &StoreConfig::default())
    }

    pub fn with_config(storage: S, config: &StoreConfig) -> Self {
        Self::with_clock(storage, &config.storage_key, SystemClock)
    }
}

impl<S: Storage, C: Clock> TaskStore<S, C> {
    pub fn with_clock(storage: S, key: &str, clock: C) -> Self {
        Self {
            repo: TaskRepository::new(storage, key),
            clock,
        }
    }

    pub fn repository(&self) -> &TaskRepository<S> {
        &self.repo
    }

    pub fn into_storage(self) -> S {
        self.repo.into_storage()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// The raw stored collection, all lifecycle states included.
    pub fn tasks(&self) -> Vec<Task> {
        self.repo.load_all()
    }

    /// Validate `input` and append it as a new active task.
    #[instrument(skip(self, input))]
    pub fn create(&mut self, input: NewTask) -> Result<Task, TaskError> {
        validate(&input)?;
        let mut tasks = self.repo.load_all();
        let id = fresh_id(&tasks);
        let task = lifecycle::create(&mut tasks, input, id);
        self.repo.save_all(&tasks);
        debug!(id = %task.id, "task created");
        Ok(task)
    }

    #[instrument(skip(self))]
    pub fn complete(&mut self, id: &str) -> Result<Task, TaskError> {
        let today = self.clock.today();
        self.modify(id, |tasks| lifecycle::complete(tasks, id, today))
    }

    #[instrument(skip(self))]
    pub fn trash(&mut self, id: &str) -> Result<Task, TaskError> {
        self.modify(id, |tasks| lifecycle::trash(tasks, id))
    }

    #[instrument(skip(self))]
    pub fn restore(&mut self, id: &str) -> Result<Task, TaskError> {
        self.modify(id, |tasks| lifecycle::restore(tasks, id))
    }

    /// Permanently remove a task. Irreversible.
    #[instrument(skip(self))]
    pub fn purge(&mut self, id: &str) -> Result<Task, TaskError> {
        self.modify(id, |tasks| lifecycle::purge(tasks, id))
    }

    /// Permanently remove every trashed task in a single write.
    /// Returns how many were removed.
    #[instrument(skip(self))]
    pub fn purge_all(&mut self) -> usize {
        let mut tasks = self.repo.load_all();
        let removed = lifecycle::purge_all(&mut tasks);
        if !removed.is_empty() {
            self.repo.save_all(&tasks);
        }
        debug!(removed = removed.len(), "trash emptied");
        removed.len()
    }

    pub fn list_active(&self) -> Vec<Task> {
        query::list_active(&self.repo.load_all())
    }

    pub fn list_by_due_filter(&self, filter: DueFilter) -> Vec<Task> {
        query::list_by_due_filter(&self.repo.load_all(), filter, self.clock.today())
    }

    pub fn list_completed(&self, window: CompletionWindow, sort: CompletedSort) -> Vec<Task> {
        query::list_completed(&self.repo.load_all(), window, sort, self.clock.today())
    }

    pub fn list_trashed(&self) -> Vec<Task> {
        query::list_trashed(&self.repo.load_all())
    }

    fn modify<F>(&mut self, id: &str, op: F) -> Result<Task, TaskError>
    where
        F: FnOnce(&mut Vec<Task>) -> Option<Task>,
    {
        let mut tasks = self.repo.load_all();
        let task = op(&mut tasks).ok_or_else(|| TaskError::NotFound(id.to_string()))?;
        self.repo.save_all(&tasks);
        Ok(task)
    }
}

fn validate(input: &NewTask) -> Result<(), TaskError> {
    if input.title.trim().is_empty() {
        return Err(TaskError::validation("title", "Title is required"));
    }
    if !input.due_date.is_empty()
        && (input.due_date.len() != 10 || parse_date(&input.due_date).is_none())
    {
        return Err(TaskError::validation("dueDate", "expected a YYYY-MM-DD date"));
    }
    Ok(())
}

// UUIDv7 is time-ordered; the loop only guards against a pathological clash.
fn fresh_id(tasks: &[Task]) -> String {
    loop {
        let id = Uuid::now_v7().to_string();
        if tasks.iter().all(|t| t.id != id) {
            return id;
        }
    }
}
