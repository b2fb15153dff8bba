//! Lifecycle transitions on an in-memory task collection.
//!
//! Each function applies one transformation to the collection it is given
//! and returns the affected record, or `None` when no task carries `id`.
//! None of them touch storage; `TaskStore` wraps them in load/save.

use chrono::NaiveDate;

use crate::clock::format_date;
use crate::types::{NewTask, Task};

fn find_mut<'a>(tasks: &'a mut [Task], id: &str) -> Option<&'a mut Task> {
    tasks.iter_mut().find(|t| t.id == id)
}

/// Append a new active task with the given id.
pub fn create(tasks: &mut Vec<Task>, input: NewTask, id: String) -> Task {
    let task = Task {
        id,
        title: input.title,
        description: input.description,
        due_date: input.due_date,
        completed: false,
        completed_date: None,
        deleted: false,
    };
    tasks.push(task.clone());
    task
}

/// Mark a task completed. An existing `completed_date` is kept.
pub fn complete(tasks: &mut [Task], id: &str, today: NaiveDate) -> Option<Task> {
    let task = find_mut(tasks, id)?;
    task.completed = true;
    if task.completed_date.is_none() {
        task.completed_date = Some(format_date(today));
    }
    Some(task.clone())
}

/// Move a task to the trash, whatever its completion state.
pub fn trash(tasks: &mut [Task], id: &str) -> Option<Task> {
    let task = find_mut(tasks, id)?;
    task.deleted = true;
    Some(task.clone())
}

/// Take a task out of the trash. `completed` is left as it was.
pub fn restore(tasks: &mut [Task], id: &str) -> Option<Task> {
    let task = find_mut(tasks, id)?;
    task.deleted = false;
    Some(task.clone())
}

/// Remove a task from the collection.
pub fn purge(tasks: &mut Vec<Task>, id: &str) -> Option<Task> {
    let index = tasks.iter().position(|t| t.id == id)?;
    Some(tasks.remove(index))
}

/// Remove every trashed task, returning the removed records in stored order.
pub fn purge_all(tasks: &mut Vec<Task>) -> Vec<Task> {
    let (trashed, kept): (Vec<Task>, Vec<Task>) =
        std::mem::take(tasks).into_iter().partition(Task::is_trashed);
    *tasks = kept;
    trashed
}
