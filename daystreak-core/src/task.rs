//! Task domain model
//!
//! Pure domain logic for the task list with no I/O operations.

use chrono::{DateTime, Local};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::day::Day;
use crate::error::{CoreError, Result};

/// Newtype wrapper for task IDs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl From<u64> for TaskId {
    fn from(id: u64) -> Self {
        TaskId(id)
    }
}

impl From<TaskId> for u64 {
    fn from(id: TaskId) -> Self {
        id.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single task
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub day: Day,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Local>>,
}

impl Task {
    /// Create a new open task
    pub fn new(id: TaskId, text: impl Into<String>, day: Day) -> Self {
        Self {
            id,
            text: text.into(),
            day,
            completed: false,
            created_at: None,
        }
    }

    /// Builder method to set completion status
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Builder method to set creation timestamp
    pub fn with_created_at(mut self, created_at: Option<DateTime<Local>>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Toggle completion status
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }
}

/// Ordered in-memory task list
///
/// Tasks keep their insertion order. Ids come from a counter that only
/// moves forward, so an id is never handed out twice in one session and
/// never collides with a task already loaded from storage.
#[derive(Debug, Clone)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Create a new empty store
    pub fn new() -> Self {
        TaskStore {
            tasks: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild a store from persisted tasks
    ///
    /// Dropped with a warning: blank text, an id with no successor left
    /// for the counter, and an id already seen (the first one is kept).
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(tasks.len());

        for task in tasks {
            if task.text.trim().is_empty() {
                warn!("Dropping task #{} with blank text", task.id);
            } else if task.id.0 == u64::MAX {
                warn!("Dropping task with out-of-range id #{}", task.id);
            } else if seen.insert(task.id) {
                kept.push(task);
            } else {
                warn!("Dropping task with duplicate id #{}", task.id);
            }
        }

        let next_id = kept.iter().map(|t| t.id.0 + 1).max().unwrap_or(1);
        TaskStore {
            tasks: kept,
            next_id,
        }
    }

    /// Add a new task for the given day
    ///
    /// The text is trimmed; blank text is rejected and the store is left as is.
    pub fn add(&mut self, text: &str, day: Day) -> Result<&Task> {
        let text = text.trim();
        if text.is_empty() {
            return Err(CoreError::validation("text", "Task text cannot be empty"));
        }

        let id = TaskId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .ok_or_else(|| CoreError::validation("id", "No task ids left"))?;

        let task = Task::new(id, text, day).with_created_at(Some(Local::now()));
        debug!("Added task #{} for {}", id, day);
        self.tasks.push(task);

        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Flip the completion flag of a task
    pub fn toggle(&mut self, id: TaskId) -> Result<&Task> {
        let task = self.get_mut_or_err(id)?;
        task.toggle();
        debug!("Task #{} completed = {}", id, task.completed);
        Ok(task)
    }

    /// Remove a task, returns whether one was removed
    pub fn delete(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Remove every task, returns how many were removed
    pub fn clear_all(&mut self) -> usize {
        let count = self.tasks.len();
        self.tasks.clear();
        count
    }

    /// All tasks in insertion order
    pub fn all(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks tagged with `day`, in insertion order
    pub fn for_day(&self, day: Day) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.day == day)
    }

    /// Mark every task of `day` as open, returns how many changed
    pub fn reset_day(&mut self, day: Day) -> usize {
        let mut changed = 0;
        for task in self.tasks.iter_mut().filter(|t| t.day == day) {
            if task.completed {
                task.completed = false;
                changed += 1;
            }
        }
        changed
    }

    /// Non-empty and every task completed
    pub fn is_day_complete(&self, day: Day) -> bool {
        let mut tasks = self.for_day(day).peekable();
        tasks.peek().is_some() && tasks.all(|t| t.completed)
    }

    /// Get a task by ID
    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut_or_err(&mut self, id: TaskId) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(CoreError::TaskNotFound(id))
    }

    /// Count total tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Check if store is empty
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
