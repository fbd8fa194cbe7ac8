//! Task filtering
//!
//! Provides a builder-style API for narrowing the task list. Results keep
//! insertion order.

use crate::day::Day;
use crate::task::Task;

/// Builder for filtering tasks
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Only tasks tagged with this day
    pub day: Option<Day>,
    /// Filter by completion status (Some(true) = completed, Some(false) = open)
    pub completed: Option<bool>,
    /// Search term for the text (case-insensitive)
    pub search: Option<String>,
}

impl TaskFilter {
    /// Create a filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Only show tasks for the given day
    pub fn on(mut self, day: Day) -> Self {
        self.day = Some(day);
        self
    }

    /// Set day filter
    pub fn with_day(mut self, day: Option<Day>) -> Self {
        self.day = day;
        self
    }

    /// Only show completed tasks
    pub fn completed(mut self) -> Self {
        self.completed = Some(true);
        self
    }

    /// Only show open tasks
    pub fn open(mut self) -> Self {
        self.completed = Some(false);
        self
    }

    /// Set search term
    pub fn with_search(mut self, term: Option<String>) -> Self {
        self.search = term.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn matches(&self, task: &Task) -> bool {
        if let Some(day) = self.day
            && task.day != day
        {
            return false;
        }

        if let Some(completed) = self.completed
            && task.completed != completed
        {
            return false;
        }

        if let Some(term) = &self.search
            && !task.text.to_lowercase().contains(&term.to_lowercase())
        {
            return false;
        }

        true
    }

    pub fn apply<'a>(&self, tasks: impl Iterator<Item = &'a Task>) -> Vec<&'a Task> {
        tasks.filter(|t| self.matches(t)).collect()
    }
}
