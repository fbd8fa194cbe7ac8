//! Day/streak engine
//!
//! Owns the task store and streak state and applies the day rules:
//! which tasks belong to today, when a new day rolls over, and when a
//! day is credited to the streak. Every operation that depends on the
//! date takes `today` as an argument; [`Clock`] supplies it at the edge.

use chrono::{Local, NaiveDate};
use log::{debug, info, warn};

use crate::day::Day;
use crate::error::Result;
use crate::filter::TaskFilter;
use crate::streak::StreakState;
use crate::task::{Task, TaskId, TaskStore};

/// Source of the current calendar date
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local-timezone wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to one date
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Outcome of the startup evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rollover {
    FirstRun,
    SameDay,
    Credited { streak: u32 },
    AlreadyCredited,
    /// The last active day ended with open tasks, or had none
    Broken,
    /// The date moved backwards since the last run
    ClockSkew,
}

impl Rollover {
    /// Whether the evaluation changed any state
    pub fn changed_state(&self) -> bool {
        !matches!(self, Rollover::SameDay)
    }
}

/// Result of toggling a task
#[derive(Debug, Clone, PartialEq)]
pub struct Toggled {
    pub task: Task,
    /// Toggling finished today's list and extended the streak
    pub credited: bool,
}

/// Snapshot of today's progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayStats {
    pub day: Day,
    pub total: usize,
    pub completed: usize,
    pub percentage: u8,
    pub streak: u32,
}

#[derive(Debug, Clone, Default)]
pub struct DayEngine {
    tasks: TaskStore,
    streak: StreakState,
}

impl DayEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(tasks: TaskStore, streak: StreakState) -> Self {
        Self { tasks, streak }
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn streak(&self) -> &StreakState {
        &self.streak
    }

    /// Evaluate a possible day change; run once per process start
    pub fn start_day(&mut self, today: NaiveDate) -> Rollover {
        let Some(last_active) = self.streak.last_active_date else {
            info!("First run, starting on {}", today);
            self.streak.last_active_date = Some(today);
            return Rollover::FirstRun;
        };

        if last_active == today {
            debug!("Still {}, no rollover", today);
            return Rollover::SameDay;
        }

        if today < last_active {
            warn!(
                "Date moved backwards from {} to {}, skipping rollover",
                last_active, today
            );
            self.streak.last_active_date = Some(today);
            return Rollover::ClockSkew;
        }

        // Only the last active day is judged, whatever the gap
        let outcome = if self.tasks.is_day_complete(Day::of(last_active)) {
            if self.streak.credit(last_active) {
                Rollover::Credited {
                    streak: self.streak.current_streak,
                }
            } else {
                Rollover::AlreadyCredited
            }
        } else {
            self.streak.break_streak();
            Rollover::Broken
        };

        let today_name = Day::of(today);
        let reopened = self.tasks.reset_day(today_name);
        self.streak.last_active_date = Some(today);

        info!(
            "Rolled over from {} to {}: {:?}, streak {}, reopened {} {} task(s)",
            last_active, today, outcome, self.streak.current_streak, reopened, today_name
        );
        outcome
    }

    pub fn add(&mut self, text: &str, day: Day) -> Result<Task> {
        self.tasks.add(text, day).cloned()
    }

    /// Toggle a task, then credit today if that finished today's list
    pub fn toggle(&mut self, id: TaskId, today: NaiveDate) -> Result<Toggled> {
        let task = self.tasks.toggle(id)?.clone();
        let credited = self.check_completion(today);
        Ok(Toggled { task, credited })
    }

    /// Credit `today` if all of today's tasks are done and it isn't credited yet
    pub fn check_completion(&mut self, today: NaiveDate) -> bool {
        if !self.tasks.is_day_complete(Day::of(today)) {
            return false;
        }
        let credited = self.streak.credit(today);
        if credited {
            info!(
                "All tasks done for {}, streak now {}",
                today, self.streak.current_streak
            );
        }
        credited
    }

    pub fn delete(&mut self, id: TaskId) -> bool {
        self.tasks.delete(id)
    }

    pub fn clear_all(&mut self) -> usize {
        self.tasks.clear_all()
    }

    /// Reopen today's tasks; the streak is left alone
    pub fn manual_reset(&mut self, today: NaiveDate) -> usize {
        self.tasks.reset_day(Day::of(today))
    }

    pub fn today_tasks(&self, today: NaiveDate) -> Vec<&Task> {
        self.tasks.for_day(Day::of(today)).collect()
    }

    pub fn filtered(&self, filter: &TaskFilter) -> Vec<&Task> {
        filter.apply(self.tasks.all().iter())
    }

    pub fn completion_percentage(&self, today: NaiveDate) -> u8 {
        self.stats(today).percentage
    }

    pub fn stats(&self, today: NaiveDate) -> DayStats {
        let day = Day::of(today);
        let (total, completed) = self
            .tasks
            .for_day(day)
            .fold((0, 0), |(total, done), t| (total + 1, done + usize::from(t.completed)));

        DayStats {
            day,
            total,
            completed,
            percentage: percentage(completed, total),
            streak: self.streak.current_streak,
        }
    }
}

/// Rounded share of completed tasks, halves round up; 0 for no tasks
fn percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    ((200 * completed + total) / (2 * total)) as u8
}
