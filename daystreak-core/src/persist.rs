//! Key-value persistence for the engine
//!
//! The engine state is stored under four string keys:
//!
//! | key                 | value                                   |
//! |---------------------|-----------------------------------------|
//! | `tasks`             | JSON array of `{id, text, day, completed}` |
//! | `currentStreak`     | decimal integer                         |
//! | `lastCompletedDate` | `YYYY-MM-DD`, absent when never credited |
//! | `lastActiveDate`    | `YYYY-MM-DD`, absent before the first run |
//!
//! Loading never fails: a key that cannot be read or decoded falls back
//! to its default and a warning is logged.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::{debug, warn};

use crate::date::{format_iso_date, parse_iso_date};
use crate::day::Day;
use crate::engine::{Clock, DayEngine, DayStats, Rollover, SystemClock, Toggled};
use crate::error::{CoreError, Result};
use crate::filter::TaskFilter;
use crate::streak::StreakState;
use crate::task::{Task, TaskId, TaskStore};

pub const TASKS_KEY: &str = "tasks";
pub const CURRENT_STREAK_KEY: &str = "currentStreak";
pub const LAST_COMPLETED_DATE_KEY: &str = "lastCompletedDate";
pub const LAST_ACTIVE_DATE_KEY: &str = "lastActiveDate";

/// String-valued durable storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;

    /// Make every preceding `set`/`remove` durable
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// In-memory store for tests and headless use
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: &str, value: impl Into<String>) -> Self {
        self.entries.insert(key.to_string(), value.into());
        self
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Hydrate an engine, falling back to defaults for anything unreadable
pub fn load(store: &impl KeyValueStore) -> DayEngine {
    let tasks = decode_key(store, TASKS_KEY, decode_tasks).unwrap_or_default();
    let streak = StreakState {
        current_streak: decode_key(store, CURRENT_STREAK_KEY, decode_streak).unwrap_or(0),
        last_completed_date: decode_key(store, LAST_COMPLETED_DATE_KEY, |raw| {
            decode_date(LAST_COMPLETED_DATE_KEY, raw)
        }),
        last_active_date: decode_key(store, LAST_ACTIVE_DATE_KEY, |raw| {
            decode_date(LAST_ACTIVE_DATE_KEY, raw)
        }),
    };

    debug!(
        "Loaded {} task(s), streak {}, last active {:?}",
        tasks.len(),
        streak.current_streak,
        streak.last_active_date
    );
    DayEngine::from_parts(TaskStore::from_tasks(tasks), streak)
}

/// Write the full engine state
pub fn save(store: &mut impl KeyValueStore, engine: &DayEngine) -> Result<()> {
    let streak = engine.streak();

    store.set(TASKS_KEY, &encode_tasks(engine.tasks().all())?)?;
    store.set(CURRENT_STREAK_KEY, &streak.current_streak.to_string())?;
    write_date(store, LAST_COMPLETED_DATE_KEY, streak.last_completed_date)?;
    write_date(store, LAST_ACTIVE_DATE_KEY, streak.last_active_date)?;
    store.flush()
}

fn decode_key<T>(
    store: &impl KeyValueStore,
    key: &str,
    decode: impl FnOnce(&str) -> Result<T>,
) -> Option<T> {
    let raw = match store.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            warn!("Could not read '{}', using default: {}", key, e);
            return None;
        }
    };

    match decode(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Ignoring stored value: {}", e);
            None
        }
    }
}

fn decode_tasks(raw: &str) -> Result<Vec<Task>> {
    serde_json::from_str(raw)
        .map_err(|e| CoreError::corrupt_with_source(TASKS_KEY, "invalid task list", e))
}

fn decode_streak(raw: &str) -> Result<u32> {
    raw.trim().parse().map_err(|e| {
        CoreError::corrupt_with_source(CURRENT_STREAK_KEY, format!("'{}' is not a count", raw), e)
    })
}

fn decode_date(key: &str, raw: &str) -> Result<NaiveDate> {
    parse_iso_date(raw).map_err(|e| CoreError::corrupt_with_source(key, "invalid date", e))
}

fn encode_tasks(tasks: &[Task]) -> Result<String> {
    serde_json::to_string(tasks)
        .map_err(|e| CoreError::storage_with_source("Failed to encode task list", e))
}

fn write_date(store: &mut impl KeyValueStore, key: &str, date: Option<NaiveDate>) -> Result<()> {
    match date {
        Some(date) => store.set(key, &format_iso_date(date)),
        None => store.remove(key),
    }
}

/// Engine bound to a store and a clock
///
/// Opening runs the startup evaluation. Each mutating call is persisted
/// before it returns; calls that change nothing skip the write.
pub struct Tracker<S: KeyValueStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    engine: DayEngine,
    rollover: Rollover,
}

impl<S: KeyValueStore, C: Clock> Tracker<S, C> {
    pub fn open(store: S, clock: C) -> Result<Self> {
        let engine = load(&store);
        let mut tracker = Self {
            store,
            clock,
            engine,
            rollover: Rollover::SameDay,
        };
        tracker.refresh()?;
        Ok(tracker)
    }

    /// Re-run the day evaluation, for callers that stay open across midnight
    pub fn refresh(&mut self) -> Result<Rollover> {
        let today = self.clock.today();
        let rollover = self.engine.start_day(today);
        if rollover.changed_state() {
            self.persist()?;
        }
        self.rollover = rollover;
        Ok(rollover)
    }

    /// Outcome of the last day evaluation
    pub fn rollover(&self) -> Rollover {
        self.rollover
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn engine(&self) -> &DayEngine {
        &self.engine
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn add(&mut self, text: &str, day: Day) -> Result<Task> {
        let task = self.engine.add(text, day)?;
        self.persist()?;
        Ok(task)
    }

    pub fn toggle(&mut self, id: TaskId) -> Result<Toggled> {
        let today = self.clock.today();
        let toggled = self.engine.toggle(id, today)?;
        self.persist()?;
        Ok(toggled)
    }

    pub fn delete(&mut self, id: TaskId) -> Result<bool> {
        let removed = self.engine.delete(id);
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    pub fn clear_all(&mut self) -> Result<usize> {
        let removed = self.engine.clear_all();
        self.persist()?;
        Ok(removed)
    }

    pub fn manual_reset(&mut self) -> Result<usize> {
        let today = self.clock.today();
        let reopened = self.engine.manual_reset(today);
        self.persist()?;
        Ok(reopened)
    }

    pub fn today_tasks(&self) -> Vec<&Task> {
        self.engine.today_tasks(self.clock.today())
    }

    pub fn filtered(&self, filter: &TaskFilter) -> Vec<&Task> {
        self.engine.filtered(filter)
    }

    pub fn completion_percentage(&self) -> u8 {
        self.engine.completion_percentage(self.clock.today())
    }

    pub fn current_streak(&self) -> u32 {
        self.engine.streak().current_streak
    }

    pub fn stats(&self) -> DayStats {
        self.engine.stats(self.clock.today())
    }

    fn persist(&mut self) -> Result<()> {
        save(&mut self.store, &self.engine)
    }
}
