//! Daystreak Core - day-tagged tasks and completion streaks
//!
//! This crate contains no filesystem or terminal code. Storage backends
//! plug in through [`persist::KeyValueStore`].

pub mod date;
pub mod day;
pub mod engine;
pub mod error;
pub mod filter;
pub mod persist;
pub mod streak;
pub mod task;

pub use day::Day;
pub use engine::{Clock, DayEngine, DayStats, FixedClock, Rollover, SystemClock, Toggled};
pub use error::{CoreError, Result};
pub use filter::TaskFilter;
pub use persist::{KeyValueStore, MemoryStore, Tracker};
pub use streak::StreakState;
pub use task::{Task, TaskId, TaskStore};
