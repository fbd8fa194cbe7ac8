use std::io::{self, Write};

use clap::Parser;
use log::debug;

use daystreak_core::date::format_date_long;
use daystreak_core::{Clock, Day, KeyValueStore, SystemClock, TaskFilter, TaskId, Tracker};

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::display::{format_rollover, format_summary, format_task, progress_bar, supports_color};
use crate::error::Result;
use crate::logging::init_logging;
use crate::storage::JsonFileStore;

mod cli;
mod config;
mod display;
mod error;
mod logging;
mod storage;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg = Config::load()?;
    let _logger = init_logging(&cfg.log_level, cli.verbose)?;

    let store_path = cfg.store_path();
    debug!("Using store {}", store_path.display());
    let store = JsonFileStore::open(&store_path)?;
    let mut tracker = Tracker::open(store, SystemClock)?;

    let use_color = !cli.no_color && supports_color();

    if let Some(notice) = format_rollover(tracker.rollover()) {
        println!("{}", notice);
    }

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Add { text, day } => {
            let day = match day {
                Some(day) => day.parse::<Day>()?,
                None => Day::of(tracker.today()),
            };
            let task = tracker.add(&text.join(" "), day)?;
            println!("Task added: #{} {} ({})", task.id, task.text, task.day);
        }

        Commands::List {
            day,
            all,
            done,
            open,
            search,
        } => {
            let day = match day {
                Some(day) => Some(day.parse::<Day>()?),
                None if all => None,
                None => Some(Day::of(tracker.today())),
            };
            let mut filter = TaskFilter::new().with_day(day).with_search(search);
            if done {
                filter = filter.completed();
            } else if open {
                filter = filter.open();
            }
            let tasks = tracker.filtered(&filter);

            if tasks.is_empty() {
                println!("No tasks found.");
            } else {
                let show_day = day != Some(Day::of(tracker.today()));
                for task in &tasks {
                    println!("{}", format_task(task, show_day, use_color));
                }
            }

            println!();
            println!("{}", format_summary(&tracker.stats(), use_color));
        }

        Commands::Check { id } => {
            let toggled = tracker.toggle(TaskId(id))?;
            let status = if toggled.task.completed { "done" } else { "open" };
            println!(
                "Marked task #{} as {}: {}",
                toggled.task.id, status, toggled.task.text
            );
            if toggled.credited {
                println!(
                    "All of today's tasks are done! Streak: {}",
                    tracker.current_streak()
                );
            }
        }

        Commands::Remove { id } => {
            let id = TaskId(id);
            match remove_task(&mut tracker, id)? {
                Some(text) => println!("Removed: {}", text),
                None => println!("Task #{} not found, nothing removed.", id),
            }
        }

        Commands::Clear { force } => {
            let count = tracker.engine().tasks().len();
            if count == 0 {
                println!("No tasks to remove.");
                return Ok(());
            }

            if !force && !confirm(&format!("Delete all {} task(s)?", count))? {
                println!("Cancelled.");
                return Ok(());
            }

            let removed = tracker.clear_all()?;
            println!("Removed {} task(s).", removed);
        }

        Commands::Reset { force } => {
            if !force && !confirm("Reset the day? All of today's completions will be cleared.")? {
                println!("Cancelled.");
                return Ok(());
            }

            let reopened = tracker.manual_reset()?;
            println!("Reopened {} task(s) for today.", reopened);
        }

        Commands::Status => {
            let stats = tracker.stats();
            println!("{}", format_date_long(tracker.today()));
            println!("{}", progress_bar(stats.percentage, use_color));
            println!("Tasks:  {} of {}", stats.completed, stats.total);
            println!("Streak: {}", stats.streak);
        }
    }

    Ok(())
}

/// Delete a task, returning its text; a missing id is not an error
fn remove_task<S: KeyValueStore, C: Clock>(
    tracker: &mut Tracker<S, C>,
    id: TaskId,
) -> Result<Option<String>> {
    let Some(text) = tracker.engine().tasks().get(id).map(|t| t.text.clone()) else {
        return Ok(None);
    };
    tracker.delete(id)?;
    Ok(Some(text))
}

/// Ask user for confirmation
fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    Ok(input.trim().eq_ignore_ascii_case("y"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use daystreak_core::date::parse_iso_date;
    use daystreak_core::{FixedClock, MemoryStore};

    #[test]
    fn test_remove_missing_task_is_not_an_error() {
        let monday = parse_iso_date("2024-01-01").unwrap();
        let mut tracker = Tracker::open(MemoryStore::new(), FixedClock(monday)).unwrap();
        let id = tracker.add("Stretch", Day::Monday).unwrap().id;

        assert_eq!(remove_task(&mut tracker, TaskId(99)).unwrap(), None);
        assert_eq!(tracker.engine().tasks().len(), 1);

        assert_eq!(
            remove_task(&mut tracker, id).unwrap().as_deref(),
            Some("Stretch")
        );
        assert!(tracker.engine().tasks().is_empty());
    }
}
