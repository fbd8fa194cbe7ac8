//! Terminal rendering
//!
//! Handles colored output for tasks, the daily summary and rollover notices

use colored::*;

use daystreak_core::{DayStats, Rollover, Task};

const BAR_WIDTH: usize = 20;

/// Check if terminal supports colors
pub fn supports_color() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// Format a task line; the weekday is shown when listing beyond today
pub fn format_task(task: &Task, show_day: bool, use_color: bool) -> String {
    let checkbox = if task.completed { "[✓]" } else { "[ ]" };

    let id_str = if use_color {
        format!("[{}]", task.id).cyan().to_string()
    } else {
        format!("[{}]", task.id)
    };

    let text = if use_color && task.completed {
        task.text.green().strikethrough().to_string()
    } else {
        task.text.clone()
    };

    if show_day {
        let day = format!("({})", task.day);
        let day = if use_color {
            day.dimmed().to_string()
        } else {
            day
        };
        format!("{} {} {} {}", checkbox, id_str, text, day)
    } else {
        format!("{} {} {}", checkbox, id_str, text)
    }
}

/// Text progress bar, e.g. `[##########----------] 50%`
pub fn progress_bar(percentage: u8, use_color: bool) -> String {
    let percentage = usize::from(percentage.min(100));
    let filled = (percentage * BAR_WIDTH + 50) / 100;
    let bar = format!("{}{}", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled));

    let bar = if !use_color {
        bar
    } else if percentage == 100 {
        bar.green().to_string()
    } else if percentage >= 50 {
        bar.yellow().to_string()
    } else {
        bar.normal().to_string()
    };

    format!("[{}] {}%", bar, percentage)
}

/// Summary line, e.g. `[2 of 3 done | 67% | streak 4]`
pub fn format_summary(stats: &DayStats, use_color: bool) -> String {
    let done = format!("{} of {} done", stats.completed, stats.total);
    let streak = format!("streak {}", stats.streak);

    let (done, streak) = if use_color {
        (done.green().to_string(), streak.yellow().bold().to_string())
    } else {
        (done, streak)
    };

    format!("[{} | {}% | {}]", done, stats.percentage, streak)
}

/// One-line notice for a rollover worth telling the user about
pub fn format_rollover(rollover: Rollover) -> Option<String> {
    match rollover {
        Rollover::FirstRun | Rollover::SameDay | Rollover::AlreadyCredited => None,
        Rollover::Credited { streak } => Some(format!(
            "New day! Your last list was finished, streak is now {}.",
            streak
        )),
        Rollover::Broken => {
            Some("New day. The last list wasn't finished, streak reset to 0.".to_string())
        }
        Rollover::ClockSkew => {
            Some("The system date moved backwards; today's list was left as is.".to_string())
        }
    }
}
