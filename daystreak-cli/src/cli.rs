use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "daystreak")]
#[command(about = "Daily task list with a completion streak")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = concat!(
    "v",
    env!("CARGO_PKG_VERSION"),
    "\nCodeName: ",
    env!("CODENAME")
))]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Disable colors
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Adds a task (to today's weekday unless --day is given)
    Add {
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Weekday the task belongs to, e.g. monday or fri
        #[arg(long, short = 'd', value_name = "DAY")]
        day: Option<String>,
    },

    /// Lists today's tasks, or another day's with --day
    List {
        /// Show tasks of this weekday instead of today
        #[arg(long, short = 'd', value_name = "DAY", conflicts_with = "all")]
        day: Option<String>,
        /// Show tasks of every weekday
        #[arg(long, short = 'a')]
        all: bool,
        /// Show only completed tasks
        #[arg(long, conflicts_with = "open")]
        done: bool,
        /// Show only open tasks
        #[arg(long)]
        open: bool,
        /// Filter tasks containing text (case-insensitive)
        #[arg(long, short = 's', value_name = "TERM")]
        search: Option<String>,
    },

    /// Toggles task completion status
    Check {
        #[arg(value_parser = clap::value_parser!(u64))]
        id: u64,
    },

    /// Removes a task
    Remove {
        #[arg(value_parser = clap::value_parser!(u64))]
        id: u64,
    },

    /// Deletes every task
    Clear {
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Marks all of today's tasks as open again (streak is kept)
    Reset {
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Shows today's date, progress and streak
    Status,
}
