//! Command-line definition

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use super::add::AddArgs;
use super::calendar::CalendarCommands;
use super::open::OpenArgs;
use super::task::{DetailArgs, PositionArgs};
use super::today::TodayArgs;

#[derive(Parser)]
#[command(name = "tasklog")]
#[command(about = "Daily task log with business-day carry-forward")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Date to work on (YYYY-MM-DD, defaults to today)
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,

    /// Task file to use instead of the configured one
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,
}

impl GlobalArgs {
    pub fn date_or_today(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add a task to the day
    Add(AddArgs),

    /// Write notes on a task (moves it to doing)
    Detail(DetailArgs),

    /// Mark a task as done
    Done(PositionArgs),

    /// Carry a task to the next business day
    Carry(PositionArgs),

    /// Show yesterday's finished tasks and today's open ones
    Today(TodayArgs),

    /// Run carry-forward and write the task file
    Save,

    /// Print the task file as it would be saved
    Export,

    /// Open a task file and make it the default
    Open(OpenArgs),

    /// Query the business-day calendar
    Calendar {
        #[command(subcommand)]
        command: CalendarCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
