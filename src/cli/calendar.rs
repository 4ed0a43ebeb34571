//! `tasklog calendar` subcommands

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};

use super::GlobalArgs;
use crate::app::{self, Config};
use crate::calendar::CalendarResolver;

#[derive(Subcommand)]
pub enum CalendarCommands {
    /// Show the next business day
    Next(DateArg),

    /// Show the previous business day
    Prev(DateArg),

    /// Check whether a date is a business day
    Check(DateArg),
}

#[derive(Args)]
pub struct DateArg {
    /// Date to start from (defaults to --date or today)
    pub date: Option<NaiveDate>,
}

pub async fn run(global: &GlobalArgs, command: CalendarCommands) -> Result<()> {
    let config = Config::load()?;
    let calendar = app::load_calendar(&config)?;
    println!("{}", answer(&calendar, global, &command));
    Ok(())
}

fn answer(calendar: &CalendarResolver, global: &GlobalArgs, command: &CalendarCommands) -> String {
    let (CalendarCommands::Next(arg) | CalendarCommands::Prev(arg) | CalendarCommands::Check(arg)) =
        command;
    let date = arg.date.unwrap_or_else(|| global.date_or_today());

    match command {
        CalendarCommands::Next(_) => calendar.next_business_day(date).to_string(),
        CalendarCommands::Prev(_) => calendar.previous_business_day(date).to_string(),
        CalendarCommands::Check(_) => {
            if calendar.is_business_day(date) {
                format!("{} is a business day", date)
            } else {
                format!("{} is not a business day", date)
            }
        }
    }
}
