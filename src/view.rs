//! Today view projection
//!
//! Read-only snapshot of what the Today screen shows: yesterday's finished
//! work next to today's open tasks.

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::CalendarResolver;
use crate::task::{Store, Task, TaskStatus};

/// A task plus its position in its date's list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskRow {
    pub position: usize,
    #[serde(flatten)]
    pub task: Task,
}

#[derive(Debug, Clone, Serialize)]
pub struct TodayView {
    pub date: NaiveDate,
    /// `YYYY-MM` of `date`
    pub month: String,
    pub prev_date: NaiveDate,
    /// Tasks finished on the previous business day
    pub prev: Vec<TaskRow>,
    /// Today's tasks that are not done
    pub today: Vec<TaskRow>,
    /// Whether the today group is drawn at all
    pub show_today: bool,
}

impl TodayView {
    pub fn build(store: &Store, calendar: &CalendarResolver, date: NaiveDate) -> Self {
        let prev_date = calendar.previous_business_day(date);

        let prev = rows(store, prev_date, |t| t.status == TaskStatus::Done);
        let today = rows(store, date, |t| t.status != TaskStatus::Done);
        let has_tasks = store.bucket(date).is_some_and(|b| !b.tasks.is_empty());

        Self {
            date,
            month: date.format("%Y-%m").to_string(),
            prev_date,
            prev,
            show_today: !today.is_empty() || !has_tasks,
            today,
        }
    }
}

fn rows(store: &Store, date: NaiveDate, keep: impl Fn(&Task) -> bool) -> Vec<TaskRow> {
    store
        .bucket(date)
        .map(|b| {
            b.tasks
                .iter()
                .enumerate()
                .filter(|(_, t)| keep(t))
                .map(|(position, t)| TaskRow {
                    position,
                    task: t.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}
