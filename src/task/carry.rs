//! End-of-day carry-forward
//!
//! Run over the whole store at save time. For each bucket, in date order:
//! 1. rebuild `next` from the tasks currently marked `carry`
//! 2. seed the next business day with those stubs as `todo` tasks, unless
//!    that day already has tasks of its own

use tracing::debug;

use super::model::TaskStatus;
use super::store::Store;
use crate::calendar::CalendarResolver;

/// Applies the carry-forward pass using a business-day calendar
pub struct CarryForwardEngine<'a> {
    calendar: &'a CalendarResolver,
}

/// What a pass did, for logging and tests
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarryReport {
    /// Stubs written across all `next` lists
    pub carried: usize,
    /// Tasks appended to target days
    pub propagated: usize,
    /// Target days left alone because they already had tasks
    pub skipped_targets: usize,
}

impl<'a> CarryForwardEngine<'a> {
    pub fn new(calendar: &'a CalendarResolver) -> Self {
        Self { calendar }
    }

    pub fn run(&self, store: &mut Store) -> CarryReport {
        let mut report = CarryReport::default();

        for date in store.dates() {
            let bucket = store.bucket_mut(date);
            bucket.next = bucket
                .tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Carry)
                .map(|t| t.to_stub())
                .collect();

            if bucket.next.is_empty() {
                continue;
            }
            let stubs = bucket.next.clone();
            report.carried += stubs.len();

            let target_date = self.calendar.next_business_day(date);
            let target = store.bucket_mut(target_date);
            if !target.tasks.is_empty() {
                debug!(
                    "Skipping carry {} -> {}: target already has {} tasks",
                    date,
                    target_date,
                    target.tasks.len()
                );
                report.skipped_targets += 1;
                continue;
            }

            debug!("Carrying {} tasks {} -> {}", stubs.len(), date, target_date);
            target.tasks.extend(stubs.iter().map(|s| s.to_task()));
            report.propagated += stubs.len();
        }

        report
    }
}
