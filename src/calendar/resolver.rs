//! Business-day resolution against a sparse exception calendar

use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::collections::HashMap;

/// Scans give up and return the current candidate once it is more than
/// this many days from the start date.
const SCAN_LIMIT_DAYS: i64 = 7;

/// One row of the exception calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarException {
    pub date: NaiveDate,
    pub is_business_day: bool,
}

/// Decides which dates are business days
///
/// Dates listed in the exception table use their flag; every other date is a
/// business day iff it falls on Monday to Friday.
#[derive(Debug, Clone, Default)]
pub struct CalendarResolver {
    exceptions: HashMap<NaiveDate, bool>,
}

impl CalendarResolver {
    pub fn new(exceptions: impl IntoIterator<Item = CalendarException>) -> Self {
        Self {
            exceptions: exceptions
                .into_iter()
                .map(|e| (e.date, e.is_business_day))
                .collect(),
        }
    }

    /// Number of exception records loaded
    pub fn len(&self) -> usize {
        self.exceptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exceptions.is_empty()
    }

    pub fn is_business_day(&self, date: NaiveDate) -> bool {
        match self.exceptions.get(&date) {
            Some(flag) => *flag,
            None => !matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
        }
    }

    /// First business day after `date`.
    ///
    /// Bounded: if nothing is found the date `date + 8` is returned even when
    /// it is not a business day. At the end of the date range the last
    /// representable date is returned.
    pub fn next_business_day(&self, date: NaiveDate) -> NaiveDate {
        let mut candidate = date;
        loop {
            let Some(step) = candidate.checked_add_days(Days::new(1)) else {
                return candidate;
            };
            candidate = step;
            if self.is_business_day(candidate) {
                return candidate;
            }
            if (candidate - date).num_days() > SCAN_LIMIT_DAYS {
                return candidate;
            }
        }
    }

    /// Last business day before `date`, bounded like [`Self::next_business_day`].
    pub fn previous_business_day(&self, date: NaiveDate) -> NaiveDate {
        let mut candidate = date;
        loop {
            let Some(step) = candidate.checked_sub_days(Days::new(1)) else {
                return candidate;
            };
            candidate = step;
            if self.is_business_day(candidate) {
                return candidate;
            }
            if (date - candidate).num_days() > SCAN_LIMIT_DAYS {
                return candidate;
            }
        }
    }
}
