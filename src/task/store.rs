//! Per-date task store

use chrono::NaiveDate;
use std::collections::BTreeMap;

use super::model::{CarryStub, Task};

/// One day's tasks plus the stubs carried out of it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateBucket {
    pub tasks: Vec<Task>,
    pub next: Vec<CarryStub>,
}

impl DateBucket {
    /// A bucket with neither tasks nor carries is dropped on save
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty() && self.next.is_empty()
    }
}

/// All buckets keyed by date, always iterated in ascending date order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    buckets: BTreeMap<NaiveDate, DateBucket>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the bucket for a date, creating it on first access
    pub fn bucket_mut(&mut self, date: NaiveDate) -> &mut DateBucket {
        self.buckets.entry(date).or_default()
    }

    pub fn bucket(&self, date: NaiveDate) -> Option<&DateBucket> {
        self.buckets.get(&date)
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.buckets.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NaiveDate, &DateBucket)> {
        self.buckets.iter()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Copy of the store without empty buckets, i.e. what a save would keep
    pub fn without_empty(&self) -> Self {
        Self {
            buckets: self
                .buckets
                .iter()
                .filter(|(_, b)| !b.is_empty())
                .map(|(d, b)| (*d, b.clone()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_bucket_created_lazily() {
        let mut store = Store::new();
        assert!(store.bucket(date("2024-06-03")).is_none());

        store.bucket_mut(date("2024-06-03"));
        assert_eq!(store.len(), 1);
        assert!(store.bucket(date("2024-06-03")).unwrap().is_empty());
    }

    #[test]
    fn test_dates_sorted() {
        let mut store = Store::new();
        store.bucket_mut(date("2024-06-05"));
        store.bucket_mut(date("2023-12-29"));
        store.bucket_mut(date("2024-06-03"));

        assert_eq!(
            store.dates(),
            vec![date("2023-12-29"), date("2024-06-03"), date("2024-06-05")]
        );
    }

    #[test]
    fn test_without_empty() {
        let mut store = Store::new();
        store.bucket_mut(date("2024-06-03"));
        store
            .bucket_mut(date("2024-06-04"))
            .tasks
            .push(Task::create("Keep").unwrap());

        let kept = store.without_empty();
        assert_eq!(kept.dates(), vec![date("2024-06-04")]);
    }
}
