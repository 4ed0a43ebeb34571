//! Application state controller
//!
//! `AppState` owns everything that changes while the tracker runs: the task
//! store, the calendar, the date being viewed and the open file. User actions
//! go through its methods; the task module itself stays free of I/O.

use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::storage::{self, SaveOutcome, TaskFile};
use crate::calendar::CalendarResolver;
use crate::task::{self, CarryForwardEngine, Store, Task};
use crate::view::TodayView;

pub struct AppState {
    store: Store,
    calendar: CalendarResolver,
    current_date: NaiveDate,
    current_file: Option<PathBuf>,
}

impl AppState {
    pub fn new(calendar: CalendarResolver, current_date: NaiveDate) -> Self {
        Self {
            store: Store::new(),
            calendar,
            current_date,
            current_file: None,
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn calendar(&self) -> &CalendarResolver {
        &self.calendar
    }

    pub fn current_date(&self) -> NaiveDate {
        self.current_date
    }

    pub fn set_current_date(&mut self, date: NaiveDate) {
        self.current_date = date;
    }

    pub fn current_file(&self) -> Option<&Path> {
        self.current_file.as_deref()
    }

    /// Tasks of the current date
    pub fn tasks(&self) -> &[Task] {
        self.store
            .bucket(self.current_date)
            .map(|b| b.tasks.as_slice())
            .unwrap_or_default()
    }

    pub fn task(&self, index: usize) -> Option<&Task> {
        self.tasks().get(index)
    }

    /// Add a task to the current date. Blank titles are ignored.
    pub fn add_task(&mut self, title: &str) -> Option<usize> {
        let task = Task::create(title)?;
        let bucket = self.store.bucket_mut(self.current_date);
        bucket.tasks.push(task);
        Some(bucket.tasks.len() - 1)
    }

    pub fn edit_detail(&mut self, index: usize, detail: &str) -> Option<&Task> {
        let task = self.task_mut(index)?;
        task.on_detail_edited(detail);
        Some(&*task)
    }

    pub fn mark_done(&mut self, index: usize) -> Option<&Task> {
        let task = self.task_mut(index)?;
        task.mark_done();
        Some(&*task)
    }

    pub fn mark_carry(&mut self, index: usize) -> Option<&Task> {
        let task = self.task_mut(index)?;
        task.mark_carry();
        Some(&*task)
    }

    fn task_mut(&mut self, index: usize) -> Option<&mut Task> {
        self.store
            .bucket_mut(self.current_date)
            .tasks
            .get_mut(index)
    }

    /// Replace the whole store with parsed text
    pub fn replace_store(&mut self, content: &str) {
        self.store = task::parse(content);
        debug!("Store replaced: {} dates", self.store.len());
    }

    /// Run the carry-forward pass and produce the text to persist
    pub fn prepare_save(&mut self) -> String {
        let report = CarryForwardEngine::new(&self.calendar).run(&mut self.store);
        debug!(
            "Carry-forward: {} carried, {} propagated, {} targets skipped",
            report.carried, report.propagated, report.skipped_targets
        );
        task::serialize(&self.store)
    }

    pub fn today_view(&self) -> TodayView {
        TodayView::build(&self.store, &self.calendar, self.current_date)
    }

    /// Open an existing task file. On failure the current state is kept.
    pub async fn open(&mut self, path: &Path) -> storage::Result<()> {
        let content = TaskFile::new(path).load_existing().await?;
        self.replace_store(&content);
        self.current_file = Some(path.to_path_buf());
        Ok(())
    }

    /// Open a task file, starting empty if it does not exist yet
    pub async fn open_or_create(&mut self, path: &Path) -> storage::Result<()> {
        match TaskFile::new(path).load().await? {
            Some(content) => self.replace_store(&content),
            None => {
                info!("No task file at {}, starting empty", path.display());
                self.store = Store::new();
            }
        }
        self.current_file = Some(path.to_path_buf());
        Ok(())
    }

    /// Save to the current file, falling back to a dated copy in `fallback_dir`
    pub async fn save(&mut self, fallback_dir: &Path) -> SaveOutcome {
        let content = self.prepare_save();

        match &self.current_file {
            Some(path) => {
                TaskFile::new(path)
                    .save_with_fallback(&content, fallback_dir, self.current_date)
                    .await
            }
            None => match storage::write_fallback(fallback_dir, self.current_date, &content).await
            {
                Ok(path) => SaveOutcome::Saved(path),
                Err(reason) => SaveOutcome::Unsaved {
                    reason,
                    fallback: None,
                    content,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::CalendarException;
    use crate::task::TaskStatus;
    use tempfile::tempdir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn state_on(d: &str) -> AppState {
        AppState::new(CalendarResolver::default(), date(d))
    }

    #[test]
    fn test_add_task_ignores_blank() {
        let mut state = state_on("2024-06-03");
        assert_eq!(state.add_task("  "), None);
        assert!(state.tasks().is_empty());

        assert_eq!(state.add_task("First"), Some(0));
        assert_eq!(state.add_task("Second"), Some(1));
        assert_eq!(state.tasks()[1].title, "Second");
    }

    #[test]
    fn test_actions_by_position() {
        let mut state = state_on("2024-06-03");
        state.add_task("A");
        state.add_task("B");

        assert_eq!(
            state.edit_detail(0, "started").unwrap().status,
            TaskStatus::Doing
        );
        assert_eq!(state.mark_done(1).unwrap().status, TaskStatus::Done);
        assert_eq!(state.mark_carry(0).unwrap().status, TaskStatus::Carry);
        assert!(state.mark_done(5).is_none());
    }

    #[test]
    fn test_prepare_save_carries_forward() {
        let mut state = state_on("2024-06-03");
        state.add_task("Report");
        state.edit_detail(0, "half");
        state.mark_carry(0);

        let text = state.prepare_save();
        assert!(text.contains("2024-06-04:"));

        state.set_current_date(date("2024-06-04"));
        assert_eq!(state.tasks().len(), 1);
        assert_eq!(state.tasks()[0].status, TaskStatus::Todo);
        assert_eq!(state.tasks()[0].detail, "half");
    }

    #[test]
    fn test_prepare_save_uses_calendar() {
        let calendar = CalendarResolver::new([CalendarException {
            date: date("2024-01-01"),
            is_business_day: false,
        }]);
        let mut state = AppState::new(calendar, date("2023-12-29"));
        state.add_task("Year end");
        state.mark_carry(0);
        state.prepare_save();

        assert!(state.store().bucket(date("2024-01-01")).is_none());
        assert_eq!(state.store().bucket(date("2024-01-02")).unwrap().tasks.len(), 1);
    }

    #[tokio::test]
    async fn test_open_failure_keeps_store() {
        let temp = tempdir().unwrap();
        let mut state = state_on("2024-06-03");
        state.add_task("Unsaved work");

        let result = state.open(&temp.path().join("missing.yaml")).await;
        assert!(result.is_err());
        assert_eq!(state.tasks().len(), 1);
        assert!(state.current_file().is_none());
    }

    #[tokio::test]
    async fn test_save_and_reopen() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("tasks.yaml");

        let mut state = state_on("2024-06-03");
        state.open_or_create(&path).await.unwrap();
        state.add_task("Persist me");
        let outcome = state.save(temp.path()).await;
        assert!(matches!(outcome, SaveOutcome::Saved(ref p) if p == &path));

        let mut reopened = state_on("2024-06-03");
        reopened.open(&path).await.unwrap();
        assert_eq!(reopened.store(), state.store());
        assert_eq!(reopened.current_file(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn test_save_without_file_writes_dated_copy() {
        let temp = tempdir().unwrap();
        let mut state = state_on("2024-06-03");
        state.add_task("Loose");

        match state.save(temp.path()).await {
            SaveOutcome::Saved(path) => {
                assert_eq!(path, temp.path().join("tasks_2024-06-03.yaml"));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }
}
