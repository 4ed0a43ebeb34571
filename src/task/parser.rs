//! Task file parser and writer
//!
//! The task file is a YAML-looking, line-oriented format keyed by date:
//!
//! ```text
//! 2024-06-03:
//!   tasks:
//!     - task: Report
//!       detail: "draft ready"
//!       status: carry
//!   next:
//!     - task: Report
//!       detail: "draft ready"
//! ```
//!
//! It is not parsed as YAML. The reader is a tolerant line scanner: lines it
//! does not understand are skipped and it never fails.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::model::{CarryStub, Task, TaskStatus};
use super::store::Store;

static DATE_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4}-\d{2}-\d{2}):").expect("date line pattern"));
static TASK_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-\s*task:\s*(.*)$").expect("task line pattern"));
static DETAIL_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^detail:\s*"(.*?)"?$"#).expect("detail line pattern"));
static STATUS_LINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^status:\s*(.*)$").expect("status line pattern"));

/// Where the scanner is in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Before the first valid date line
    AwaitingDate,
    /// After a date line, before any section line
    InBucket(NaiveDate),
    InTasks(NaiveDate),
    InNext(NaiveDate),
}

/// Item that `detail:`/`status:` lines apply to
#[derive(Debug, Clone, Copy)]
enum CurrentItem {
    Task(NaiveDate, usize),
    Stub(NaiveDate, usize),
}

struct Scanner {
    store: Store,
    state: ScanState,
    current: Option<CurrentItem>,
}

impl Scanner {
    fn new() -> Self {
        Self {
            store: Store::new(),
            state: ScanState::AwaitingDate,
            current: None,
        }
    }

    fn date(&self) -> Option<NaiveDate> {
        match self.state {
            ScanState::AwaitingDate => None,
            ScanState::InBucket(d) | ScanState::InTasks(d) | ScanState::InNext(d) => Some(d),
        }
    }

    fn feed(&mut self, raw: &str) {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }

        if let Some(caps) = DATE_LINE_RE.captures(line) {
            self.current = None;
            self.state = match NaiveDate::parse_from_str(&caps[1], "%Y-%m-%d") {
                Ok(date) => {
                    self.store.bucket_mut(date);
                    ScanState::InBucket(date)
                }
                Err(_) => {
                    debug!("Ignoring invalid date line: {}", line);
                    ScanState::AwaitingDate
                }
            };
            return;
        }

        let Some(date) = self.date() else {
            return;
        };

        match line {
            "tasks:" => {
                self.state = ScanState::InTasks(date);
                self.current = None;
                return;
            }
            "next:" => {
                self.state = ScanState::InNext(date);
                self.current = None;
                return;
            }
            "[]" => return,
            _ => {}
        }

        if let Some(caps) = TASK_LINE_RE.captures(line) {
            self.push_item(caps[1].to_string());
        } else if let Some(caps) = DETAIL_LINE_RE.captures(line) {
            self.set_detail(caps[1].trim().to_string());
        } else if let Some(caps) = STATUS_LINE_RE.captures(line) {
            self.set_status(TaskStatus::parse(&caps[1]));
        }
    }

    fn push_item(&mut self, title: String) {
        match self.state {
            ScanState::InTasks(date) => {
                let bucket = self.store.bucket_mut(date);
                bucket.tasks.push(Task {
                    title,
                    detail: String::new(),
                    status: TaskStatus::Todo,
                });
                self.current = Some(CurrentItem::Task(date, bucket.tasks.len() - 1));
            }
            ScanState::InNext(date) => {
                let bucket = self.store.bucket_mut(date);
                bucket.next.push(CarryStub {
                    title,
                    detail: String::new(),
                });
                self.current = Some(CurrentItem::Stub(date, bucket.next.len() - 1));
            }
            ScanState::AwaitingDate | ScanState::InBucket(_) => {}
        }
    }

    fn set_detail(&mut self, detail: String) {
        match self.current {
            Some(CurrentItem::Task(date, idx)) => {
                if let Some(task) = self.store.bucket_mut(date).tasks.get_mut(idx) {
                    task.detail = detail;
                }
            }
            Some(CurrentItem::Stub(date, idx)) => {
                if let Some(stub) = self.store.bucket_mut(date).next.get_mut(idx) {
                    stub.detail = detail;
                }
            }
            None => {}
        }
    }

    fn set_status(&mut self, status: TaskStatus) {
        // Stubs have no status.
        if let Some(CurrentItem::Task(date, idx)) = self.current {
            if let Some(task) = self.store.bucket_mut(date).tasks.get_mut(idx) {
                task.status = status;
            }
        }
    }
}

/// Parse task file content. Never fails: unrecognised lines are ignored.
pub fn parse(content: &str) -> Store {
    let mut scanner = Scanner::new();
    for line in content.lines() {
        scanner.feed(line);
    }
    scanner.store
}

/// Write the store in task file format.
///
/// Dates ascend; buckets with no tasks and no carries are left out. Details
/// are quoted without escaping.
pub fn serialize(store: &Store) -> String {
    let mut output = String::new();

    for (date, bucket) in store.iter() {
        if bucket.is_empty() {
            continue;
        }

        output.push_str(&format!("{}:\n", date.format("%Y-%m-%d")));

        output.push_str("  tasks:\n");
        if bucket.tasks.is_empty() {
            output.push_str("    []\n");
        }
        for task in &bucket.tasks {
            output.push_str(&format!("    - task: {}\n", task.title));
            output.push_str(&format!("      detail: \"{}\"\n", task.detail));
            output.push_str(&format!("      status: {}\n", task.status));
        }

        output.push_str("  next:\n");
        if bucket.next.is_empty() {
            output.push_str("    []\n");
        }
        for stub in &bucket.next {
            output.push_str(&format!("    - task: {}\n", stub.title));
            output.push_str(&format!("      detail: \"{}\"\n", stub.detail));
        }
    }

    output
}
