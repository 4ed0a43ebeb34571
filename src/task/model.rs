//! Task data model and lifecycle transitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Task status
///
/// Moves along `todo -> doing -> done | carry`. Values read from a task file
/// that are not one of the four known labels are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskStatus {
    /// Not started
    #[default]
    Todo,
    /// Has notes, work in progress
    Doing,
    /// Finished for the day
    Done,
    /// Continues on the next business day
    Carry,
    /// Unrecognised status text
    Other(String),
}

impl TaskStatus {
    /// Parse status text. Never fails; unknown labels become `Other`.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "todo" => Self::Todo,
            "doing" => Self::Doing,
            "done" => Self::Done,
            "carry" => Self::Carry,
            other => Self::Other(other.to_string()),
        }
    }

    /// Get the text label
    pub fn label(&self) -> &str {
        match self {
            Self::Todo => "todo",
            Self::Doing => "doing",
            Self::Done => "done",
            Self::Carry => "carry",
            Self::Other(s) => s,
        }
    }

    /// Get the marker shown in task listings
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Todo => "[ ]",
            Self::Doing => "[~]",
            Self::Done => "[x]",
            Self::Carry => "[>]",
            Self::Other(_) => "[?]",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for TaskStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<TaskStatus> for String {
    fn from(status: TaskStatus) -> Self {
        status.label().to_string()
    }
}

/// A task on one day's list
///
/// Tasks have no id; a task is addressed by its position in its bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Task title
    #[serde(rename = "task")]
    pub title: String,

    /// Free-form notes
    #[serde(default)]
    pub detail: String,

    /// Current status
    #[serde(default)]
    pub status: TaskStatus,
}

impl Task {
    /// Create a new task from a title.
    ///
    /// Returns `None` when the title is blank after trimming.
    pub fn create(title: &str) -> Option<Self> {
        if title.trim().is_empty() {
            return None;
        }

        Some(Self {
            title: title.to_string(),
            detail: String::new(),
            status: TaskStatus::Todo,
        })
    }

    /// Replace the detail text. A `todo` task with non-blank detail becomes `doing`.
    pub fn on_detail_edited(&mut self, detail: impl Into<String>) {
        self.detail = detail.into();

        if self.status == TaskStatus::Todo && !self.detail.trim().is_empty() {
            self.status = TaskStatus::Doing;
        }
    }

    /// Mark task as done
    pub fn mark_done(&mut self) {
        if self.status == TaskStatus::Done {
            return;
        }
        self.status = TaskStatus::Done;
    }

    /// Mark task to be carried to the next business day, whatever its status
    pub fn mark_carry(&mut self) {
        self.status = TaskStatus::Carry;
    }

    /// Reduce to the stub stored in a bucket's `next` list
    pub fn to_stub(&self) -> CarryStub {
        CarryStub {
            title: self.title.clone(),
            detail: self.detail.clone(),
        }
    }
}

/// A carried task with its status stripped
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarryStub {
    /// Task title
    #[serde(rename = "task")]
    pub title: String,

    /// Notes carried along with the task
    #[serde(default)]
    pub detail: String,
}

impl CarryStub {
    /// Rebirth as a fresh `todo` task on the target day
    pub fn to_task(&self) -> Task {
        Task {
            title: self.title.clone(),
            detail: self.detail.clone(),
            status: TaskStatus::Todo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(title: &str, detail: &str, status: TaskStatus) -> Task {
        Task {
            title: title.to_string(),
            detail: detail.to_string(),
            status,
        }
    }

    #[test]
    fn test_task_status() {
        assert_eq!(TaskStatus::parse("done"), TaskStatus::Done);
        assert_eq!(TaskStatus::parse(" carry "), TaskStatus::Carry);
        assert_eq!(
            TaskStatus::parse("blocked"),
            TaskStatus::Other("blocked".to_string())
        );
        assert_eq!(TaskStatus::Other("blocked".to_string()).label(), "blocked");
        assert_eq!(TaskStatus::Doing.to_string(), "doing");
    }

    #[test]
    fn test_create_rejects_blank_title() {
        assert!(Task::create("").is_none());
        assert!(Task::create("   \t").is_none());

        let task = Task::create("Write report").unwrap();
        assert_eq!(task.title, "Write report");
        assert_eq!(task.detail, "");
        assert_eq!(task.status, TaskStatus::Todo);
    }

    #[test]
    fn test_whitespace_detail_keeps_todo() {
        let mut t = task("A", "", TaskStatus::Todo);
        t.on_detail_edited("  ");
        assert_eq!(t.status, TaskStatus::Todo);
        assert_eq!(t.detail, "  ");
    }

    #[test]
    fn test_detail_moves_todo_to_doing() {
        let mut t = task("A", "x", TaskStatus::Todo);
        t.on_detail_edited("note");
        assert_eq!(t.status, TaskStatus::Doing);
        assert_eq!(t.detail, "note");
    }

    #[test]
    fn test_detail_never_changes_other_statuses() {
        for status in [TaskStatus::Doing, TaskStatus::Done, TaskStatus::Carry] {
            let mut t = task("A", "", status.clone());
            t.on_detail_edited("more notes");
            assert_eq!(t.status, status);
        }

        let mut t = task("A", "", TaskStatus::Doing);
        t.on_detail_edited("");
        assert_eq!(t.status, TaskStatus::Doing);
    }

    #[test]
    fn test_mark_done_idempotent() {
        let mut once = task("A", "n", TaskStatus::Doing);
        once.mark_done();
        let mut twice = once.clone();
        twice.mark_done();
        assert_eq!(once, twice);
        assert_eq!(twice.status, TaskStatus::Done);
    }

    #[test]
    fn test_mark_carry_overrides_done() {
        let mut t = task("A", "", TaskStatus::Done);
        t.mark_carry();
        assert_eq!(t.status, TaskStatus::Carry);
    }

    #[test]
    fn test_stub_rebirth() {
        let t = task("Report", "draft ready", TaskStatus::Carry);
        let stub = t.to_stub();
        assert_eq!(stub.title, "Report");
        assert_eq!(stub.detail, "draft ready");

        let reborn = stub.to_task();
        assert_eq!(reborn.status, TaskStatus::Todo);
        assert_eq!(reborn.detail, "draft ready");
    }

    #[test]
    fn test_status_serializes_as_label() {
        let t = task("A", "", TaskStatus::Carry);
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("\"status\":\"carry\""));
        assert!(json.contains("\"task\":\"A\""));
    }
}
