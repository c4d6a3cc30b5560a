//! Response envelope returned by every dataset endpoint.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Status string reported while a task occupies the job slot.
pub const STATUS_IN_PROGRESS: &str = "Task in progress";

/// Status string reported when the job slot is free.
pub const STATUS_IDLE: &str = "No task in progress. New task can be started";

/// One server-side bulk operation.
///
/// Every field is string-typed on the wire, including `success`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Task name, used as its identity.
    #[serde(default)]
    pub message: String,
    /// `"true"` or `"false"` once the task has finished.
    #[serde(default)]
    pub success: String,
    /// Start time in epoch milliseconds.
    #[serde(default)]
    pub start_time_ms: String,
    /// End time in epoch milliseconds.
    #[serde(default)]
    pub end_time_ms: String,
}

impl Task {
    /// Creates a task descriptor naming `message`.
    pub fn named(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// Returns whether the server reported this task as failed.
    #[must_use]
    pub fn is_failed(&self) -> bool {
        self.success == "false"
    }

    /// Wall-clock duration of the task, when both timestamps are present.
    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        let start: u64 = self.start_time_ms.trim().parse().ok()?;
        let end: u64 = self.end_time_ms.trim().parse().ok()?;
        end.checked_sub(start).map(Duration::from_millis)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{message: {:?}, success: {:?}, startTimeMs: {:?}, endTimeMs: {:?}}}",
            self.message, self.success, self.start_time_ms, self.end_time_ms
        )
    }
}

/// Envelope returned by submission, status and introspection endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskResponse {
    /// Error description, empty on success.
    #[serde(default)]
    pub error: String,
    /// Job status string.
    #[serde(default)]
    pub status: String,
    /// Task the response refers to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<Task>,
    /// Relative URL where the task status can be queried.
    #[serde(rename = "task-status-url", default)]
    pub task_status_url: String,
}

impl TaskResponse {
    /// Builds a response naming an already submitted task, for waiting on
    /// a task whose submission response is no longer at hand.
    pub fn for_task(message: impl Into<String>) -> Self {
        Self {
            task: Some(Task::named(message)),
            ..Self::default()
        }
    }

    /// Classifies the `status` string.
    #[must_use]
    pub fn job_status(&self) -> JobStatus {
        JobStatus::from_status(&self.status)
    }

    /// Returns the task name when present and non-empty.
    #[must_use]
    pub fn task_message(&self) -> Option<&str> {
        self.task
            .as_ref()
            .map(|task| task.message.as_str())
            .filter(|message| !message.is_empty())
    }
}

/// Semantic state of the server's single job slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    /// A task is currently running.
    InProgress,
    /// No task is running; a new one may start.
    Idle,
    /// Any other status string.
    Unexpected(String),
}

impl JobStatus {
    /// Maps a raw status string.
    #[must_use]
    pub fn from_status(status: &str) -> Self {
        match status {
            STATUS_IN_PROGRESS => Self::InProgress,
            STATUS_IDLE => Self::Idle,
            other => Self::Unexpected(other.to_string()),
        }
    }
}
