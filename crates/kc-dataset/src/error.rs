//! Dataset service error types.

use std::fmt;

use thiserror::Error;

use crate::response::{Task, TaskResponse};

/// Result type alias using the dataset error type.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Point in the polling protocol where a task identity was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollStage {
    /// Check against the task occupying the job slot.
    Running,
    /// Check against the last completed task record.
    Completed,
}

impl fmt::Display for PollStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => f.write_str("current"),
            Self::Completed => f.write_str("completed"),
        }
    }
}

/// Errors returned by the dataset client and the task poller.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// The submission response does not name a task to poll for.
    #[error("can't extract task message from response {response}")]
    MalformedSubmission {
        /// JSON rendering of the offending response.
        response: String,
    },

    /// The server reports a different task than the one being waited for.
    #[error(
        "expected {stage} task to be {expected:?}, found {} instead",
        found_name(.found.as_deref())
    )]
    TaskIdentityMismatch {
        /// Where the mismatch was observed.
        stage: PollStage,
        /// Task name established at submission time.
        expected: String,
        /// Task name reported by the server, if any.
        found: Option<String>,
    },

    /// The task finished with `success == "false"`.
    #[error("task failed: {task}")]
    TaskExecutionFailed {
        /// Completed task record as reported by the server.
        task: Task,
    },

    /// The running-job status is neither in-progress nor idle.
    #[error("unexpected job status {status:?}")]
    UnexpectedJobStatus {
        /// Raw status string.
        status: String,
    },

    /// The retry budget ran out while the task was still in progress.
    #[error("timeout waiting for task {task:?} to finish after {attempts} status checks")]
    PollingTimeout {
        /// Task name being waited for.
        task: String,
        /// Number of status queries issued.
        attempts: u32,
    },

    /// The service answered with an HTTP error status.
    #[error("DatasetServiceError: {status}: {body}")]
    RequestFailed {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
        /// Response envelope, when the body decodes as one.
        task: Option<Box<TaskResponse>>,
    },

    /// Polling options cannot be turned into a schedule.
    #[error("invalid polling options: {0}")]
    InvalidPollingOptions(String),

    /// Options could not be built from textual key/value pairs.
    #[error("invalid operation options: {0}")]
    InvalidOptions(String),

    /// Response body is not the expected JSON.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Renders the task name reported by the server for error messages.
fn found_name(found: Option<&str>) -> String {
    found.map_or_else(|| "no task".to_string(), |name| format!("{name:?}"))
}

impl DatasetError {
    /// Builds a `RequestFailed` error from a failed response body.
    #[must_use]
    pub fn request_failed(status: u16, body: String) -> Self {
        let task = serde_json::from_str::<TaskResponse>(&body).ok().map(Box::new);
        Self::RequestFailed { status, body, task }
    }

    /// Returns the HTTP status for `RequestFailed` errors.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns whether this error came out of the polling protocol itself
    /// rather than from transport or local validation.
    #[must_use]
    pub const fn is_polling_failure(&self) -> bool {
        matches!(
            self,
            Self::TaskIdentityMismatch { .. }
                | Self::TaskExecutionFailed { .. }
                | Self::UnexpectedJobStatus { .. }
                | Self::PollingTimeout { .. }
        )
    }
}
