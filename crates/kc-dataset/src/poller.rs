//! Waiting for asynchronous dataset tasks.
//!
//! The dataset service runs at most one task at a time in a single, global
//! job slot. A waiter therefore re-validates on every observation that the
//! task in the slot (or the last completed one) is the task it submitted; a
//! concurrent caller may have raced another submission into the slot.
//!
//! Only an in-progress observation of the expected task is retried. Every
//! other outcome ends the wait.

use async_trait::async_trait;

use crate::error::{DatasetError, DatasetResult, PollStage};
use crate::options::{PollingConfig, PollingOptions};
use crate::response::{JobStatus, Task, TaskResponse};

/// Job-status endpoints the poller depends on.
#[async_trait]
pub trait JobStatusApi: Send + Sync {
    /// Queries the job slot.
    async fn running_job_status(&self) -> DatasetResult<TaskResponse>;

    /// Queries the last completed task record.
    async fn completed_job_status(&self) -> DatasetResult<TaskResponse>;

    /// Clears the last completed task record.
    async fn clear_completed_job(&self) -> DatasetResult<()>;
}

/// Polls the job slot until a named task reaches a terminal state.
#[derive(Debug)]
pub struct TaskPoller<'a, A: ?Sized> {
    api: &'a A,
    config: PollingConfig,
}

impl<'a, A: JobStatusApi + ?Sized> TaskPoller<'a, A> {
    /// Creates a poller from caller options.
    ///
    /// ## Errors
    ///
    /// Returns `DatasetError::InvalidPollingOptions` if the interval is
    /// negative or not finite.
    pub fn new(api: &'a A, options: &PollingOptions) -> DatasetResult<Self> {
        Ok(Self::with_config(api, options.resolve()?))
    }

    /// Creates a poller from an already resolved schedule.
    pub const fn with_config(api: &'a A, config: PollingConfig) -> Self {
        Self { api, config }
    }

    /// Returns the effective schedule.
    #[must_use]
    pub const fn config(&self) -> PollingConfig {
        self.config
    }

    /// Waits for the task named by `submission` and returns its completed record.
    ///
    /// On success the completed-job record has been cleared on the server.
    ///
    /// ## Errors
    ///
    /// - `MalformedSubmission` if `submission` names no task; nothing is queried.
    /// - `TaskIdentityMismatch` if another task occupies the slot or completed.
    /// - `TaskExecutionFailed` if the task completed with `success == "false"`;
    ///   the completed record is left in place.
    /// - `UnexpectedJobStatus` on an unrecognized status string.
    /// - `PollingTimeout` once `max_retries` status queries saw the task running.
    /// - any request error from the underlying API.
    pub async fn wait(&self, submission: &TaskResponse) -> DatasetResult<Task> {
        let expected = submission
            .task_message()
            .ok_or_else(|| DatasetError::MalformedSubmission {
                response: serde_json::to_string(submission)
                    .unwrap_or_else(|_| format!("{submission:?}")),
            })?;

        let PollingConfig {
            poll_interval,
            max_retries,
        } = self.config;

        for attempt in 1..=max_retries {
            let job = self.api.running_job_status().await?;
            tracing::debug!(
                task = expected,
                attempt,
                max_retries,
                status = %job.status,
                "polled job status"
            );

            match job.job_status() {
                JobStatus::InProgress => {
                    let found = job.task_message();
                    if found != Some(expected) {
                        tracing::warn!(
                            expected,
                            found = ?found,
                            "job slot is occupied by another task"
                        );
                        return Err(DatasetError::TaskIdentityMismatch {
                            stage: PollStage::Running,
                            expected: expected.to_string(),
                            found: found.map(str::to_string),
                        });
                    }

                    if attempt < max_retries {
                        tokio::time::sleep(poll_interval).await;
                    }
                }
                JobStatus::Idle => return self.collect(expected).await,
                JobStatus::Unexpected(status) => {
                    return Err(DatasetError::UnexpectedJobStatus { status });
                }
            }
        }

        Err(DatasetError::PollingTimeout {
            task: expected.to_string(),
            attempts: max_retries,
        })
    }

    /// Reads the completed record once the slot is idle.
    async fn collect(&self, expected: &str) -> DatasetResult<Task> {
        let completed = self.api.completed_job_status().await?;

        let task = match completed.task {
            Some(task) if task.message == expected => task,
            other => {
                let found = other.map(|task| task.message);
                tracing::warn!(expected, found = ?found, "another task completed");
                return Err(DatasetError::TaskIdentityMismatch {
                    stage: PollStage::Completed,
                    expected: expected.to_string(),
                    found,
                });
            }
        };

        if task.is_failed() {
            tracing::warn!(task = %task, "task failed");
            return Err(DatasetError::TaskExecutionFailed { task });
        }

        self.api.clear_completed_job().await?;

        tracing::info!(
            task = %task.message,
            duration_ms = ?task.duration().map(|d| d.as_millis()),
            "task completed"
        );
        Ok(task)
    }
}

/// Waits for the task named by `submission`, see [`TaskPoller::wait`].
pub async fn wait_for_task_to_complete<A: JobStatusApi + ?Sized>(
    api: &A,
    submission: &TaskResponse,
    options: &PollingOptions,
) -> DatasetResult<Task> {
    TaskPoller::new(api, options)?.wait(submission).await
}
