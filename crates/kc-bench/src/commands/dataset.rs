//! Dataset service commands.

use kc_dataset::{
    options_from_pairs, DatasetClient, DatasetError, JobStatusApi, PollStage, PollingOptions, Task,
    TaskResponse,
};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{DatasetCommand, PollingArgs, SubmitArgs};
use crate::config::OutputFormat;
use crate::output::{info, output, output_single, success, warning};
use crate::CliResult;

use super::Context;

/// Task row for table output.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct TaskDisplay {
    /// Task name.
    #[tabled(rename = "Task")]
    pub message: String,
    /// Success flag as reported by the service.
    #[tabled(rename = "Success")]
    pub success: String,
    /// Wall-clock duration, when both timestamps are known.
    #[tabled(rename = "Duration")]
    pub duration: String,
}

impl From<&Task> for TaskDisplay {
    fn from(task: &Task) -> Self {
        Self {
            message: task.message.clone(),
            success: task.success.clone(),
            duration: task
                .duration()
                .map_or_else(|| "-".to_string(), |d| format!("{:.3}s", d.as_secs_f64())),
        }
    }
}

/// Runs a dataset command.
pub async fn run_dataset(cmd: DatasetCommand, ctx: &Context) -> CliResult<()> {
    let client = DatasetClient::new(ctx.server_url())?;
    let format = ctx.output_format();

    match cmd {
        DatasetCommand::CreateRealms(args) => {
            let response = client.create_realms(&parse(&args.set)?).await?;
            submitted(&client, ctx, &args, &response).await
        }
        DatasetCommand::RemoveRealms(args) => {
            let response = client.remove_realms(&parse(&args.set)?).await?;
            submitted(&client, ctx, &args, &response).await
        }
        DatasetCommand::CreateClients(args) => {
            let response = client.create_clients(&parse(&args.set)?).await?;
            submitted(&client, ctx, &args, &response).await
        }
        DatasetCommand::CreateUsers(args) => {
            let response = client.create_users(&parse(&args.set)?).await?;
            submitted(&client, ctx, &args, &response).await
        }
        DatasetCommand::RemoveUsers(args) => {
            let response = client.remove_users(&parse(&args.set)?).await?;
            submitted(&client, ctx, &args, &response).await
        }
        DatasetCommand::CreateEvents(args) => {
            let response = client.create_events(&parse(&args.set)?).await?;
            submitted(&client, ctx, &args, &response).await
        }
        DatasetCommand::CreateOfflineSessions(args) => {
            let response = client.create_offline_sessions(&parse(&args.set)?).await?;
            submitted(&client, ctx, &args, &response).await
        }
        DatasetCommand::CreateAuthzResources(args) => {
            let response = client.create_authz_resources(&parse(&args.set)?).await?;
            submitted(&client, ctx, &args, &response).await
        }
        DatasetCommand::Status => output_single(&client.running_job_status().await?, format),
        DatasetCommand::StatusCompleted => {
            output_single(&client.completed_job_status().await?, format)
        }
        DatasetCommand::ClearCompleted => {
            client.clear_completed_job().await?;
            success("Completed task record cleared");
            Ok(())
        }
        DatasetCommand::LastRealm(args) => {
            output_single(&client.last_realm(&parse(&args.set)?).await?, format)
        }
        DatasetCommand::LastClient(args) => {
            output_single(&client.last_client(&parse(&args.set)?).await?, format)
        }
        DatasetCommand::LastUser(args) => {
            output_single(&client.last_user(&parse(&args.set)?).await?, format)
        }
        DatasetCommand::Wait { task_name, polling } => {
            let task = wait(&client, ctx, polling, &TaskResponse::for_task(task_name)).await?;
            completed(&task, format)
        }
    }
}

fn parse<O: DeserializeOwned>(pairs: &[(String, String)]) -> CliResult<O> {
    Ok(options_from_pairs(pairs)?)
}

/// Effective polling options: flags first, then the configuration file.
#[must_use]
pub fn polling_options(polling: PollingArgs, config_polling: PollingOptions) -> PollingOptions {
    polling.to_options().or(config_polling)
}

async fn submitted(
    client: &DatasetClient,
    ctx: &Context,
    args: &SubmitArgs,
    response: &TaskResponse,
) -> CliResult<()> {
    let format = ctx.output_format();
    output_single(response, format)?;
    if !args.wait {
        return Ok(());
    }

    if format == OutputFormat::Table {
        if let Some(name) = response.task_message() {
            info(&format!("Waiting for '{name}'..."));
        }
    }
    let task = wait(client, ctx, args.polling, response).await?;
    completed(&task, format)
}

async fn wait(
    client: &DatasetClient,
    ctx: &Context,
    polling: PollingArgs,
    submission: &TaskResponse,
) -> CliResult<Task> {
    let options = polling_options(polling, ctx.config.polling);
    match client.wait_for_task_to_complete(submission, &options).await {
        Ok(task) => Ok(task),
        Err(e) => {
            if leaves_completed_record(&e) {
                warning("Completed task record was not cleared");
            }
            Err(e.into())
        }
    }
}

/// Whether the wait ended after reading a completed record it did not clear.
fn leaves_completed_record(err: &DatasetError) -> bool {
    matches!(
        err,
        DatasetError::TaskExecutionFailed { .. }
            | DatasetError::TaskIdentityMismatch {
                stage: PollStage::Completed,
                ..
            }
    )
}

fn completed(task: &Task, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            output(&[TaskDisplay::from(task)], format)?;
            success(&format!("Task '{}' completed", task.message));
            Ok(())
        }
        _ => output_single(task, format),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_take_precedence_over_file_polling() {
        let file = PollingOptions::default()
            .with_poll_interval_seconds(5.0)
            .with_max_retries(100);
        let flags = PollingArgs {
            poll_interval: None,
            max_retries: Some(3),
        };

        let effective = polling_options(flags, file);
        assert_eq!(effective.poll_interval_seconds, Some(5.0));
        assert_eq!(effective.max_retries, Some(3));
    }

    #[test]
    fn task_display_formats_duration() {
        let task: Task = serde_json::from_value(serde_json::json!({
            "message": "Creation of 10 realms",
            "success": "true",
            "startTimeMs": "1000",
            "endTimeMs": "2500"
        }))
        .unwrap();

        let row = TaskDisplay::from(&task);
        assert_eq!(row.duration, "1.500s");

        let running = Task::named("t");
        assert_eq!(TaskDisplay::from(&running).duration, "-");
    }

    #[test]
    fn only_completed_stage_failures_leave_a_record() {
        let failed = DatasetError::TaskExecutionFailed {
            task: Task::named("t"),
        };
        let completed_mismatch = DatasetError::TaskIdentityMismatch {
            stage: PollStage::Completed,
            expected: "t".to_string(),
            found: Some("other".to_string()),
        };
        assert!(leaves_completed_record(&failed));
        assert!(leaves_completed_record(&completed_mismatch));

        let running_mismatch = DatasetError::TaskIdentityMismatch {
            stage: PollStage::Running,
            expected: "t".to_string(),
            found: None,
        };
        let timeout = DatasetError::PollingTimeout {
            task: "t".to_string(),
            attempts: 60,
        };
        let unexpected = DatasetError::UnexpectedJobStatus {
            status: "weird".to_string(),
        };
        assert!(!leaves_completed_record(&running_mismatch));
        assert!(!leaves_completed_record(&timeout));
        assert!(!leaves_completed_record(&unexpected));
    }

    #[test]
    fn unknown_pair_is_rejected() {
        let pairs = vec![("no-such-param".to_string(), "1".to_string())];
        let result: CliResult<kc_dataset::CreateRealmsOptions> = parse(&pairs);
        assert!(result.is_err());
    }
}
