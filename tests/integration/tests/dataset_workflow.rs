//! Task polling against a stateful job slot.

use kc_admin_client::{RealmRepresentation, UserQuery};
use kc_dataset::{CreateUsersOptions, DatasetError, JobStatusApi, PollStage, TaskResponse};

use crate::common::{RunningTask, TestEnv, IN_PROGRESS};

async fn env_with_realm(realm: &str) -> anyhow::Result<TestEnv> {
    let env = TestEnv::new().await?;
    env.admin()
        .await?
        .create_realm(&RealmRepresentation::named(realm))
        .await?;
    Ok(env)
}

fn users(realm: &str, count: u32) -> CreateUsersOptions {
    CreateUsersOptions {
        realm_name: Some(realm.to_string()),
        count: Some(count),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_task_in_progress_for_several_polls() -> anyhow::Result<()> {
    let env = env_with_realm("bench").await?;
    env.state().task_polls = 5;

    let submission = env.dataset.create_users(&users("bench", 10)).await?;
    let task = env
        .dataset
        .wait_for_task_to_complete(&submission, &TestEnv::fast_polling())
        .await?;

    assert_eq!(task.message, submission.task_message().unwrap_or_default());
    let state = env.state();
    assert_eq!(state.status_queries, 6);
    assert_eq!(state.users["bench"], 10);
    Ok(())
}

#[tokio::test]
async fn test_second_submission_is_rejected_while_running() -> anyhow::Result<()> {
    let env = env_with_realm("bench").await?;

    env.dataset.create_users(&users("bench", 10)).await?;
    let err = env.dataset.create_users(&users("bench", 10)).await.unwrap_err();

    match err {
        DatasetError::RequestFailed { status, task, .. } => {
            assert_eq!(status, 400);
            let task = task.expect("error envelope");
            assert_eq!(task.error, IN_PROGRESS);
            assert!(task.task_message().is_some());
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_competing_task_is_reported() -> anyhow::Result<()> {
    let env = env_with_realm("bench").await?;
    env.state().running = Some(RunningTask::foreign("Removal of realms", 3));

    let err = env
        .dataset
        .wait_for_task_to_complete(
            &TaskResponse::for_task("Creation of users"),
            &TestEnv::fast_polling(),
        )
        .await
        .unwrap_err();

    match err {
        DatasetError::TaskIdentityMismatch {
            stage,
            expected,
            found,
        } => {
            assert_eq!(stage, PollStage::Running);
            assert_eq!(expected, "Creation of users");
            assert_eq!(found.as_deref(), Some("Removal of realms"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(env.state().status_queries, 1);
    Ok(())
}

#[tokio::test]
async fn test_failed_task_keeps_completed_record() -> anyhow::Result<()> {
    let env = env_with_realm("bench").await?;
    env.state().fail_tasks = true;

    let submission = env.dataset.create_users(&users("bench", 10)).await?;
    let err = env
        .dataset
        .wait_for_task_to_complete(&submission, &TestEnv::fast_polling())
        .await
        .unwrap_err();

    assert!(matches!(err, DatasetError::TaskExecutionFailed { .. }));
    {
        let state = env.state();
        assert_eq!(state.clears, 0);
        assert!(state.completed.is_some());
    }

    let record = env.dataset.completed_job_status().await?;
    assert_eq!(record.task.map(|t| t.success).as_deref(), Some("false"));

    let admin = env.admin().await?;
    assert_eq!(admin.get_users_count("bench", &UserQuery::default()).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_timeout_leaves_task_running() -> anyhow::Result<()> {
    let env = env_with_realm("bench").await?;
    env.state().task_polls = 50;

    let submission = env.dataset.create_users(&users("bench", 10)).await?;
    let options = TestEnv::fast_polling().with_max_retries(4);
    let err = env
        .dataset
        .wait_for_task_to_complete(&submission, &options)
        .await
        .unwrap_err();

    assert!(matches!(err, DatasetError::PollingTimeout { attempts: 4, .. }));
    let state = env.state();
    assert_eq!(state.status_queries, 4);
    assert!(state.running.is_some());
    Ok(())
}

#[tokio::test]
async fn test_submission_for_missing_realm() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let err = env
        .dataset
        .create_users(&users("nowhere", 1))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert!(err.to_string().contains("does not exist"));
    Ok(())
}
