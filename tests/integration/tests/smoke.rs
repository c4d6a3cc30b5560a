//! Create users in a fresh realm and verify the count through the admin API.

use kc_admin_client::{RealmRepresentation, UserQuery};
use kc_dataset::CreateUsersOptions;

use crate::common::TestEnv;

#[tokio::test]
async fn test_create_users_and_wait() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let admin = env.admin().await?;
    let realm_name = "my-realm";

    admin
        .create_realm(&RealmRepresentation {
            registration_allowed: Some(true),
            reset_password_allowed: Some(true),
            ..RealmRepresentation::named(realm_name)
        })
        .await?;
    assert_eq!(admin.get_users_count(realm_name, &UserQuery::default()).await?, 0);

    let submission = env
        .dataset
        .create_users(&CreateUsersOptions {
            count: Some(1000),
            user_prefix: Some("test-user".to_string()),
            realm_name: Some(realm_name.to_string()),
            ..Default::default()
        })
        .await?;
    let task = env
        .dataset
        .wait_for_task_to_complete(&submission, &TestEnv::fast_polling())
        .await?;

    assert_eq!(task.success, "true");
    assert!(task.message.starts_with("Creation of 1000 users"));
    assert_eq!(
        admin.get_users_count(realm_name, &UserQuery::default()).await?,
        1000
    );

    let state = env.state();
    assert_eq!(state.clears, 1);
    assert!(state.completed.is_none());
    Ok(())
}

#[tokio::test]
async fn test_duplicate_realm_is_rejected() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;
    let admin = env.admin().await?;

    admin.create_realm(&RealmRepresentation::named("dup")).await?;
    let err = admin
        .create_realm(&RealmRepresentation::named("dup"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(409));
    Ok(())
}
