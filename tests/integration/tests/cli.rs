//! kc-bench commands against the mocked services.

use clap::Parser;
use kc_bench::cli::{Cli, Command};
use kc_bench::commands::{run_admin, run_dataset, Context};
use kc_bench::config::OutputFormat;
use kc_bench::{BenchConfig, CliError};

use crate::common::TestEnv;

fn context(env: &TestEnv) -> Context {
    Context {
        config: BenchConfig::default(),
        server: Some(env.server.uri()),
        output: Some(OutputFormat::Quiet),
        username: Some("admin".to_string()),
        password: Some("admin".to_string()),
    }
}

async fn run(env: &TestEnv, args: &[&str]) -> Result<(), CliError> {
    let cli = Cli::try_parse_from(std::iter::once("kc-bench").chain(args.iter().copied()))
        .expect("valid arguments");
    let ctx = context(env);
    match cli.command {
        Command::Dataset(cmd) => run_dataset(cmd, &ctx).await,
        Command::Admin(cmd) => run_admin(cmd, &ctx).await,
        Command::Config(_) => unreachable!("config commands touch the home directory"),
    }
}

#[tokio::test]
async fn test_cli_create_users_with_wait() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    run(&env, &["admin", "create-realm", "cli-realm"]).await?;
    run(
        &env,
        &[
            "dataset",
            "create-users",
            "--set",
            "realm-name=cli-realm",
            "--set",
            "count=25",
            "--wait",
            "--poll-interval",
            "0",
        ],
    )
    .await?;
    run(&env, &["admin", "users-count", "cli-realm"]).await?;

    let state = env.state();
    assert_eq!(state.users["cli-realm"], 25);
    assert_eq!(state.clears, 1);
    Ok(())
}

#[tokio::test]
async fn test_cli_rejects_unknown_option_key() -> anyhow::Result<()> {
    let env = TestEnv::new().await?;

    let err = run(&env, &["dataset", "create-users", "--set", "colour=blue"])
        .await
        .unwrap_err();

    assert!(matches!(err, CliError::Dataset(_)));
    assert_eq!(env.state().running.as_ref().map(|t| t.count), None);
    Ok(())
}
