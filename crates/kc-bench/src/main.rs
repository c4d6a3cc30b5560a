//! # kc-bench
//!
//! Command-line driver for benchmark data generation.

#![forbid(unsafe_code)]

use std::process::ExitCode;

use clap::Parser;
use kc_bench::{
    cli::{Cli, Command},
    commands::{run_admin, run_config, run_dataset, Context},
    output::error,
    BenchConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut ctx = Context {
        config: BenchConfig::load()?,
        server: cli.server,
        output: cli.output,
        username: cli.username,
        password: cli.password,
    };
    tracing::debug!(
        server = %ctx.server_url(),
        output = ?ctx.output_format(),
        "configuration loaded"
    );

    match cli.command {
        Command::Config(cmd) => run_config(cmd, &mut ctx.config)?,
        Command::Dataset(cmd) => run_dataset(cmd, &ctx).await?,
        Command::Admin(cmd) => run_admin(cmd, &ctx).await?,
    }
    Ok(())
}
