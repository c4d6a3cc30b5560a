//! CLI argument parsing.

use clap::{Args, Parser, Subcommand};
use kc_dataset::PollingOptions;

use crate::config::OutputFormat;

/// kc-bench - drive the benchmark dataset service and admin API.
#[derive(Debug, Parser)]
#[command(name = "kc-bench")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Server URL (overrides config).
    #[arg(short, long, env = "KC_BENCH_SERVER_URL")]
    pub server: Option<String>,

    /// Output format (overrides config).
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Admin username (overrides config).
    #[arg(long, env = "KC_BENCH_ADMIN_USER")]
    pub username: Option<String>,

    /// Admin password (overrides config; prompted when absent).
    #[arg(long, env = "KC_BENCH_ADMIN_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Dataset service commands.
    #[command(subcommand)]
    Dataset(DatasetCommand),

    /// Admin API commands.
    #[command(subcommand)]
    Admin(AdminCommand),

    /// Configuration management.
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Dataset commands.
#[derive(Debug, Subcommand)]
pub enum DatasetCommand {
    /// Start realm creation.
    CreateRealms(SubmitArgs),
    /// Start realm removal.
    RemoveRealms(SubmitArgs),
    /// Start client creation.
    CreateClients(SubmitArgs),
    /// Start user creation.
    CreateUsers(SubmitArgs),
    /// Start user removal.
    RemoveUsers(SubmitArgs),
    /// Start event creation.
    CreateEvents(SubmitArgs),
    /// Start offline session creation.
    CreateOfflineSessions(SubmitArgs),
    /// Start authorization resource creation.
    CreateAuthzResources(SubmitArgs),

    /// Show the running job status.
    Status,
    /// Show the last completed job.
    StatusCompleted,
    /// Clear the last completed job record.
    ClearCompleted,

    /// Show the last realm created with a prefix.
    LastRealm(QueryArgs),
    /// Show the last client created with a prefix.
    LastClient(QueryArgs),
    /// Show the last user created with a prefix.
    LastUser(QueryArgs),

    /// Wait for an already submitted task.
    Wait {
        /// Task name, as reported in the submission response.
        task_name: String,

        /// Polling overrides.
        #[command(flatten)]
        polling: PollingArgs,
    },
}

/// Arguments shared by task submissions.
#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Query parameter, in the service's hyphenated form (repeatable).
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub set: Vec<(String, String)>,

    /// Wait for the task to complete.
    #[arg(long)]
    pub wait: bool,

    /// Polling overrides.
    #[command(flatten)]
    pub polling: PollingArgs,
}

/// Arguments for prefix lookups.
#[derive(Debug, Args)]
pub struct QueryArgs {
    /// Query parameter, in the service's hyphenated form (repeatable).
    #[arg(long = "set", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub set: Vec<(String, String)>,
}

/// Polling overrides.
#[derive(Debug, Clone, Copy, Default, Args)]
pub struct PollingArgs {
    /// Seconds between status queries.
    #[arg(long)]
    pub poll_interval: Option<f64>,

    /// Maximum number of status queries.
    #[arg(long)]
    pub max_retries: Option<u32>,
}

impl PollingArgs {
    /// Converts the flags to polling options; unset flags stay unset.
    #[must_use]
    pub fn to_options(self) -> PollingOptions {
        PollingOptions {
            poll_interval_seconds: self.poll_interval,
            max_retries: self.max_retries,
        }
    }
}

/// Admin commands.
#[derive(Debug, Subcommand)]
pub enum AdminCommand {
    /// Create an enabled realm.
    CreateRealm {
        /// Realm name.
        name: String,
    },

    /// Count users in a realm.
    UsersCount {
        /// Realm name.
        realm: String,

        /// Search query.
        #[arg(long)]
        search: Option<String>,
    },

    /// List users in a realm.
    ListUsers {
        /// Realm name.
        realm: String,

        /// Maximum results.
        #[arg(long)]
        max: Option<u32>,

        /// Search query.
        #[arg(long)]
        search: Option<String>,
    },

    /// List the roles of a client.
    ClientRoles {
        /// Realm name.
        realm: String,

        /// Client internal id.
        client_uuid: String,
    },
}

/// Config commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,

    /// Set a configuration value.
    Set {
        /// Configuration key.
        key: String,
        /// Configuration value.
        value: String,
    },

    /// Initialize configuration interactively.
    Init,
}

/// Parses a `key=value` pair.
fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{s}`"))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in `{s}`"));
    }
    Ok((key.to_string(), value.to_string()))
}
