//! CLI configuration.

use std::path::{Path, PathBuf};

use kc_admin_client::ADMIN_CLI_CLIENT_ID;
use kc_dataset::PollingOptions;
use serde::{Deserialize, Serialize};

use crate::{CliError, CliResult};

/// CLI configuration, stored as TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    /// Server URL (e.g., http://localhost:8080).
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Output format.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Admin credentials.
    #[serde(default)]
    pub admin: AdminConfig,

    /// Default polling schedule for waits.
    #[serde(default)]
    pub polling: PollingOptions,
}

/// Default server URL.
fn default_server_url() -> String {
    "http://localhost:8080".to_string()
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            output_format: OutputFormat::default(),
            admin: AdminConfig::default(),
            polling: PollingOptions::default(),
        }
    }
}

impl BenchConfig {
    /// Loads configuration from the default file.
    pub fn load() -> CliResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads configuration from `path`, or defaults when it does not exist.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("failed to parse config: {e}")))
    }

    /// Saves configuration to the default file.
    pub fn save(&self) -> CliResult<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Saves configuration to `path`.
    pub fn save_to(&self, path: &Path) -> CliResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Gets the configuration file path.
    pub fn config_path() -> CliResult<PathBuf> {
        let home = dirs_next::home_dir()
            .ok_or_else(|| CliError::Config("could not determine home directory".to_string()))?;
        Ok(home.join(".keycloak").join("kc-bench.toml"))
    }

    /// Gets the effective server URL (from args or config).
    #[must_use]
    pub fn effective_server(&self, arg_server: Option<&str>) -> String {
        arg_server.map_or_else(|| self.server_url.clone(), str::to_string)
    }

    /// Sets a value by key, accepting the short aliases used on the command line.
    pub fn set(&mut self, key: &str, value: &str) -> CliResult<()> {
        match key {
            "server_url" | "server" => self.server_url = value.to_string(),
            "output_format" | "output" => self.output_format = value.parse()?,
            "admin.username" | "username" => self.admin.username = value.to_string(),
            "admin.password" | "password" => {
                self.admin.password = (!value.is_empty()).then(|| value.to_string());
            }
            "admin.client_id" | "client_id" => self.admin.client_id = value.to_string(),
            "polling.poll_interval_seconds" | "poll_interval" => {
                let seconds: f64 = value.parse().map_err(|_| {
                    CliError::InvalidArgument(format!("poll interval must be a number: {value}"))
                })?;
                let polling = self.polling.with_poll_interval_seconds(seconds);
                polling.resolve()?;
                self.polling = polling;
            }
            "polling.max_retries" | "max_retries" => {
                let retries: u32 = value.parse().map_err(|_| {
                    CliError::InvalidArgument(format!("max retries must be an integer: {value}"))
                })?;
                self.polling.max_retries = Some(retries);
            }
            _ => {
                return Err(CliError::InvalidArgument(format!(
                    "Unknown configuration key: {key}. Known keys: server_url, output_format, \
                     admin.username, admin.password, admin.client_id, \
                     polling.poll_interval_seconds, polling.max_retries"
                )));
            }
        }
        Ok(())
    }
}

/// Admin credentials configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Admin username.
    #[serde(default = "default_admin_username")]
    pub username: String,
    /// Admin password; prompted for when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Client used for the password grant.
    #[serde(default = "default_client_id")]
    pub client_id: String,
}

fn default_admin_username() -> String {
    "admin".to_string()
}

fn default_client_id() -> String {
    ADMIN_CLI_CLIENT_ID.to_string()
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: default_admin_username(),
            password: None,
            client_id: default_client_id(),
        }
    }
}

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON format.
    Json,
    /// YAML format.
    Yaml,
    /// Quiet (minimal output).
    Quiet,
}

impl std::str::FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "yaml" => Ok(Self::Yaml),
            "quiet" => Ok(Self::Quiet),
            _ => Err(CliError::InvalidArgument(format!(
                "Unknown output format: {s}. Supported: table, json, yaml, quiet"
            ))),
        }
    }
}
