//! Command implementations.

pub mod admin;
pub mod config;
pub mod dataset;

pub use admin::run_admin;
pub use config::run_config;
pub use dataset::run_dataset;

use kc_admin_client::AdminCredentials;

use crate::output::prompt_password;
use crate::{BenchConfig, CliResult};

/// Settings shared by every command, after flags are merged over the file.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration.
    pub config: BenchConfig,
    /// Server URL override.
    pub server: Option<String>,
    /// Output format override.
    pub output: Option<crate::config::OutputFormat>,
    /// Admin username override.
    pub username: Option<String>,
    /// Admin password override.
    pub password: Option<String>,
}

impl Context {
    /// Gets the effective server URL.
    #[must_use]
    pub fn server_url(&self) -> String {
        self.config.effective_server(self.server.as_deref())
    }

    /// Gets the effective output format.
    #[must_use]
    pub fn output_format(&self) -> crate::config::OutputFormat {
        self.output.unwrap_or(self.config.output_format)
    }

    /// Resolves admin credentials, prompting for the password when none is set.
    pub fn credentials(&self) -> CliResult<AdminCredentials> {
        let username = self
            .username
            .clone()
            .unwrap_or_else(|| self.config.admin.username.clone());
        let password = match self.password.clone().or_else(|| self.config.admin.password.clone()) {
            Some(password) => password,
            None => prompt_password(&format!("Password for {username}: "))?,
        };
        Ok(AdminCredentials::new(username, password)
            .with_client_id(self.config.admin.client_id.clone()))
    }
}
