//! Configuration management commands.

use crate::cli::ConfigCommand;
use crate::output::{info, prompt, success};
use crate::{BenchConfig, CliResult};

/// Runs a config command.
pub fn run_config(cmd: ConfigCommand, config: &mut BenchConfig) -> CliResult<()> {
    match cmd {
        ConfigCommand::Show => show_config(config),
        ConfigCommand::Set { key, value } => {
            config.set(&key, &value)?;
            config.save()?;
            success(&format!("Set {key} = {}", display_value(&key, &value)));
            Ok(())
        }
        ConfigCommand::Init => init_config(config),
    }
}

/// Shows the current configuration.
fn show_config(config: &BenchConfig) -> CliResult<()> {
    let config_path = BenchConfig::config_path()?;

    info(&format!("Configuration file: {}", config_path.display()));
    println!();
    println!("server_url: {}", config.server_url);
    println!("output_format: {:?}", config.output_format);
    println!("admin.username: {}", config.admin.username);
    println!(
        "admin.password: {}",
        if config.admin.password.is_some() { "****" } else { "(prompt)" }
    );
    println!("admin.client_id: {}", config.admin.client_id);

    let polling = config.polling.resolve()?;
    println!(
        "polling.poll_interval_seconds: {}",
        polling.poll_interval.as_secs_f64()
    );
    println!("polling.max_retries: {}", polling.max_retries);
    Ok(())
}

fn display_value<'a>(key: &str, value: &'a str) -> &'a str {
    if key.ends_with("password") {
        "****"
    } else {
        value
    }
}

/// Initializes configuration interactively.
fn init_config(config: &mut BenchConfig) -> CliResult<()> {
    let config_path = BenchConfig::config_path()?;

    info("Initializing kc-bench configuration...");
    println!();

    config.server_url = prompt("Server URL", &config.server_url)?;
    config.admin.username = prompt("Admin username", &config.admin.username)?;

    let current_format = format!("{:?}", config.output_format).to_lowercase();
    let answer = prompt("Output format (table/json/yaml/quiet)", &current_format)?;
    config.set("output_format", &answer)?;

    let resolved = config.polling.resolve()?;
    let interval = prompt(
        "Poll interval in seconds",
        &resolved.poll_interval.as_secs_f64().to_string(),
    )?;
    config.set("polling.poll_interval_seconds", &interval)?;
    let retries = prompt("Max retries", &resolved.max_retries.to_string())?;
    config.set("polling.max_retries", &retries)?;

    config.save()?;

    println!();
    success(&format!("Configuration saved to: {}", config_path.display()));
    Ok(())
}
