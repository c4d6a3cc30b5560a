//! Output formatting utilities.

use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use crate::config::OutputFormat;
use crate::CliResult;

/// Prints a success message.
pub fn success(message: &str) {
    println!("{} {}", "✓".green().bold(), message);
}

/// Prints an error message.
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red().bold(), message);
}

/// Prints a warning message.
pub fn warning(message: &str) {
    eprintln!("{} {}", "⚠".yellow().bold(), message);
}

/// Prints an info message.
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue().bold(), message);
}

/// Outputs rows in the specified format.
pub fn output<T: Tabled + serde::Serialize>(data: &[T], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table => {
            if data.is_empty() {
                info("No results found.");
            } else {
                println!("{}", Table::new(data).with(Style::rounded()));
            }
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(data)?),
        OutputFormat::Yaml => {
            for item in data {
                print!("{}", to_yaml(&serde_json::to_value(item)?));
                println!();
            }
        }
        OutputFormat::Quiet => {}
    }
    Ok(())
}

/// Outputs a single item.
pub fn output_single<T: serde::Serialize>(item: &T, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Table | OutputFormat::Yaml => {
            print!("{}", to_yaml(&serde_json::to_value(item)?));
        }
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
        OutputFormat::Quiet => {}
    }
    Ok(())
}

/// Renders a JSON value as YAML-like text.
pub fn to_yaml(value: &serde_json::Value) -> String {
    let mut out = String::new();
    write_yaml(value, 0, &mut out);
    out
}

fn write_yaml(value: &serde_json::Value, indent: usize, out: &mut String) {
    use serde_json::Value;

    let prefix = "  ".repeat(indent);
    match value {
        Value::Array(items) => {
            for item in items {
                out.push_str(&prefix);
                out.push_str("- ");
                if item.is_object() || item.is_array() {
                    out.push('\n');
                    write_yaml(item, indent + 1, out);
                } else {
                    out.push_str(&scalar(item));
                    out.push('\n');
                }
            }
        }
        Value::Object(map) => {
            for (key, val) in map {
                if val.is_object() || val.is_array() {
                    out.push_str(&format!("{prefix}{key}:\n"));
                    write_yaml(val, indent + 1, out);
                } else {
                    out.push_str(&format!("{prefix}{key}: {}\n", scalar(val)));
                }
            }
        }
        other => {
            out.push_str(&prefix);
            out.push_str(&scalar(other));
            out.push('\n');
        }
    }
}

fn scalar(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Prompts for a line of input, returning `default` when the answer is empty.
pub fn prompt(message: &str, default: &str) -> CliResult<String> {
    print!("{message} [{default}]: ");
    std::io::Write::flush(&mut std::io::stdout())?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    let trimmed = input.trim();
    Ok(if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    })
}

/// Prompts for password input (hidden).
pub fn prompt_password(prompt: &str) -> CliResult<String> {
    Ok(rpassword::prompt_password(prompt)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_renders_nested_objects() {
        let value = serde_json::json!({
            "status": "Task in progress",
            "task": {"message": "Creation of users", "startTimeMs": "1"}
        });
        assert_eq!(
            to_yaml(&value),
            "status: Task in progress\ntask:\n  message: Creation of users\n  startTimeMs: 1\n"
        );
    }

    #[test]
    fn yaml_renders_arrays_and_scalars() {
        let value = serde_json::json!({"count": 3, "enabled": true, "roles": ["a", "b"]});
        assert_eq!(to_yaml(&value), "count: 3\nenabled: true\nroles:\n  - a\n  - b\n");
    }
}
