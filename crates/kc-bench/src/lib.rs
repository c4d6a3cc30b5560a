//! # kc-bench
//!
//! Command-line driver for the benchmark dataset service and the admin API.
//!
//! This crate provides:
//! - Dataset task submission, with optional waiting for completion
//! - Job status inspection and clearing
//! - Admin calls used to verify generated data
//! - A TOML configuration file for server, credentials and polling

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::Cli;
pub use config::BenchConfig;
pub use error::{CliError, CliResult};
