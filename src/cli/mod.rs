//! CLI module for barelydb
//!
//! Provides command-line interface for:
//! - serve: resolve the root directory and serve it over HTTP
//! - create: create a database (and optionally a table) on disk

mod args;
mod commands;
mod config;
mod errors;

pub use args::{Cli, Command, ROOT_DB_ENV};
pub use commands::{create, load_config, run, run_command, serve};
pub use config::Config;
pub use errors::{CliError, CliErrorCode, CliResult};
