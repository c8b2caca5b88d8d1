//! CLI module for the content-by-concept API
//!
//! Parses options (flags or environment), installs logging and serves.

mod args;
mod commands;
mod errors;

pub use args::{Cli, StoreKind};
pub use commands::{run, serve, server_config};
pub use errors::{CliError, CliErrorCode, CliResult};
