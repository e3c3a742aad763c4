//! CLI module for the exercise tracker
//!
//! Parses arguments and environment, then boots the server.

mod args;
mod commands;
mod errors;

pub use args::Cli;
pub use commands::{run, shutdown_signal};
pub use errors::{CliError, CliResult};
