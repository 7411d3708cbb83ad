//! CLI module for tilegaps.
//!
//! This module provides the command-line interface: inspecting snap grids,
//! running gap passes over layout snapshots, and managing the configuration
//! file.

mod commands;
mod output;

use clap::Parser;
pub use commands::Cli;

use crate::error::TilegapsError;

/// Runs the CLI.
///
/// Parses command-line arguments and executes the appropriate command.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn run() -> Result<(), TilegapsError> {
    let cli = Cli::parse();
    cli.execute()
}
