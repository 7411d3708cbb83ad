//! CLI command definitions using Clap.
//!
//! This module defines all CLI commands and their arguments, organized into
//! domain-specific submodules:
//!
//! - `config_cmd` - Configuration file commands
//! - `grid` - Snap grid inspection
//! - `snap` - Running passes over layout snapshots

use std::io;
use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Generator, Shell, generate};

use crate::error::TilegapsError;
use crate::{config, logging, schema};

pub mod config_cmd;
pub mod grid;
pub mod snap;

pub use config_cmd::ConfigCommands;
pub use grid::GridArgs;
pub use snap::{SnapArgs, WatchArgs};

/// Application version from Cargo.toml.
const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// tilegaps - even gaps between windows and screen edges.
#[derive(Parser, Debug)]
#[command(name = "tilegaps")]
#[command(author, version = APP_VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to a custom configuration file.
    ///
    /// Overrides the default configuration file search paths.
    /// Supports JSONC format (JSON with comments).
    #[arg(long, short, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log every snap decision to stderr.
    ///
    /// The `TILEGAPS_LOG` environment variable, if set, takes precedence.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum Commands {
    /// Print the snap grid for a work area.
    ///
    /// Shows, for each window edge, the positions it snaps to with and
    /// without gaps. Gaps and offsets come from the configuration file.
    Grid(GridArgs),

    /// Run a gap pass over a layout snapshot.
    ///
    /// Reads screens and windows from a JSON file (or stdin), snaps one window
    /// or all of them, and prints the resulting frames.
    Snap(SnapArgs),

    /// Re-run `snap` whenever the configuration file changes.
    Watch(WatchArgs),

    /// Configuration file management commands.
    ///
    /// Initialize, locate, and view the configuration file.
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Output the configuration JSON Schema.
    ///
    /// Outputs a JSON Schema to stdout that describes the structure of the
    /// configuration file. Can be redirected to a file for use with editors
    /// that support JSON Schema validation.
    Schema,

    /// Generate shell completions.
    ///
    /// Outputs shell completion script to stdout for the specified shell.
    ///
    /// Usage:
    ///   eval "$(tilegaps completions --shell zsh)"
    ///   tilegaps completions --shell fish > ~/.config/fish/completions/tilegaps.fish
    Completions {
        /// The shell to generate completions for.
        #[arg(long, short, value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command execution fails.
    pub fn execute(&self) -> Result<(), TilegapsError> {
        logging::init_tracing(self.verbose);

        if let Some(path) = &self.config {
            config::set_custom_config_path(path.clone());
        }

        match &self.command {
            Commands::Grid(args) => grid::execute(args),
            Commands::Snap(args) => snap::execute(args),
            Commands::Watch(args) => snap::execute_watch(args),
            Commands::Config(cmd) => config_cmd::execute(cmd),

            Commands::Schema => {
                println!("{}", schema::generate_schema_json());
                Ok(())
            }

            Commands::Completions { shell } => {
                Self::print_completions(*shell);
                Ok(())
            }
        }
    }

    /// Print shell completions to stdout.
    fn print_completions<G: Generator>(generator: G) {
        let mut cmd = Self::command();
        generate(generator, &mut cmd, "tilegaps", &mut io::stdout());
    }
}
