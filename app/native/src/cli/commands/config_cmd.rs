//! Config CLI commands.
//!
//! Commands for managing the tilegaps configuration file.

use std::path::{Path, PathBuf};

use clap::Subcommand;
use colored::Colorize;

use crate::cli::output;
use crate::config::template::{create_config_file, generate_config_template};
use crate::config::{self, config_paths};
use crate::error::TilegapsError;

/// Config management commands.
#[derive(Subcommand, Debug)]
#[command(next_display_order = None)]
pub enum ConfigCommands {
    /// Initialize a new configuration file with all options documented.
    ///
    /// Creates a new configuration file at the default location with every
    /// option set to its default value and a comment describing it.
    #[command(
        name = "init",
        after_long_help = r#"Examples:
  tilegaps config init              # Create config at default location
  tilegaps config init --force      # Overwrite existing config
  tilegaps config init --path ~/gaps.jsonc  # Create at custom path
  tilegaps config init --stdout     # Print template to stdout"#
    )]
    Init {
        /// Overwrite existing configuration file if it exists.
        #[arg(long, short)]
        force: bool,

        /// Custom path for the configuration file.
        /// If not specified, uses ~/.config/tilegaps/config.jsonc
        #[arg(long, short, value_name = "PATH")]
        path: Option<PathBuf>,

        /// Print the configuration template to stdout instead of writing to a file.
        #[arg(long)]
        stdout: bool,
    },

    /// Show the path to the configuration file.
    ///
    /// Displays the paths where tilegaps looks for configuration files,
    /// and indicates which one is currently in use (if any).
    Path,

    /// Show the effective configuration.
    ///
    /// Prints the configuration as JSON after defaults have been filled in.
    Show,
}

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cmd: &ConfigCommands) -> Result<(), TilegapsError> {
    match cmd {
        ConfigCommands::Init { force, path, stdout } => {
            if *stdout {
                println!("{}", generate_config_template());
                return Ok(());
            }

            let path = path.clone().unwrap_or_else(default_config_path);
            init_config(&path, *force)?;

            println!("Configuration file created at: {}", path.display());
            println!("\nEvery option is set to its default value.");
            println!("Edit the file and change the options you want to configure.");
            Ok(())
        }
        ConfigCommands::Path => {
            show_config_path();
            Ok(())
        }
        ConfigCommands::Show => show_config(),
    }
}

/// Returns the preferred location for a new configuration file.
fn default_config_path() -> PathBuf {
    config_paths().into_iter().next().unwrap_or_else(|| PathBuf::from("config.jsonc"))
}

/// Writes the configuration template to `path`.
fn init_config(path: &Path, force: bool) -> Result<(), TilegapsError> {
    if path.exists() && !force {
        return Err(TilegapsError::ConfigError(format!(
            "Configuration file already exists at: {}\nUse --force to overwrite.",
            path.display()
        )));
    }

    create_config_file(path).map_err(|e| {
        TilegapsError::ConfigError(format!(
            "Failed to create config file {}: {e}",
            path.display()
        ))
    })
}

/// Show the configuration file path.
fn show_config_path() {
    println!("Configuration file search paths (in priority order):\n");

    if let Some(custom) = config::get_custom_config_path() {
        let marker = if custom.exists() { " (active)" } else { " (missing)" };
        println!("  --config {}{}", custom.display(), marker);
        return;
    }

    let mut found_config = false;
    for (i, path) in config_paths().iter().enumerate() {
        let exists = path.exists();
        let marker = if exists && !found_config {
            found_config = true;
            " (active)"
        } else if exists {
            " (exists)"
        } else {
            ""
        };

        println!("  {}. {}{}", i + 1, path.display(), marker);
    }

    if !found_config {
        println!("\nNo configuration file found, defaults are in use.");
        println!("Run 'tilegaps config init' to create one.");
    }
}

/// Print the effective configuration.
fn show_config() -> Result<(), TilegapsError> {
    let handle = config::init();

    match config::get_config_path() {
        Some(path) => eprintln!("{}", format!("# {}", path.display()).dimmed()),
        None => eprintln!("{}", "# defaults".dimmed()),
    }

    output::print_highlighted_json(&serde_json::to_value(handle.snapshot())?);
    Ok(())
}
