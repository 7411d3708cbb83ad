//! Configuration types for tilegaps.
//!
//! This module provides the configuration types and loading functionality.
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Default size of every gap, in pixels.
pub const DEFAULT_GAP: u32 = 12;

// ============================================================================
// Gap Configuration
// ============================================================================

/// Gap sizes in pixels.
///
/// The four outer gaps separate windows from the edges of the screen; `mid`
/// separates two adjacent windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct GapsConfig {
    /// Gap between windows and the top edge of the screen.
    /// Default: 12
    pub top: u32,

    /// Gap between windows and the left edge of the screen.
    /// Default: 12
    pub left: u32,

    /// Gap between windows and the right edge of the screen.
    /// Default: 12
    pub right: u32,

    /// Gap between windows and the bottom edge of the screen.
    /// Default: 12
    pub bottom: u32,

    /// Gap between two adjacent windows.
    /// Default: 12
    pub mid: u32,
}

impl Default for GapsConfig {
    fn default() -> Self {
        Self {
            top: DEFAULT_GAP,
            left: DEFAULT_GAP,
            right: DEFAULT_GAP,
            bottom: DEFAULT_GAP,
            mid: DEFAULT_GAP,
        }
    }
}

/// Space reserved along each screen edge, in pixels.
///
/// Offsets are subtracted from the work area reported by the window system,
/// leaving room for panels that float above the desktop and do not reserve
/// space themselves.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct OffsetsConfig {
    /// Space reserved at the top of the screen.
    pub top: u32,
    /// Space reserved at the left of the screen.
    pub left: u32,
    /// Space reserved at the right of the screen.
    pub right: u32,
    /// Space reserved at the bottom of the screen.
    pub bottom: u32,
}

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure for tilegaps.
///
/// Every field has a default, so an empty file (or no file at all) yields a
/// working configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct TilegapsConfig {
    /// Gap sizes.
    pub gaps: GapsConfig,

    /// Space reserved along the screen edges for floating panels.
    pub offsets: OffsetsConfig,

    /// Whether maximized windows are gapped too.
    ///
    /// When false, a window that is flagged maximized or that exactly fills its
    /// work area is left alone.
    /// Default: false
    pub include_maximized: bool,
}

// ============================================================================
// Loading
// ============================================================================

/// Errors that can occur when loading the configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// No configuration file was found in any of the expected locations.
    NotFound,
    /// The configuration file exists but could not be read.
    IoError(std::io::Error),
    /// The configuration file contains invalid JSON.
    ParseError(serde_json::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => write!(
                f,
                "No configuration file found. Expected at ~/.config/tilegaps/config.jsonc \
                or ~/.tilegaps.jsonc"
            ),
            Self::IoError(err) => write!(f, "Failed to read configuration file: {err}"),
            Self::ParseError(err) => write!(f, "Failed to parse configuration file: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            Self::ParseError(err) => Some(err),
            Self::NotFound => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err) }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self { Self::ParseError(err) }
}

/// Configuration file names to search for (in priority order).
const CONFIG_FILE_NAMES: &[&str] = &["config.jsonc", "config.json"];

/// Configuration file names in the home directory.
const HOME_CONFIG_FILE_NAMES: &[&str] = &[".tilegaps.jsonc", ".tilegaps.json"];

/// Name of the per-application configuration directory.
const APP_DIR: &str = "tilegaps";

/// Adds the config file names inside `dir`, skipping paths already listed.
///
/// `$XDG_CONFIG_HOME` is often `~/.config`, so the same directory may come up twice.
fn push_config_files(dir: &Path, paths: &mut Vec<PathBuf>) {
    for filename in CONFIG_FILE_NAMES {
        let path = dir.join(filename);
        if !paths.contains(&path) {
            paths.push(path);
        }
    }
}

/// Returns the possible configuration file paths in priority order.
///
/// The function checks the following locations (both `.jsonc` and `.json` variants):
/// 1. `$XDG_CONFIG_HOME/tilegaps/config.jsonc`, if the variable is set
/// 2. `~/.config/tilegaps/config.jsonc`
/// 3. The platform configuration directory (`dirs::config_dir()`)
/// 4. `~/.tilegaps.jsonc`
#[must_use]
pub fn config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        push_config_files(&PathBuf::from(xdg_config).join(APP_DIR), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        push_config_files(&home.join(".config").join(APP_DIR), &mut paths);
    }

    if let Some(config_dir) = dirs::config_dir() {
        push_config_files(&config_dir.join(APP_DIR), &mut paths);
    }

    if let Some(home) = dirs::home_dir() {
        for filename in HOME_CONFIG_FILE_NAMES {
            paths.push(home.join(filename));
        }
    }

    paths
}

/// Loads the configuration from the first available config file.
///
/// # Returns
///
/// The parsed configuration together with the path it was read from.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if no configuration file exists in any of the expected locations.
/// Returns `ConfigError::IoError` if a configuration file exists but could not be read.
/// Returns `ConfigError::ParseError` if the configuration file contains invalid JSON.
pub fn load_config() -> Result<(TilegapsConfig, PathBuf), ConfigError> {
    config_paths()
        .into_iter()
        .find(|path| path.exists())
        .map_or(Err(ConfigError::NotFound), load_config_from_path)
}

/// Loads the configuration from a specific file.
///
/// Comments are stripped before parsing.
///
/// # Errors
///
/// Returns `ConfigError::NotFound` if the file does not exist, and the same
/// I/O and parse errors as [`load_config`] otherwise.
pub fn load_config_from_path(path: impl AsRef<Path>) -> Result<(TilegapsConfig, PathBuf), ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::NotFound);
    }

    let file = fs::File::open(path)?;
    let reader = json_comments::StripComments::new(file);
    let config: TilegapsConfig = serde_json::from_reader(reader)?;
    Ok((config, path.to_path_buf()))
}

/// Parses a configuration from a JSONC string.
///
/// # Errors
///
/// Returns `ConfigError::ParseError` if the string is not valid JSON once
/// comments are removed.
pub fn parse_config(source: &str) -> Result<TilegapsConfig, ConfigError> {
    let reader = json_comments::StripComments::new(source.as_bytes());
    Ok(serde_json::from_reader(reader)?)
}
