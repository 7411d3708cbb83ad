//! Configuration module for tilegaps.
//!
//! This module provides configuration types, loading functionality, and file watching
//! for hot-reloading configuration changes.
//!
//! The configuration file supports JSONC format (JSON with comments).
//! Both single-line (`//`) and multi-line (`/* */`) comments are allowed.

pub mod template;
pub mod types;
mod watcher;

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;
pub use types::{
    ConfigError, DEFAULT_GAP, GapsConfig, OffsetsConfig, TilegapsConfig, config_paths,
    load_config as load_config_default, load_config_from_path, parse_config,
};
pub use watcher::{reload_config, watch_config_file};

/// Path to the currently loaded configuration file.
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Custom config path override (set via CLI --config flag).
static CUSTOM_CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Shared, swappable configuration.
///
/// Readers take a [`snapshot`](Self::snapshot) at the start of a pass so one
/// pass never sees two different configurations. The watcher thread replaces
/// the value wholesale.
#[derive(Debug, Clone, Default)]
pub struct ConfigHandle {
    inner: Arc<RwLock<TilegapsConfig>>,
}

impl ConfigHandle {
    /// Wraps a configuration in a new handle.
    #[must_use]
    pub fn new(config: TilegapsConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Returns a copy of the current configuration.
    #[must_use]
    pub fn snapshot(&self) -> TilegapsConfig { self.inner.read().clone() }

    /// Replaces the configuration.
    pub fn replace(&self, config: TilegapsConfig) { *self.inner.write() = config; }
}

/// Sets a custom configuration file path to use instead of the default search paths.
///
/// This must be called before `init()` to take effect.
///
/// # Returns
///
/// `true` if the path was set successfully, `false` if a path was already set.
pub fn set_custom_config_path(path: PathBuf) -> bool { CUSTOM_CONFIG_PATH.set(path).is_ok() }

/// Returns the custom configuration path, if one was set.
pub fn get_custom_config_path() -> Option<&'static PathBuf> { CUSTOM_CONFIG_PATH.get() }

/// Loads the configuration, falling back to defaults.
///
/// A missing file is not an error. An unreadable or malformed file is logged
/// and replaced by the defaults.
///
/// # Arguments
///
/// * `custom` - An explicit path to load instead of searching the default locations
///
/// # Returns
///
/// The configuration, and the path it was read from if a file was found.
#[must_use]
pub fn load_or_default(custom: Option<&Path>) -> (TilegapsConfig, Option<PathBuf>) {
    let result = custom.map_or_else(load_config_default, load_config_from_path);

    match result {
        Ok((config, path)) => {
            tracing::debug!(path = %path.display(), "loaded configuration");
            (config, Some(path))
        }
        Err(ConfigError::NotFound) => {
            if let Some(path) = custom {
                tracing::warn!(path = %path.display(), "configuration file not found, using defaults");
            } else {
                tracing::debug!("no configuration file found, using defaults");
            }
            (TilegapsConfig::default(), custom.map(Path::to_path_buf))
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load configuration, using defaults");
            let path = custom.map(Path::to_path_buf).or_else(|| {
                config_paths().into_iter().find(|path| path.exists())
            });
            (TilegapsConfig::default(), path)
        }
    }
}

/// Loads the configuration and wraps it in a [`ConfigHandle`].
///
/// Honors the path set with [`set_custom_config_path`] and remembers the
/// file that was used, which [`get_config_path`] then returns.
#[must_use]
pub fn init() -> ConfigHandle {
    let (config, path) = load_or_default(get_custom_config_path().map(PathBuf::as_path));
    if let Some(path) = path {
        let _ = CONFIG_PATH.set(path);
    }
    ConfigHandle::new(config)
}

/// Returns the path to the loaded configuration file, if any.
pub fn get_config_path() -> Option<&'static PathBuf> { CONFIG_PATH.get() }
