//! Error types for tilegaps.
//!
//! This module provides the unified error type used by the CLI and the
//! snapshot host. The geometry engine itself never fails.

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur during application execution.
///
/// Serializes as `{"kind": ..., "message": ...}` so it can be reported as JSON.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum TilegapsError {
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// A layout snapshot could not be read or is inconsistent.
    #[error("Snapshot error: {0}")]
    SnapshotError(String),
    /// Generic command error.
    #[error("{0}")]
    CommandError(String),
}

impl From<std::io::Error> for TilegapsError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for TilegapsError {
    fn from(err: serde_json::Error) -> Self { Self::CommandError(err.to_string()) }
}

impl From<ConfigError> for TilegapsError {
    fn from(err: ConfigError) -> Self { Self::ConfigError(err.to_string()) }
}

impl From<String> for TilegapsError {
    fn from(msg: String) -> Self { Self::CommandError(msg) }
}

impl From<&str> for TilegapsError {
    fn from(msg: &str) -> Self { Self::CommandError(msg.to_string()) }
}
