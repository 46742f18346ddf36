//! # Plugin Error Types
//!
//! Configuration and host-integration failures. None of these reach the
//! host: [`crate::PluginContext`] logs them and carries on.

use equip_toggle_persistence::StreamError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading the plugin configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file exists but could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The configuration is not valid TOML for [`crate::PluginConfig`].
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while servicing host messages.
#[derive(Error, Debug)]
pub enum PluginError {
    /// A companion file could not be read, written or removed.
    #[error("companion file {path}: {source}")]
    Companion {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The companion co-save container is damaged.
    #[error(transparent)]
    Stream(#[from] StreamError),

    /// Logging could not be set up.
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

/// Result type for plugin operations.
pub type PluginResult<T> = Result<T, PluginError>;
