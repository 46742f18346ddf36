//! # Plugin Configuration
//!
//! Read once at startup from a TOML file. Every field has a default, so an
//! empty or missing file is a valid configuration.
//!
//! ```toml
//! [logging]
//! level = "debug"
//! log_file = "logs/equip_toggle.log"
//!
//! [toggle]
//! default_state = "hide"
//!
//! [companion]
//! directory = "saves"
//! extension = "etog"
//! ```

use equip_toggle_core::SlotState;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult};

/// Top-level plugin configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Toggle API settings.
    pub toggle: ToggleConfig,
    /// Companion co-save file settings.
    pub companion: CompanionConfig,
}

/// `[logging]` section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `"debug"` or `"equip_toggle=trace"`.
    pub level: String,
    /// Write to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            log_file: None,
        }
    }
}

/// `[toggle]` section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToggleConfig {
    /// State reported and recorded for a slot nobody has toggled yet.
    pub default_state: SlotState,
}

/// `[companion]` section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanionConfig {
    /// Directory holding the host saves and their companion files.
    pub directory: PathBuf,
    /// Extension of companion files, without the dot.
    pub extension: String,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("saves"),
            extension: "etog".to_string(),
        }
    }
}

impl PluginConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML or unknown values.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Loads the configuration at `path`, falling back to defaults if the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] if the file exists but cannot be read,
    /// and [`ConfigError::Parse`] if it is malformed.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}
