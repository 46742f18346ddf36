//! # Logging Bootstrap
//!
//! Installs the global `tracing` subscriber. `RUST_LOG` wins over the
//! configured level when set.

use std::fs::File;
use std::sync::Mutex;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{PluginError, PluginResult};

/// Installs the global subscriber described by `config`.
///
/// Returns `false` if a subscriber was already installed; the existing one
/// is kept.
///
/// # Errors
///
/// Fails if the filter directive is malformed or the log file cannot be
/// created.
pub fn init(config: &LoggingConfig) -> PluginResult<bool> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|err| PluginError::Logging(format!("bad level {:?}: {err}", config.level)))?,
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true);

    let installed = match &config.log_file {
        Some(path) => {
            let file = File::create(path)
                .map_err(|err| PluginError::Logging(format!("{}: {err}", path.display())))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .is_ok()
        }
        None => builder.with_writer(std::io::stderr).try_init().is_ok(),
    };

    if installed {
        info!("{} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }
    Ok(installed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_is_harmless() {
        let config = LoggingConfig::default();
        assert!(init(&config).is_ok());
        assert!(!init(&config).unwrap());
    }

    #[test]
    fn test_bad_level_rejected() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "equip_toggle=loudest".to_string(),
            log_file: None,
        };
        assert!(matches!(init(&config), Err(PluginError::Logging(_))));
    }
}
