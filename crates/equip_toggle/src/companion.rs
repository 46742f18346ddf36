//! # Companion Files
//!
//! Each host save `<name>.ess` gets a companion co-save
//! `<name>.<extension>` in the same directory. The host refers to saves by
//! name, with or without the `.ess` suffix; both map to the same companion.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::config::CompanionConfig;
use crate::error::{PluginError, PluginResult};

/// Extension of the host's own save files.
pub const SAVE_EXTENSION: &str = "ess";

/// Locates and manages companion co-save files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompanionFiles {
    directory: PathBuf,
    extension: String,
}

impl CompanionFiles {
    /// Companion files with `extension` inside `directory`.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            extension: extension.into(),
        }
    }

    /// Builds the locator from the `[companion]` section.
    #[must_use]
    pub fn from_config(config: &CompanionConfig) -> Self {
        Self::new(config.directory.clone(), config.extension.clone())
    }

    /// The save directory.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the companion file for `save`.
    #[must_use]
    pub fn path_for(&self, save: &str) -> PathBuf {
        self.directory
            .join(format!("{}.{}", save_stem(save), self.extension))
    }

    /// Writes the companion file for `save`, creating the directory first.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Companion`] on any I/O failure.
    pub fn write(&self, save: &str, bytes: &[u8]) -> PluginResult<PathBuf> {
        let path = self.path_for(save);
        fs::create_dir_all(&self.directory).map_err(|source| companion_error(&self.directory, source))?;
        fs::write(&path, bytes).map_err(|source| companion_error(&path, source))?;
        debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }

    /// Reads the companion file for `save`, or `None` if there is none.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Companion`] if the file exists but cannot be read.
    pub fn read(&self, save: &str) -> PluginResult<Option<Vec<u8>>> {
        let path = self.path_for(save);
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(companion_error(&path, source)),
        }
    }

    /// Deletes the companion file for `save`.
    ///
    /// Returns whether a file was removed.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Companion`] if the file exists but cannot be removed.
    pub fn delete(&self, save: &str) -> PluginResult<bool> {
        let path = self.path_for(save);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(companion_error(&path, source)),
        }
    }

    /// Deletes every companion file whose save no longer exists.
    ///
    /// Returns the number of files removed. A missing directory counts as
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Companion`] if the directory cannot be listed
    /// or an orphan cannot be removed.
    pub fn clear_unreferenced(&self) -> PluginResult<usize> {
        let entries = match fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(source) => return Err(companion_error(&self.directory, source)),
        };

        let mut removed = 0;
        for entry in entries {
            let path = entry.map_err(|source| companion_error(&self.directory, source))?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let save = self.directory.join(format!("{stem}.{SAVE_EXTENSION}"));
            if !save.exists() {
                fs::remove_file(&path).map_err(|source| companion_error(&path, source))?;
                removed += 1;
            }
        }

        if removed > 0 {
            info!("Removed {removed} unreferenced companion files");
        }
        Ok(removed)
    }
}

/// Strips any directory and a trailing `.ess` from a save name.
#[must_use]
pub fn save_stem(save: &str) -> &str {
    let name = save.rsplit(['/', '\\']).next().unwrap_or(save);
    name.strip_suffix(".ess").unwrap_or(name)
}

fn companion_error(path: &Path, source: io::Error) -> PluginError {
    PluginError::Companion {
        path: path.to_path_buf(),
        source,
    }
}
