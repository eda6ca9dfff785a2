//! Error types for descriptor resolution and loading.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Resolution errors
    #[error("invalid entry point '{name}': {reason}")]
    InvalidEntry { name: String, reason: String },

    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("invalid plugin #{index} ({name}): {reason}")]
    InvalidPlugin {
        index: usize,
        name: String,
        reason: String,
    },

    #[error("invalid config value for '{field}': {hint}")]
    InvalidValue { field: String, hint: String },

    // Filesystem validation errors (for CLI use)
    #[error("entry manifest for '{name}' not found: {}", .path.display())]
    EntryNotFound { name: String, path: PathBuf },

    // Config loading errors
    #[error("no wasmroll.toml or wasmroll.json found in {}", .0.display())]
    NotFound(PathBuf),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid_entry(name: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidEntry {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_plugin(
        index: usize,
        name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidPlugin {
            index,
            name: name.into(),
            reason: reason.into(),
        }
    }
}
