//! Error handling for the wasmroll CLI.
//!
//! Library failures arrive as [`ConfigError`] and are wrapped in [`CliError`];
//! `main` turns the final error into a `miette` report with a hint.

use std::path::PathBuf;

use miette::Report;
use thiserror::Error;
use wasmroll_config::ConfigError;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Descriptor loading, resolution or validation failed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Invalid command-line arguments or options
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors with a custom message
    #[error("{0}")]
    Custom(String),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            match err {
                CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                    CliError::FileNotFound(path.as_ref().to_path_buf())
                }
                other => other,
            }
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}

/// Hint shown under the error message
fn hint(err: &CliError) -> Option<&'static str> {
    match err {
        CliError::Config(config) => match config {
            ConfigError::InvalidEntry { .. } => {
                Some("Each entry needs a unique, non-empty name and a manifest path")
            }
            ConfigError::UnsupportedFormat(_) => {
                Some("Supported formats: es, cjs, iife, umd, amd, system")
            }
            ConfigError::InvalidPlugin { .. } => Some(
                "Known plugins: rust, terser, serve, livereload. Unknown option keys are rejected",
            ),
            ConfigError::EntryNotFound { .. } => {
                Some("Entry paths are resolved relative to the descriptor file")
            }
            ConfigError::NotFound(_) => {
                Some("Run 'wasmroll init' or pass --config <path>")
            }
            ConfigError::InvalidValue { .. } => Some("Check the descriptor syntax and field types"),
            ConfigError::Io(_) => None,
        },
        CliError::FileNotFound(_) => Some("Check the path passed on the command line"),
        _ => None,
    }
}

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match hint(&err) {
        Some(help) => miette::miette!(help = help, "{}", err),
        None => miette::miette!("{}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_from_config_error() {
        let cli_err: CliError = ConfigError::UnsupportedFormat("xyz".to_string()).into();
        assert!(matches!(cli_err, CliError::Config(_)));
        assert_eq!(cli_err.to_string(), "unsupported output format: xyz");
    }

    #[test]
    fn test_result_ext_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));

        let err = result.with_path("/test/wasmroll.toml").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::NotFound(PathBuf::from("/project")));

        let err = result.context("Failed to load descriptor").unwrap_err();
        assert!(err.to_string().starts_with("Failed to load descriptor: "));
    }

    #[test]
    fn test_miette_report_carries_hint() {
        let report = cli_error_to_miette(ConfigError::UnsupportedFormat("xyz".into()).into());
        let help = report.help().map(|h| h.to_string());
        assert_eq!(
            help.as_deref(),
            Some("Supported formats: es, cjs, iife, umd, amd, system")
        );
    }
}
