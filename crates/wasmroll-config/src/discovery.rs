//! File-based descriptor discovery for CLI use
//!
//! Library users can build a [`RawDescriptor`] in code or through
//! [`RawDescriptor::from_value`] instead.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Json, Toml};

use crate::descriptor::RawDescriptor;
use crate::entry::duplicate_json_entry;
use crate::error::{ConfigError, Result};

/// Descriptor file names, in lookup order
pub const CONFIG_FILE_NAMES: [&str; 2] = ["wasmroll.toml", "wasmroll.json"];

/// Prefix of environment overrides (`WASMROLL_OUTPUT__DIR=build`)
pub const ENV_PREFIX: &str = "WASMROLL_";

/// File-based descriptor discovery
///
/// # Example
///
/// ```no_run
/// use wasmroll_config::ConfigDiscovery;
///
/// let raw = ConfigDiscovery::new(".").load().unwrap();
/// let descriptor = raw.resolve(false).unwrap();
/// ```
pub struct ConfigDiscovery {
    root: PathBuf,
}

impl ConfigDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Find a descriptor file in the root directory
    ///
    /// `wasmroll.toml` wins over `wasmroll.json` when both exist.
    pub fn find(&self) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| self.root.join(name))
            .find(|path| path.is_file())
    }

    /// Load the discovered descriptor
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` if no descriptor file is found.
    pub fn load(&self) -> Result<RawDescriptor> {
        let path = self
            .find()
            .ok_or_else(|| ConfigError::NotFound(self.root.clone()))?;
        load_from(&path)
    }
}

/// Load a descriptor from a specific file, merged with `WASMROLL_`
/// environment overrides for the `input` and `output` sections.
///
/// The format follows the extension: `.json` is JSON, everything else TOML.
pub fn load_from(path: &Path) -> Result<RawDescriptor> {
    if !path.is_file() {
        return Err(ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("descriptor file not found: {}", path.display()),
        )));
    }

    tracing::debug!("Loading descriptor from: {}", path.display());

    let figment = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => {
            let content = std::fs::read_to_string(path)?;
            // figment collapses repeated object keys; TOML already rejects them
            if let Some(name) = duplicate_json_entry(&content) {
                return Err(ConfigError::InvalidEntry {
                    name,
                    reason: "entry name is declared twice".to_string(),
                });
            }
            Figment::from(Json::string(&content))
        }
        _ => Figment::from(Toml::file(path)),
    };

    figment
        .merge(env_overrides())
        .extract()
        .map_err(|e| ConfigError::InvalidValue {
            field: path.display().to_string(),
            hint: e.to_string(),
        })
}

fn env_overrides() -> Env {
    Env::prefixed(ENV_PREFIX)
        .filter(|key| {
            let key = key.as_str().to_ascii_lowercase();
            key.starts_with("input__") || key.starts_with("output__")
        })
        .split("__")
}
