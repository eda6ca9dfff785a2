//! Output target settings.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Module format of the emitted bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// ES module (`import`/`export`)
    #[default]
    Es,
    /// CommonJS (`require`/`module.exports`)
    Cjs,
    /// Immediately invoked function expression, for plain `<script>` tags
    Iife,
    /// Universal module definition
    Umd,
    /// Asynchronous module definition
    Amd,
    /// SystemJS loader format
    System,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 6] = [
        OutputFormat::Es,
        OutputFormat::Cjs,
        OutputFormat::Iife,
        OutputFormat::Umd,
        OutputFormat::Amd,
        OutputFormat::System,
    ];

    /// Canonical name, as handed to the bundler runtime
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Es => "es",
            OutputFormat::Cjs => "cjs",
            OutputFormat::Iife => "iife",
            OutputFormat::Umd => "umd",
            OutputFormat::Amd => "amd",
            OutputFormat::System => "system",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    /// Accepts the canonical names plus the aliases rollup understands.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" | "esm" | "module" => Ok(OutputFormat::Es),
            "cjs" | "commonjs" => Ok(OutputFormat::Cjs),
            "iife" => Ok(OutputFormat::Iife),
            "umd" => Ok(OutputFormat::Umd),
            "amd" => Ok(OutputFormat::Amd),
            "system" | "systemjs" => Ok(OutputFormat::System),
            _ => Err(ConfigError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Output section as written in a descriptor. `format` stays a string so
/// that an unknown value surfaces as `UnsupportedFormat` rather than a
/// generic deserialization failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RawOutput {
    #[serde(default = "default_dir")]
    pub dir: String,

    #[serde(default = "default_format")]
    pub format: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sourcemap: Option<bool>,
}

impl Default for RawOutput {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            format: default_format(),
            sourcemap: None,
        }
    }
}

fn default_dir() -> String {
    "dist".to_string()
}

fn default_format() -> String {
    OutputFormat::default().as_str().to_string()
}

/// Resolved output target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputSpec {
    pub dir: PathBuf,
    pub format: OutputFormat,
    pub sourcemap: bool,
}

/// Validate the output section.
///
/// # Example
///
/// ```
/// use wasmroll_config::{resolve_output, OutputFormat, RawOutput};
///
/// let raw = RawOutput { dir: "dist/js".into(), format: "iife".into(), sourcemap: None };
/// let output = resolve_output(&raw).unwrap();
/// assert_eq!(output.format, OutputFormat::Iife);
/// assert!(!output.sourcemap);
/// ```
pub fn resolve_output(raw: &RawOutput) -> Result<OutputSpec> {
    if raw.dir.trim().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "output.dir".to_string(),
            hint: "output directory cannot be empty".to_string(),
        });
    }

    let format = raw.format.parse::<OutputFormat>()?;

    Ok(OutputSpec {
        dir: PathBuf::from(&raw.dir),
        format,
        sourcemap: raw.sourcemap.unwrap_or(false),
    })
}
