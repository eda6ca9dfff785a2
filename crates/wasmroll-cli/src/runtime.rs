//! JSON plan runtime.
//!
//! The bundler itself runs outside this process; the CLI's runtime hands it
//! the resolved plan as JSON, on stdout or in a file.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use wasmroll_config::{BuildDescriptor, BuildRuntime};

use crate::error::{CliError, Result, ResultExt};

/// Writes each resolved plan as JSON.
#[derive(Debug, Clone)]
pub struct JsonPlanRuntime {
    out: Option<PathBuf>,
    pretty: bool,
}

impl JsonPlanRuntime {
    /// `out = None` writes to stdout.
    pub fn new(out: Option<PathBuf>, pretty: bool) -> Self {
        Self { out, pretty }
    }

    fn render(&self, descriptor: &BuildDescriptor) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(descriptor)?
        } else {
            serde_json::to_string(descriptor)?
        };
        Ok(json)
    }
}

impl BuildRuntime for JsonPlanRuntime {
    type Output = ();
    type Error = CliError;

    fn execute(&mut self, descriptor: BuildDescriptor) -> Result<()> {
        let json = self.render(&descriptor)?;

        match &self.out {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    fs::create_dir_all(parent)
                        .context(format!("Failed to create {}", parent.display()))?;
                }
                fs::write(path, format!("{json}\n"))
                    .context(format!("Failed to write {}", path.display()))?;
                tracing::debug!(path = %path.display(), "wrote build plan");
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{json}")?;
            }
        }
        Ok(())
    }
}
