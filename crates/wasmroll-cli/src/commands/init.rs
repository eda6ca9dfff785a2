//! Init command implementation.
//!
//! Writes a wasmroll.toml from one of the built-in templates.

use std::fs;
use std::path::PathBuf;

use wasmroll_config::RawDescriptor;

use crate::cli::InitArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;

/// File name written by `init`.
pub const DESCRIPTOR_FILE: &str = "wasmroll.toml";

/// Execute the init command.
///
/// # Errors
///
/// Returns errors when the target directory does not exist or a descriptor
/// is already present and `--force` was not given.
pub fn execute(args: InitArgs) -> Result<()> {
    let dir = match &args.cwd {
        Some(dir) => dir.clone(),
        None => utils::get_cwd()?,
    };
    if !dir.is_dir() {
        return Err(CliError::FileNotFound(dir));
    }

    let path = write_template(&args, dir)?;

    ui::success(&format!(
        "Created {} from the {} template",
        path.display(),
        args.template.name()
    ));
    ui::info("Next: wasmroll check && wasmroll resolve --watch");
    Ok(())
}

fn write_template(args: &InitArgs, dir: PathBuf) -> Result<PathBuf> {
    let path = dir.join(DESCRIPTOR_FILE);
    if path.exists() {
        if !args.force {
            return Err(CliError::InvalidArgument(format!(
                "{} already exists in {} (use --force to overwrite)",
                DESCRIPTOR_FILE,
                dir.display()
            )));
        }
        ui::warning(&format!("Overwriting {}", path.display()));
    }

    let contents = args.template.contents();
    // Templates ship with the binary; refuse to write one that no longer parses.
    RawDescriptor::from_toml_str(contents)?;

    fs::write(&path, contents)?;
    tracing::debug!(path = %path.display(), template = args.template.name(), "wrote descriptor");
    Ok(path)
}
