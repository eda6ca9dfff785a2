//! Check command implementation.
//!
//! Validates the descriptor and the entry manifests without building.

use wasmroll_config::{ConfigValidator, FsValidator};

use crate::cli::CheckArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load and resolve the descriptor
/// 2. Check the plugin pipeline shape
/// 3. Check that every entry manifest exists
///
/// # Errors
///
/// Returns the first validation failure.
pub fn execute(args: CheckArgs) -> Result<()> {
    ui::info("Checking descriptor...");

    let loaded = utils::load_descriptor(&args.descriptor)?;
    ui::success(&format!("{} resolves", loaded.source.display()));

    if let Err(err) = FsValidator::new(&loaded.root).validate(&loaded.descriptor) {
        ui::error("Descriptor check failed");
        return Err(err.into());
    }

    for (name, path) in loaded.descriptor.manifest_paths(&loaded.root) {
        ui::success(&format!("  {} -> {}", name, path.display()));
    }

    ui::success(&format!(
        "All checks passed ({} plugins, watch = {})",
        loaded.descriptor.plugins().len(),
        loaded.descriptor.watch()
    ));
    Ok(())
}
