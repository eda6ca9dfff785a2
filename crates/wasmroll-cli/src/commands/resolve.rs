//! Resolve command implementation.
//!
//! Loads the descriptor, applies the watch flag, checks the pipeline shape
//! and hands the plan to the JSON runtime.

use wasmroll_config::{BuildRuntime, validate_schema};

use crate::cli::ResolveArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::runtime::JsonPlanRuntime;
use crate::ui;

/// Execute the resolve command.
///
/// # Errors
///
/// Returns errors for a missing or malformed descriptor, any resolution
/// failure, or when the plan cannot be written.
pub fn execute(args: ResolveArgs) -> Result<()> {
    let loaded = utils::load_descriptor(&args.descriptor)?;
    validate_schema(&loaded.descriptor)?;

    tracing::info!(
        source = %loaded.source.display(),
        plugins = loaded.descriptor.plugins().len(),
        watch = loaded.descriptor.watch(),
        "descriptor resolved"
    );

    let mut runtime = JsonPlanRuntime::new(args.out.clone(), !args.compact);
    runtime.execute(loaded.descriptor)?;

    if let Some(out) = &args.out {
        ui::success(&format!("Wrote build plan to {}", out.display()));
    }
    Ok(())
}
