//! Schema command implementation.
//!
//! Prints the JSON Schema of the descriptor file format, for editor
//! integration.

use std::io::Write;

use wasmroll_config::RawDescriptor;

use crate::error::Result;

/// Execute the schema command.
pub fn execute() -> Result<()> {
    let schema = RawDescriptor::json_schema();
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", serde_json::to_string_pretty(&schema)?)?;
    Ok(())
}
