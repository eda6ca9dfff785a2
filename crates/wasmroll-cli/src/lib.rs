//! wasmroll CLI - resolve and check bundler build descriptors.
//!
//! This crate wraps `wasmroll-config` in a command-line interface. The
//! resolved plan is emitted as JSON for the bundler runtime.
//!
//! # Architecture
//!
//! - [`cli`] - Argument definitions
//! - [`commands`] - One module per subcommand
//! - [`error`] - CLI errors and their `miette` rendering
//! - [`logger`] - `tracing` subscriber setup
//! - [`runtime`] - The JSON plan runtime
//! - [`ui`] - Terminal messages

pub mod cli;
pub mod commands;
pub mod error;
pub mod logger;
pub mod runtime;
pub mod ui;

pub use error::{CliError, Result, ResultExt};
pub use runtime::JsonPlanRuntime;
