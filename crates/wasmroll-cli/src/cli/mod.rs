//! Command-line interface definition for wasmroll.
//!
//! # Command Structure
//!
//! - `wasmroll resolve` - Resolve a descriptor into a JSON build plan
//! - `wasmroll check` - Validate a descriptor and its entry manifests
//! - `wasmroll init` - Write a descriptor from a template
//! - `wasmroll schema` - Print the descriptor JSON Schema

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// wasmroll - resolve bundler build descriptors for Rust/WASM apps
#[derive(Parser, Debug)]
#[command(
    name = "wasmroll",
    version,
    about = "Resolve bundler build descriptors for Rust/WASM apps",
    long_about = "wasmroll reads a wasmroll.toml (or wasmroll.json) descriptor, applies the\n\
                  watch flag to its plugin chain, validates it, and emits the resolved build\n\
                  plan as JSON for the bundler runtime."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available wasmroll subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the descriptor and print the build plan
    ///
    /// Watch-gated plugins are included when --watch is passed or
    /// ROLLUP_WATCH is set to a truthy value.
    Resolve(ResolveArgs),

    /// Validate the descriptor and check that entry manifests exist
    Check(CheckArgs),

    /// Write a wasmroll.toml from a built-in template
    Init(InitArgs),

    /// Print the JSON Schema of the descriptor file
    Schema,
}

/// Options shared by commands that load a descriptor
#[derive(Args, Debug, Clone, Default)]
pub struct DescriptorArgs {
    /// Descriptor file (defaults to wasmroll.toml, then wasmroll.json)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory to search for the descriptor
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Resolve in watch mode (overrides ROLLUP_WATCH)
    #[arg(short, long)]
    pub watch: bool,
}

/// Arguments for the resolve command
#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub descriptor: DescriptorArgs,

    /// Write the plan to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Print compact JSON
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the check command
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub descriptor: DescriptorArgs,
}

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Template to start from
    #[arg(short, long, value_enum, default_value = "todomvc")]
    pub template: Template,

    /// Directory to write wasmroll.toml into
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    /// Overwrite an existing wasmroll.toml
    #[arg(long)]
    pub force: bool,
}

/// Built-in descriptor templates
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Template {
    /// Browser extension popup: ES module output, compile then minify
    Extension,

    /// Single-page app: IIFE output, compile only
    Todomvc,

    /// Single-page app with a static server and live-reload in watch mode
    Dev,
}
