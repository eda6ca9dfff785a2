//! Build descriptor resolution for WASM-producing bundler pipelines.
//!
//! A descriptor names the entry manifests, the output target and an ordered
//! plugin chain (rust -> wasm compile, minify, and in watch mode a static
//! server plus live-reload). [`resolve`] validates it against the watch flag
//! and produces an immutable [`BuildDescriptor`] for a [`BuildRuntime`].
//!
//! # Example
//!
//! ```
//! use wasmroll_config::{PluginInvocation, RawDescriptor, RawPlugin};
//! use serde_json::json;
//!
//! let raw = RawDescriptor::builder()
//!     .entry("popup", "./Cargo.toml")
//!     .output("dist/js", "es")
//!     .sourcemap(true)
//!     .plugin(RawPlugin::new("rust", json!({ "serverPath": "js/" })))
//!     .plugin(RawPlugin::named("terser"))
//!     .build();
//!
//! let descriptor = raw.resolve(false).unwrap();
//! assert!(matches!(descriptor.plugins()[1], PluginInvocation::Minify(_)));
//! ```

pub mod descriptor;
pub mod discovery;
pub mod entry;
pub mod env;
pub mod error;
pub mod output;
pub mod plugin;
pub mod runtime;
pub mod validation;

// Re-export main types
pub use descriptor::{BuildDescriptor, DescriptorBuilder, RawDescriptor, resolve};
pub use entry::{EntryDecl, RawEntries, resolve_entry_points};
pub use error::{ConfigError, Result};
pub use output::{OutputFormat, OutputSpec, RawOutput, resolve_output};
pub use plugin::{
    CompileToWasmOptions, Gate, LiveReloadOptions, MinifyOptions, PluginDecl, PluginInvocation,
    PluginKind, RawPlugin, ServeOptions, resolve_plugins,
};
pub use runtime::BuildRuntime;

// Re-export discovery, env and validation
pub use discovery::{ConfigDiscovery, load_from};
pub use env::{WATCH_ENV_VAR, parse_watch_flag, watch_flag_from_env};
pub use validation::{ConfigValidator, FsValidator, SchemaValidator, validate_schema};
