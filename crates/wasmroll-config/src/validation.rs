//! Pluggable validation strategies for resolved descriptors
//!
//! Resolution already guarantees the per-field invariants. These validators
//! check the pipeline as a whole, and optionally the filesystem.

use std::path::{Path, PathBuf};

use crate::descriptor::BuildDescriptor;
use crate::error::{ConfigError, Result};
use crate::plugin::{PluginInvocation, PluginKind};

/// Trait for pluggable descriptor validation strategies
pub trait ConfigValidator {
    fn validate(&self, descriptor: &BuildDescriptor) -> Result<()>;
}

/// Pipeline-shape validation (no filesystem checks)
///
/// - a minify step may not run before the compile step
/// - at most one serve and one live-reload step
/// - serve and live-reload cannot share a port
///
/// # Example
///
/// ```
/// use wasmroll_config::{ConfigValidator, RawDescriptor, RawPlugin, SchemaValidator};
///
/// let descriptor = RawDescriptor::builder()
///     .entry("popup", "./Cargo.toml")
///     .plugin(RawPlugin::named("rust"))
///     .plugin(RawPlugin::named("terser"))
///     .build()
///     .resolve(false)
///     .unwrap();
///
/// SchemaValidator.validate(&descriptor).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, descriptor: &BuildDescriptor) -> Result<()> {
        let plugins = descriptor.plugins();

        if let (Some(minify), Some(compile)) = (
            descriptor.position_of(PluginKind::Minify),
            plugins
                .iter()
                .rposition(|p| p.kind() == PluginKind::CompileToWasm),
        ) {
            if minify < compile {
                return Err(ConfigError::invalid_plugin(
                    descriptor.declared_index(minify),
                    PluginKind::Minify.name(),
                    "minify must come after the rust compile step",
                ));
            }
        }

        for kind in [PluginKind::ServeStatic, PluginKind::LiveReload] {
            let mut positions = plugins
                .iter()
                .enumerate()
                .filter(|(_, p)| p.kind() == kind)
                .map(|(i, _)| i);
            if let (Some(_), Some(second)) = (positions.next(), positions.next()) {
                return Err(ConfigError::invalid_plugin(
                    descriptor.declared_index(second),
                    kind.name(),
                    format!("only one {kind} step is allowed"),
                ));
            }
        }

        let serve_port = plugins.iter().find_map(|p| match p {
            PluginInvocation::ServeStatic(options) => Some(options.port),
            _ => None,
        });
        let reload = plugins.iter().enumerate().find_map(|(i, p)| match p {
            PluginInvocation::LiveReload(options) => Some((i, options.port)),
            _ => None,
        });
        if let (Some(serve_port), Some((index, reload_port))) = (serve_port, reload) {
            if serve_port == reload_port {
                return Err(ConfigError::invalid_plugin(
                    descriptor.declared_index(index),
                    PluginKind::LiveReload.name(),
                    format!("port {reload_port} is already used by the serve step"),
                ));
            }
        }

        if descriptor.position_of(PluginKind::CompileToWasm).is_none() {
            tracing::warn!("no rust compile step configured, entries will not produce wasm");
        }

        Ok(())
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs [`SchemaValidator`] first, then checks that every entry manifest
/// exists below the root directory.
///
/// # Example
///
/// ```no_run
/// use wasmroll_config::{ConfigValidator, FsValidator, RawDescriptor};
///
/// let descriptor = RawDescriptor::builder()
///     .entry("index", "./Cargo.toml")
///     .build()
///     .resolve(false)
///     .unwrap();
///
/// FsValidator::new(".").validate(&descriptor).unwrap();
/// ```
pub struct FsValidator {
    root: PathBuf,
}

impl FsValidator {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ConfigValidator for FsValidator {
    fn validate(&self, descriptor: &BuildDescriptor) -> Result<()> {
        SchemaValidator.validate(descriptor)?;

        for (name, path) in descriptor.manifest_paths(&self.root) {
            if !path.is_file() {
                return Err(ConfigError::EntryNotFound {
                    name: name.to_string(),
                    path,
                });
            }
        }

        Ok(())
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(descriptor: &BuildDescriptor) -> Result<()> {
    SchemaValidator.validate(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::RawDescriptor;
    use crate::plugin::RawPlugin;
    use serde_json::json;

    fn resolve(plugins: Vec<RawPlugin>) -> BuildDescriptor {
        plugins
            .into_iter()
            .fold(RawDescriptor::builder().entry("index", "./Cargo.toml"), |b, p| {
                b.plugin(p)
            })
            .build()
            .resolve(true)
            .unwrap()
    }

    #[test]
    fn accepts_compile_then_minify() {
        let descriptor = resolve(vec![RawPlugin::named("rust"), RawPlugin::named("terser")]);
        assert!(validate_schema(&descriptor).is_ok());
    }

    #[test]
    fn rejects_minify_before_compile() {
        let descriptor = resolve(vec![RawPlugin::named("terser"), RawPlugin::named("rust")]);
        let err = validate_schema(&descriptor).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPlugin { index: 0, .. }));
    }

    #[test]
    fn rejects_duplicate_serve() {
        let descriptor = resolve(vec![
            RawPlugin::named("rust"),
            RawPlugin::new("serve", json!("dist")),
            RawPlugin::new("serve", json!({ "contentBase": "public", "port": 8080 })),
        ]);
        let err = validate_schema(&descriptor).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPlugin { index: 2, .. }));
    }

    #[test]
    fn rejects_shared_port() {
        let descriptor = resolve(vec![
            RawPlugin::named("rust"),
            RawPlugin::new("serve", json!({ "port": 35729 })),
            RawPlugin::new("livereload", json!("dist")),
        ]);
        let err = validate_schema(&descriptor).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPlugin { index: 2, .. }));
    }

    fn resolve_value(value: serde_json::Value, watch: bool) -> BuildDescriptor {
        RawDescriptor::from_value(value).unwrap().resolve(watch).unwrap()
    }

    #[test]
    fn minify_error_points_at_declared_entry() {
        let descriptor = resolve_value(
            json!({
                "input": { "index": "./Cargo.toml" },
                "plugins": [false, { "name": "terser" }, { "name": "rust" }]
            }),
            false,
        );
        let err = validate_schema(&descriptor).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPlugin { index: 1, .. }));
    }

    #[test]
    fn port_error_skips_gated_out_entries() {
        let descriptor = resolve_value(
            json!({
                "input": { "index": "./Cargo.toml" },
                "plugins": [
                    { "name": "rust" },
                    { "name": "terser", "when": "not-watch" },
                    { "name": "serve", "options": { "port": 35729 } },
                    { "name": "livereload", "options": "dist" }
                ]
            }),
            true,
        );
        let err = validate_schema(&descriptor).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPlugin { index: 3, .. }));
    }

    #[test]
    fn dev_pipeline_is_valid() {
        let descriptor = resolve(vec![
            RawPlugin::new("rust", json!({ "serverPath": "js/", "debug": false })),
            RawPlugin::new("serve", json!({ "contentBase": "dist", "open": true })),
            RawPlugin::new("livereload", json!("dist")),
        ]);
        assert!(validate_schema(&descriptor).is_ok());
    }
}
