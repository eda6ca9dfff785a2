//! Plugin chain resolution.
//!
//! A descriptor lists plugins in the order the bundler applies them. Entries
//! may be gated on the watch flag; gated-out and literal `false` entries are
//! dropped in a single pass, everything else must resolve to a typed
//! [`PluginInvocation`].

mod decl;
mod options;

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};

pub use decl::{Gate, PluginDecl, RawPlugin};

use decl::parse_entry;
pub use options::{CompileToWasmOptions, LiveReloadOptions, MinifyOptions, ServeOptions};

use options::CompileToWasmArgs;

/// The plugin kinds a descriptor can name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PluginKind {
    CompileToWasm,
    Minify,
    ServeStatic,
    LiveReload,
}

impl PluginKind {
    /// Canonical name used in descriptor files
    pub fn name(&self) -> &'static str {
        match self {
            PluginKind::CompileToWasm => "rust",
            PluginKind::Minify => "terser",
            PluginKind::ServeStatic => "serve",
            PluginKind::LiveReload => "livereload",
        }
    }

    /// Option key a bare string or list shorthand expands to
    fn shorthand_key(&self) -> Option<&'static str> {
        match self {
            PluginKind::ServeStatic => Some("contentBase"),
            PluginKind::LiveReload => Some("watch"),
            PluginKind::CompileToWasm | PluginKind::Minify => None,
        }
    }
}

impl fmt::Display for PluginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PluginKind {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rust" | "compile-to-wasm" => Ok(PluginKind::CompileToWasm),
            "terser" | "minify" => Ok(PluginKind::Minify),
            "serve" | "serve-static" => Ok(PluginKind::ServeStatic),
            "livereload" | "live-reload" => Ok(PluginKind::LiveReload),
            _ => Err(()),
        }
    }
}

/// A fully resolved pipeline step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "options", rename_all = "camelCase")]
pub enum PluginInvocation {
    CompileToWasm(CompileToWasmOptions),
    Minify(MinifyOptions),
    ServeStatic(ServeOptions),
    LiveReload(LiveReloadOptions),
}

impl PluginInvocation {
    pub fn kind(&self) -> PluginKind {
        match self {
            PluginInvocation::CompileToWasm(_) => PluginKind::CompileToWasm,
            PluginInvocation::Minify(_) => PluginKind::Minify,
            PluginInvocation::ServeStatic(_) => PluginKind::ServeStatic,
            PluginInvocation::LiveReload(_) => PluginKind::LiveReload,
        }
    }
}

impl RawPlugin {
    /// Resolve into a typed invocation. `index` is the position in the
    /// declared list and only feeds error messages.
    pub fn resolve(&self, index: usize, watch: bool) -> Result<PluginInvocation> {
        let kind: PluginKind = self.name.parse().map_err(|_| {
            ConfigError::invalid_plugin(
                index,
                &self.name,
                "unknown plugin; expected one of rust, terser, serve, livereload",
            )
        })?;

        let invalid = |reason: String| ConfigError::invalid_plugin(index, kind.name(), reason);
        let options = expand_shorthand(&self.options, kind.shorthand_key())
            .map_err(|reason| invalid(reason.to_string()))?;

        let invocation = match kind {
            PluginKind::CompileToWasm => {
                let args: CompileToWasmArgs = parse_options(options).map_err(&invalid)?;
                let options = args.into_options(watch);
                options.validate().map_err(&invalid)?;
                PluginInvocation::CompileToWasm(options)
            }
            PluginKind::Minify => {
                let options: MinifyOptions = parse_options(options).map_err(&invalid)?;
                options.validate().map_err(&invalid)?;
                PluginInvocation::Minify(options)
            }
            PluginKind::ServeStatic => {
                let options: ServeOptions = parse_options(options).map_err(&invalid)?;
                options.validate().map_err(&invalid)?;
                PluginInvocation::ServeStatic(options)
            }
            PluginKind::LiveReload => {
                let options: LiveReloadOptions = parse_options(options).map_err(&invalid)?;
                options.validate().map_err(&invalid)?;
                PluginInvocation::LiveReload(options)
            }
        };

        Ok(invocation)
    }
}

/// Normalize the options value into an object: `null` becomes `{}` and, for
/// kinds that have one, a bare string or list becomes `{ <key>: value }`.
fn expand_shorthand(options: &Value, key: Option<&str>) -> std::result::Result<Value, &'static str> {
    match (options, key) {
        (Value::Null, _) => Ok(Value::Object(Map::new())),
        (Value::Object(_), _) => Ok(options.clone()),
        (Value::String(_) | Value::Array(_), Some(key)) => {
            let mut map = Map::with_capacity(1);
            map.insert(key.to_string(), options.clone());
            Ok(Value::Object(map))
        }
        _ => Err("options must be a table"),
    }
}

fn parse_options<T: DeserializeOwned>(options: Value) -> std::result::Result<T, String> {
    serde_json::from_value(options).map_err(|e| e.to_string())
}

/// Resolve the declared plugin list against the watch flag.
///
/// The result is an order-preserving subsequence of the declarations:
/// gated-out entries and literal `false`/`null` entries are absent, every
/// other entry appears exactly once at its relative position.
///
/// # Errors
///
/// `ConfigError::InvalidPlugin` for an unknown plugin name, invalid options,
/// or a bare `true` entry. Entries whose gate evaluates to false are never
/// inspected.
///
/// # Example
///
/// ```
/// use wasmroll_config::{resolve_plugins, PluginDecl, PluginKind, RawPlugin};
/// use serde_json::json;
///
/// let decls = vec![
///     PluginDecl::always(RawPlugin::new("rust", json!({ "serverPath": "js/" }))),
///     PluginDecl::when_watch(RawPlugin::new("livereload", json!("dist"))),
/// ];
///
/// let plugins = resolve_plugins(&decls, false).unwrap();
/// assert_eq!(plugins.len(), 1);
/// assert_eq!(plugins[0].kind(), PluginKind::CompileToWasm);
/// ```
pub fn resolve_plugins(raw: &[PluginDecl], watch: bool) -> Result<Vec<PluginInvocation>> {
    Ok(resolve_plugin_chain(raw, watch)?
        .into_iter()
        .map(|(_, invocation)| invocation)
        .collect())
}

/// Like [`resolve_plugins`], pairing each invocation with the index it was
/// declared at.
pub(crate) fn resolve_plugin_chain(
    raw: &[PluginDecl],
    watch: bool,
) -> Result<Vec<(usize, PluginInvocation)>> {
    let mut resolved = Vec::with_capacity(raw.len());

    for (index, decl) in raw.iter().enumerate() {
        if let Some(invocation) = resolve_decl(index, decl, watch)? {
            tracing::debug!(index, kind = %invocation.kind(), "resolved plugin");
            resolved.push((index, invocation));
        }
    }

    Ok(resolved)
}

fn resolve_decl(index: usize, decl: &PluginDecl, watch: bool) -> Result<Option<PluginInvocation>> {
    let plugin = match decl {
        PluginDecl::Unconditional(plugin) => plugin,
        PluginDecl::Conditional(gate, plugin) => {
            if !gate.evaluate(watch) {
                tracing::debug!(index, plugin = %plugin.name, ?gate, "plugin gated out");
                return Ok(None);
            }
            plugin
        }
        PluginDecl::Literal(false) => return Ok(None),
        PluginDecl::Literal(true) => {
            return Err(ConfigError::invalid_plugin(
                index,
                "true",
                "a bare `true` is not a plugin",
            ));
        }
        PluginDecl::Malformed(value) => {
            return match parse_entry(value) {
                Ok(decl) => resolve_decl(index, &decl, watch),
                Err(entry) if entry.gate.is_some_and(|gate| !gate.evaluate(watch)) => {
                    tracing::debug!(index, plugin = %entry.name, "malformed plugin gated out");
                    Ok(None)
                }
                Err(entry) => Err(ConfigError::invalid_plugin(index, entry.name, entry.reason)),
            };
        }
    };

    plugin.resolve(index, watch).map(Some)
}
