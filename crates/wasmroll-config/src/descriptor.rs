//! Descriptors: the raw form read from a file or built in code, and the
//! resolved form handed to the bundler runtime.

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::entry::{EntryDecl, RawEntries, resolve_entry_points};
use crate::error::{ConfigError, Result};
use crate::output::{OutputSpec, RawOutput, resolve_output};
use crate::plugin::{PluginDecl, PluginInvocation, PluginKind, RawPlugin, resolve_plugin_chain};

/// Descriptor as declared, before the watch flag is applied.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct RawDescriptor {
    /// Entry points: logical name -> manifest path
    #[serde(default)]
    pub input: RawEntries,

    #[serde(default)]
    pub output: RawOutput,

    /// Plugin chain, in application order
    #[serde(default)]
    pub plugins: Vec<PluginDecl>,
}

impl RawDescriptor {
    pub fn builder() -> DescriptorBuilder {
        DescriptorBuilder::default()
    }

    /// Create from serde_json::Value (for programmatic configs)
    ///
    /// # Example
    ///
    /// ```
    /// use wasmroll_config::RawDescriptor;
    /// use serde_json::json;
    ///
    /// let raw = RawDescriptor::from_value(json!({
    ///     "input": { "popup": "./Cargo.toml" },
    ///     "output": { "dir": "dist/js", "format": "es", "sourcemap": true },
    ///     "plugins": [{ "name": "rust", "options": { "serverPath": "js/" } }, { "name": "terser" }]
    /// }))
    /// .unwrap();
    ///
    /// let descriptor = raw.resolve(false).unwrap();
    /// assert_eq!(descriptor.plugins().len(), 2);
    /// ```
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "descriptor".to_string(),
            hint: e.to_string(),
        })
    }

    /// Parse a TOML descriptor without environment overrides.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ConfigError::InvalidValue {
            field: "toml".to_string(),
            hint: format!("Invalid TOML descriptor: {}", e),
        })
    }

    /// Resolve against the watch flag.
    pub fn resolve(&self, watch: bool) -> Result<BuildDescriptor> {
        resolve(self, watch)
    }

    /// JSON Schema of the descriptor file format.
    pub fn json_schema() -> Value {
        let schema = schemars::schema_for!(RawDescriptor);
        serde_json::to_value(schema).expect("Schema serialization should never fail")
    }
}

/// Fully resolved build plan. Immutable once produced; a
/// [`BuildRuntime`](crate::BuildRuntime) takes it by value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDescriptor {
    entry_points: IndexMap<String, PathBuf>,
    output: OutputSpec,
    plugins: Vec<PluginInvocation>,
    watch: bool,
    /// Index in the declared plugin list of each entry of `plugins`
    #[serde(skip)]
    declared_at: Vec<usize>,
}

impl BuildDescriptor {
    pub fn entry_points(&self) -> &IndexMap<String, PathBuf> {
        &self.entry_points
    }

    pub fn output(&self) -> &OutputSpec {
        &self.output
    }

    pub fn plugins(&self) -> &[PluginInvocation] {
        &self.plugins
    }

    /// Watch flag the plugins were resolved against
    pub fn watch(&self) -> bool {
        self.watch
    }

    /// Position of the first plugin of `kind`, if any
    pub fn position_of(&self, kind: PluginKind) -> Option<usize> {
        self.plugins.iter().position(|p| p.kind() == kind)
    }

    /// Index at which the plugin at `position` was declared. Gated-out and
    /// literal entries shift positions, so errors about a resolved plugin
    /// should report this index.
    pub fn declared_index(&self, position: usize) -> usize {
        self.declared_at.get(position).copied().unwrap_or(position)
    }

    /// Entry manifests resolved against `root`
    pub fn manifest_paths(&self, root: &Path) -> Vec<(&str, PathBuf)> {
        self.entry_points
            .iter()
            .map(|(name, path)| (name.as_str(), root.join(path)))
            .collect()
    }

    /// Convert to serde_json::Value (the plan handed to the runtime)
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "descriptor".to_string(),
            hint: e.to_string(),
        })
    }
}

/// Resolve a raw descriptor into a build plan.
///
/// Entries, output and plugins are resolved in that order; the first
/// failure rejects the whole descriptor.
pub fn resolve(raw: &RawDescriptor, watch: bool) -> Result<BuildDescriptor> {
    let entry_points = resolve_entry_points(&raw.input)?;
    let output = resolve_output(&raw.output)?;
    let (declared_at, plugins): (Vec<usize>, Vec<PluginInvocation>) =
        resolve_plugin_chain(&raw.plugins, watch)?.into_iter().unzip();

    tracing::debug!(
        entries = entry_points.len(),
        format = %output.format,
        plugins = plugins.len(),
        declared = raw.plugins.len(),
        watch,
        "resolved build descriptor"
    );

    Ok(BuildDescriptor {
        entry_points,
        output,
        plugins,
        watch,
        declared_at,
    })
}

/// Builds a [`RawDescriptor`] in code, in the shape of a bundler config
/// literal.
///
/// # Example
///
/// ```
/// use wasmroll_config::{RawDescriptor, RawPlugin};
/// use serde_json::json;
///
/// let raw = RawDescriptor::builder()
///     .entry("index", "./Cargo.toml")
///     .output("dist/js", "iife")
///     .sourcemap(true)
///     .plugin(RawPlugin::new("rust", json!({ "serverPath": "js/" })))
///     .plugin_when_watch(RawPlugin::new("livereload", json!("dist")))
///     .build();
///
/// assert_eq!(raw.resolve(true).unwrap().plugins().len(), 2);
/// assert_eq!(raw.resolve(false).unwrap().plugins().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DescriptorBuilder {
    entries: Vec<EntryDecl>,
    output: RawOutput,
    plugins: Vec<PluginDecl>,
}

impl DescriptorBuilder {
    pub fn entry(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.entries.push(EntryDecl::new(name, path));
        self
    }

    pub fn output(mut self, dir: impl Into<String>, format: impl Into<String>) -> Self {
        self.output.dir = dir.into();
        self.output.format = format.into();
        self
    }

    pub fn sourcemap(mut self, sourcemap: bool) -> Self {
        self.output.sourcemap = Some(sourcemap);
        self
    }

    pub fn plugin(self, plugin: RawPlugin) -> Self {
        self.decl(PluginDecl::always(plugin))
    }

    pub fn plugin_when_watch(self, plugin: RawPlugin) -> Self {
        self.decl(PluginDecl::when_watch(plugin))
    }

    pub fn decl(mut self, decl: PluginDecl) -> Self {
        self.plugins.push(decl);
        self
    }

    pub fn build(self) -> RawDescriptor {
        RawDescriptor {
            input: RawEntries::List(self.entries),
            output: self.output,
            plugins: self.plugins,
        }
    }
}
