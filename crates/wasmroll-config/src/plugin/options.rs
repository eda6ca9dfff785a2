//! Option records for each plugin kind.
//!
//! Every record rejects keys it does not recognize. Defaults follow the
//! upstream rollup plugins these steps stand for.

use serde::{Deserialize, Deserializer, Serialize};

/// Options for the Rust -> WASM compile step (`@wasm-tool/rollup-plugin-rust`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompileToWasmOptions {
    /// Prefix prepended to the `.wasm` URL at runtime
    pub server_path: String,

    /// Build in debug mode
    pub debug: bool,

    /// Print cargo and wasm-bindgen output
    pub verbose: bool,

    /// Embed the `.wasm` file as base64 in the JS output
    pub inline_wasm: bool,

    /// Emit Node.js-compatible loader code
    pub nodejs: bool,

    /// Extra arguments passed to `cargo build`
    pub cargo_args: Vec<String>,

    /// Extra arguments passed to `wasm-bindgen`
    pub wasm_bindgen_args: Vec<String>,

    /// Globs (relative to the crate) that trigger a rebuild in watch mode
    pub watch_patterns: Vec<String>,
}

impl Default for CompileToWasmOptions {
    fn default() -> Self {
        Self {
            server_path: String::new(),
            debug: false,
            verbose: false,
            inline_wasm: false,
            nodejs: false,
            cargo_args: Vec::new(),
            wasm_bindgen_args: Vec::new(),
            watch_patterns: default_watch_patterns(),
        }
    }
}

/// Compile options as written; `debug` is left open until the watch flag is
/// known.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub(crate) struct CompileToWasmArgs {
    #[serde(default)]
    server_path: String,

    #[serde(default)]
    debug: Option<bool>,

    #[serde(default)]
    verbose: bool,

    #[serde(default)]
    inline_wasm: bool,

    #[serde(default)]
    nodejs: bool,

    #[serde(default)]
    cargo_args: Vec<String>,

    #[serde(default)]
    wasm_bindgen_args: Vec<String>,

    #[serde(default = "default_watch_patterns", deserialize_with = "one_or_many")]
    watch_patterns: Vec<String>,
}

impl CompileToWasmArgs {
    pub(crate) fn into_options(self, watch: bool) -> CompileToWasmOptions {
        CompileToWasmOptions {
            server_path: self.server_path,
            debug: self.debug.unwrap_or(watch),
            verbose: self.verbose,
            inline_wasm: self.inline_wasm,
            nodejs: self.nodejs,
            cargo_args: self.cargo_args,
            wasm_bindgen_args: self.wasm_bindgen_args,
            watch_patterns: self.watch_patterns,
        }
    }
}

impl CompileToWasmOptions {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.inline_wasm && !self.server_path.is_empty() {
            return Err("serverPath has no effect when inlineWasm is enabled".to_string());
        }
        if self.watch_patterns.iter().any(|p| p.trim().is_empty()) {
            return Err("watchPatterns cannot contain empty patterns".to_string());
        }
        if !self.server_path.is_empty() && !self.server_path.ends_with('/') {
            tracing::warn!(
                server_path = %self.server_path,
                "serverPath does not end with '/', the wasm file name is appended verbatim"
            );
        }
        Ok(())
    }
}

/// Options for the minify step (`rollup-plugin-terser`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct MinifyOptions {
    pub compress: bool,
    pub mangle: bool,

    /// ECMAScript version the output may use
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ecma: Option<u16>,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self {
            compress: true,
            mangle: true,
            ecma: None,
        }
    }
}

impl MinifyOptions {
    pub(crate) fn validate(&self) -> Result<(), String> {
        match self.ecma {
            None | Some(5) | Some(2015..=2020) => Ok(()),
            Some(other) => Err(format!(
                "ecma must be 5 or between 2015 and 2020, got {other}"
            )),
        }
    }
}

/// Options for the static file server (`rollup-plugin-serve`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct ServeOptions {
    /// Directories served, in lookup order
    #[serde(deserialize_with = "one_or_many")]
    pub content_base: Vec<String>,

    /// Open the browser once the server is up
    pub open: bool,

    pub host: String,
    pub port: u16,

    /// Serve `index.html` for unknown paths
    pub history_api_fallback: bool,

    pub verbose: bool,
}

impl Default for ServeOptions {
    fn default() -> Self {
        Self {
            content_base: vec![".".to_string()],
            open: false,
            host: "localhost".to_string(),
            port: 10001,
            history_api_fallback: false,
            verbose: true,
        }
    }
}

impl ServeOptions {
    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.content_base.is_empty() {
            return Err("contentBase needs at least one directory".to_string());
        }
        if self.content_base.iter().any(|d| d.trim().is_empty()) {
            return Err("contentBase cannot contain empty paths".to_string());
        }
        if self.host.trim().is_empty() {
            return Err("host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("port must be non-zero".to_string());
        }
        Ok(())
    }
}

/// Options for the live-reload server (`rollup-plugin-livereload`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LiveReloadOptions {
    /// Directories whose changes trigger a browser reload
    #[serde(deserialize_with = "one_or_many")]
    pub watch: Vec<String>,

    #[serde(default = "default_livereload_port")]
    pub port: u16,

    /// Milliseconds to wait before notifying the browser
    #[serde(default)]
    pub delay: u64,

    #[serde(default = "default_true")]
    pub verbose: bool,
}

impl LiveReloadOptions {
    pub fn watching(dirs: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            watch: dirs.into_iter().map(Into::into).collect(),
            port: default_livereload_port(),
            delay: 0,
            verbose: true,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), String> {
        if self.watch.is_empty() {
            return Err("watch needs at least one directory".to_string());
        }
        if self.watch.iter().any(|d| d.trim().is_empty()) {
            return Err("watch cannot contain empty paths".to_string());
        }
        if self.port == 0 {
            return Err("port must be non-zero".to_string());
        }
        Ok(())
    }
}

fn default_watch_patterns() -> Vec<String> {
    vec!["src/**".to_string()]
}

fn default_livereload_port() -> u16 {
    35729
}

fn default_true() -> bool {
    true
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(value) => vec![value],
        OneOrMany::Many(values) => values,
    })
}
