//! Built-in descriptor templates written by `wasmroll init`.

use crate::cli::Template;

/// Browser extension popup: ES module build, compiled then minified.
pub const EXTENSION: &str = r#"# wasmroll descriptor: browser extension popup

[input]
popup = "./Cargo.toml"

[output]
dir = "dist/js"
format = "es"
sourcemap = true

[[plugins]]
name = "rust"
options = { serverPath = "js/" }

[[plugins]]
name = "terser"
"#;

/// Single-page app compiled to an IIFE bundle.
pub const TODOMVC: &str = r#"# wasmroll descriptor: single-page app

[input]
index = "./Cargo.toml"

[output]
dir = "dist/js"
format = "iife"
sourcemap = true

[[plugins]]
name = "rust"
"#;

/// Single-page app with a static server and live-reload while watching.
pub const DEV: &str = r#"# wasmroll descriptor: single-page app with a dev server
# Run with --watch (or ROLLUP_WATCH=true) to enable serve and livereload.

[input]
index = "./Cargo.toml"

[output]
dir = "dist/js"
format = "iife"
sourcemap = true

[[plugins]]
name = "rust"
options = { serverPath = "js/", debug = false }

[[plugins]]
name = "serve"
when = "watch"
options = { contentBase = "dist", open = true }

[[plugins]]
name = "livereload"
when = "watch"
options = "dist"
"#;

impl Template {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Template::Extension => "extension",
            Template::Todomvc => "todomvc",
            Template::Dev => "dev",
        }
    }

    pub(crate) fn contents(self) -> &'static str {
        match self {
            Template::Extension => EXTENSION,
            Template::Todomvc => TODOMVC,
            Template::Dev => DEV,
        }
    }
}
