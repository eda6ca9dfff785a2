//! Tests for loading descriptors from disk.

use serial_test::serial;
use std::fs;
use tempfile::TempDir;
use wasmroll_config::{ConfigDiscovery, ConfigError, OutputFormat, PluginKind, load_from};

const TODOMVC_TOML: &str = r#"
[input]
index = "./Cargo.toml"

[output]
dir = "dist/js"
format = "iife"
sourcemap = true

[[plugins]]
name = "rust"
options = { serverPath = "js/" }
"#;

const DEV_TOML: &str = r#"
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

#[test]
#[serial]
fn loads_toml_descriptor() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("wasmroll.toml"), TODOMVC_TOML).expect("write config");

    let raw = ConfigDiscovery::new(dir.path()).load().expect("load");
    let descriptor = raw.resolve(false).expect("resolve");

    assert_eq!(descriptor.output().format, OutputFormat::Iife);
    assert!(descriptor.output().sourcemap);
    assert_eq!(descriptor.plugins().len(), 1);
}

#[test]
#[serial]
fn loads_gated_plugins_from_toml() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("wasmroll.toml"), DEV_TOML).expect("write config");

    let raw = ConfigDiscovery::new(dir.path()).load().expect("load");

    let watch: Vec<_> = raw
        .resolve(true)
        .expect("resolve")
        .plugins()
        .iter()
        .map(|p| p.kind())
        .collect();
    assert_eq!(
        watch,
        vec![PluginKind::CompileToWasm, PluginKind::ServeStatic, PluginKind::LiveReload]
    );

    assert_eq!(raw.resolve(false).expect("resolve").plugins().len(), 1);
}

#[test]
#[serial]
fn loads_json_descriptor_with_literal_false_entry() {
    let dir = TempDir::new().expect("tempdir");
    fs::write(
        dir.path().join("wasmroll.json"),
        r#"{
            "input": { "popup": "./Cargo.toml" },
            "output": { "dir": "dist/js", "format": "es", "sourcemap": true },
            "plugins": [
                { "name": "rust", "options": { "serverPath": "js/" } },
                false,
                { "name": "terser" }
            ]
        }"#,
    )
    .expect("write config");

    let raw = ConfigDiscovery::new(dir.path()).load().expect("load");
    assert_eq!(raw.plugins.len(), 3);

    let descriptor = raw.resolve(false).expect("resolve");
    let kinds: Vec<_> = descriptor.plugins().iter().map(|p| p.kind()).collect();
    assert_eq!(kinds, vec![PluginKind::CompileToWasm, PluginKind::Minify]);
}

#[test]
#[serial]
fn env_overrides_output_section() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("wasmroll.toml");
    fs::write(&path, TODOMVC_TOML).expect("write config");

    unsafe {
        std::env::set_var("WASMROLL_OUTPUT__FORMAT", "es");
    }
    let raw = load_from(&path);
    unsafe {
        std::env::remove_var("WASMROLL_OUTPUT__FORMAT");
    }

    let descriptor = raw.expect("load").resolve(false).expect("resolve");
    assert_eq!(descriptor.output().format, OutputFormat::Es);
}

#[test]
#[serial]
fn unrelated_env_vars_are_ignored() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("wasmroll.toml");
    fs::write(&path, TODOMVC_TOML).expect("write config");

    unsafe {
        std::env::set_var("WASMROLL_LOG", "debug");
    }
    let raw = load_from(&path);
    unsafe {
        std::env::remove_var("WASMROLL_LOG");
    }

    assert!(raw.is_ok());
}

#[test]
#[serial]
fn malformed_toml_is_invalid_value() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("wasmroll.toml");
    fs::write(&path, "[output\ndir = ").expect("write config");

    let result = load_from(&path);
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
#[serial]
fn unknown_plugin_record_field_is_invalid_plugin() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("wasmroll.toml");
    fs::write(
        &path,
        r#"
[input]
index = "./Cargo.toml"

[[plugins]]
name = "rust"
enabled = true
"#,
    )
    .expect("write config");

    let raw = load_from(&path).expect("load");
    match raw.resolve(false).unwrap_err() {
        ConfigError::InvalidPlugin { index, name, reason } => {
            assert_eq!(index, 0);
            assert_eq!(name, "rust");
            assert!(reason.contains("enabled"));
        }
        other => panic!("expected InvalidPlugin error, got {other:?}"),
    }
}

#[test]
#[serial]
fn non_table_plugin_entry_is_invalid_plugin() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("wasmroll.json");
    fs::write(
        &path,
        r#"{ "input": { "index": "./Cargo.toml" }, "plugins": [{ "name": "rust" }, 42] }"#,
    )
    .expect("write config");

    let raw = load_from(&path).expect("load");
    assert!(matches!(
        raw.resolve(false),
        Err(ConfigError::InvalidPlugin { index: 1, .. })
    ));
}

#[test]
#[serial]
fn repeated_json_entry_name_is_invalid_entry() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("wasmroll.json");
    fs::write(
        &path,
        r#"{ "input": { "popup": "./a/Cargo.toml", "popup": "./b/Cargo.toml" } }"#,
    )
    .expect("write config");

    match load_from(&path).unwrap_err() {
        ConfigError::InvalidEntry { name, .. } => assert_eq!(name, "popup"),
        other => panic!("expected InvalidEntry error, got {other:?}"),
    }
}
