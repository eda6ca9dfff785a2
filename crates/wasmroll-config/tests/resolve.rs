//! Tests for descriptor resolution against the watch flag.

use serde_json::json;
use wasmroll_config::{
    CompileToWasmOptions, ConfigError, Gate, LiveReloadOptions, MinifyOptions, OutputFormat,
    PluginDecl, PluginInvocation, PluginKind, RawDescriptor, RawPlugin, ServeOptions,
    resolve_plugins,
};

fn extension_descriptor() -> RawDescriptor {
    RawDescriptor::from_value(json!({
        "input": { "popup": "./Cargo.toml" },
        "output": { "dir": "dist/js", "format": "es", "sourcemap": true },
        "plugins": [
            { "name": "rust", "options": { "serverPath": "js/" } },
            { "name": "terser" }
        ]
    }))
    .expect("extension descriptor")
}

fn dev_descriptor() -> RawDescriptor {
    RawDescriptor::from_value(json!({
        "input": { "index": "./Cargo.toml" },
        "output": { "dir": "dist/js", "format": "iife", "sourcemap": true },
        "plugins": [
            { "name": "rust", "options": { "serverPath": "js/", "debug": false } },
            { "name": "serve", "when": "watch", "options": { "contentBase": "dist", "open": true } },
            { "name": "livereload", "when": "watch", "options": "dist" }
        ]
    }))
    .expect("dev descriptor")
}

#[test]
fn extension_round_trip() {
    let descriptor = extension_descriptor().resolve(false).unwrap();

    assert_eq!(descriptor.entry_points().len(), 1);
    assert_eq!(
        descriptor.entry_points()["popup"].to_str(),
        Some("./Cargo.toml")
    );
    assert_eq!(descriptor.output().dir.to_str(), Some("dist/js"));
    assert_eq!(descriptor.output().format, OutputFormat::Es);
    assert!(descriptor.output().sourcemap);
    assert_eq!(
        descriptor.plugins(),
        &[
            PluginInvocation::CompileToWasm(CompileToWasmOptions {
                server_path: "js/".to_string(),
                ..CompileToWasmOptions::default()
            }),
            PluginInvocation::Minify(MinifyOptions::default()),
        ]
    );
}

#[test]
fn dev_scenario_in_watch_mode_keeps_all_three() {
    let descriptor = dev_descriptor().resolve(true).unwrap();

    assert_eq!(
        descriptor.plugins(),
        &[
            PluginInvocation::CompileToWasm(CompileToWasmOptions {
                server_path: "js/".to_string(),
                debug: false,
                ..CompileToWasmOptions::default()
            }),
            PluginInvocation::ServeStatic(ServeOptions {
                content_base: vec!["dist".to_string()],
                open: true,
                ..ServeOptions::default()
            }),
            PluginInvocation::LiveReload(LiveReloadOptions::watching(["dist"])),
        ]
    );
}

#[test]
fn dev_scenario_without_watch_drops_gated_plugins() {
    let descriptor = dev_descriptor().resolve(false).unwrap();
    let kinds: Vec<_> = descriptor.plugins().iter().map(|p| p.kind()).collect();
    assert_eq!(kinds, vec![PluginKind::CompileToWasm]);
}

#[test]
fn gated_entry_keeps_its_position() {
    let decls = vec![
        PluginDecl::always(RawPlugin::named("rust")),
        PluginDecl::when_watch(RawPlugin::new("serve", json!("dist"))),
        PluginDecl::always(RawPlugin::named("terser")),
    ];

    let kinds = |watch| -> Vec<PluginKind> {
        resolve_plugins(&decls, watch)
            .unwrap()
            .iter()
            .map(|p| p.kind())
            .collect()
    };

    assert_eq!(
        kinds(true),
        vec![PluginKind::CompileToWasm, PluginKind::ServeStatic, PluginKind::Minify]
    );
    assert_eq!(kinds(false), vec![PluginKind::CompileToWasm, PluginKind::Minify]);
}

#[test]
fn output_is_order_preserving_subsequence() {
    let decls = vec![
        PluginDecl::Literal(false),
        PluginDecl::when_watch(RawPlugin::new("livereload", json!("dist"))),
        PluginDecl::always(RawPlugin::named("rust")),
        PluginDecl::Conditional(Gate::Literal(false), RawPlugin::named("terser")),
        PluginDecl::unless_watch(RawPlugin::named("terser")),
        PluginDecl::Conditional(Gate::Literal(true), RawPlugin::new("serve", json!("dist"))),
    ];

    for watch in [false, true] {
        let resolved = resolve_plugins(&decls, watch).unwrap();
        assert!(resolved.len() <= decls.len());

        let expected: Vec<PluginKind> = decls
            .iter()
            .filter_map(|decl| match decl {
                PluginDecl::Unconditional(p) => Some(p),
                PluginDecl::Conditional(gate, p) if gate.evaluate(watch) => Some(p),
                _ => None,
            })
            .map(|p| p.name.parse().unwrap())
            .collect();
        let actual: Vec<PluginKind> = resolved.iter().map(|p| p.kind()).collect();
        assert_eq!(actual, expected, "watch = {watch}");
    }
}

#[test]
fn duplicate_entry_names_are_invalid() {
    let raw = RawDescriptor::from_value(json!({
        "input": [
            { "name": "popup", "path": "./Cargo.toml" },
            { "name": "popup", "path": "./popup/Cargo.toml" }
        ],
        "output": { "dir": "dist/js" }
    }))
    .unwrap();

    let err = raw.resolve(false).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEntry { .. }));
}

#[test]
fn unsupported_format_is_rejected() {
    let raw = RawDescriptor::from_value(json!({
        "input": { "popup": "./Cargo.toml" },
        "output": { "dir": "dist/js", "format": "xyz" }
    }))
    .unwrap();

    let err = raw.resolve(false).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(ref f) if f == "xyz"));
}

#[test]
fn invalid_plugin_rejects_whole_descriptor() {
    let raw = RawDescriptor::from_value(json!({
        "input": { "index": "./Cargo.toml" },
        "plugins": [
            { "name": "rust" },
            { "name": "serve", "options": { "contentBase": "dist", "https": true } }
        ]
    }))
    .unwrap();

    let err = raw.resolve(true).unwrap_err();
    match err {
        ConfigError::InvalidPlugin { index, name, reason } => {
            assert_eq!(index, 1);
            assert_eq!(name, "serve");
            assert!(reason.contains("https"));
        }
        other => panic!("expected InvalidPlugin, got {other:?}"),
    }
}

#[test]
fn compile_debug_defaults_to_watch_flag() {
    let raw = RawDescriptor::builder()
        .entry("index", "./Cargo.toml")
        .plugin(RawPlugin::named("rust"))
        .build();

    let debug = |watch| match &raw.resolve(watch).unwrap().plugins()[0] {
        PluginInvocation::CompileToWasm(options) => options.debug,
        other => panic!("unexpected plugin {other:?}"),
    };

    assert!(debug(true));
    assert!(!debug(false));
}

#[test]
fn resolved_plan_serializes_for_the_runtime() {
    let descriptor = dev_descriptor().resolve(true).unwrap();
    let value = descriptor.to_value().unwrap();

    assert_eq!(value["watch"], json!(true));
    assert_eq!(value["output"]["format"], json!("iife"));
    assert_eq!(value["plugins"][0]["kind"], json!("compileToWasm"));
    assert_eq!(value["plugins"][0]["options"]["serverPath"], json!("js/"));
    assert_eq!(value["plugins"][1]["kind"], json!("serveStatic"));
    assert_eq!(value["plugins"][1]["options"]["contentBase"], json!(["dist"]));
    assert_eq!(value["plugins"][2]["kind"], json!("liveReload"));
    assert_eq!(value["plugins"][2]["options"]["port"], json!(35729));
}
