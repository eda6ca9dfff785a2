//! The watch-mode signal.
//!
//! Read once per invocation, then passed explicitly to resolution.

/// Variable rollup sets when it runs with `--watch`
pub const WATCH_ENV_VAR: &str = "ROLLUP_WATCH";

/// Interpret a raw environment value. Absent, empty, `0` and `false`
/// (any case) mean disabled; anything else enables watch mode.
pub fn parse_watch_flag(value: Option<&str>) -> bool {
    match value.map(str::trim) {
        None | Some("") | Some("0") => false,
        Some(v) => !v.eq_ignore_ascii_case("false"),
    }
}

/// Read [`WATCH_ENV_VAR`] from the process environment.
pub fn watch_flag_from_env() -> bool {
    let value = std::env::var(WATCH_ENV_VAR).ok();
    let watch = parse_watch_flag(value.as_deref());
    tracing::debug!(watch, "read {}", WATCH_ENV_VAR);
    watch
}
