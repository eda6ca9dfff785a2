//! Logging infrastructure for the wasmroll CLI.
//!
//! Verbosity is chosen in this order:
//! 1. `--verbose`: DEBUG for the wasmroll crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`: custom filter
//! 4. default: INFO for the wasmroll crates

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "wasmroll=debug,wasmroll_config=debug,wasmroll_cli=debug";
const QUIET_FILTER: &str = "wasmroll=error,wasmroll_config=error,wasmroll_cli=error";
const DEFAULT_FILTER: &str = "wasmroll=info,wasmroll_config=info,wasmroll_cli=info";

/// Initialize the tracing subscriber. Call once, before any logging.
///
/// Logs go to stderr so that plans printed on stdout stay machine-readable.
///
/// # Examples
///
/// ```rust,no_run
/// use wasmroll_cli::logger::init_logger;
///
/// init_logger(false, false, false);
/// ```
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize logger with a custom environment filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global subscriber can only be installed once per process, so these
    // only exercise filter construction.

    #[test]
    fn test_env_filter_verbose() {
        let filter = filter_for(true, false);
        assert!(filter.to_string().contains("wasmroll_config=debug"));
    }

    #[test]
    fn test_env_filter_quiet() {
        let filter = filter_for(false, true);
        assert!(filter.to_string().contains("wasmroll_cli=error"));
    }
}
