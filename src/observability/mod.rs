//! Logging setup
//!
//! Logs go to stderr through a `tracing` fmt subscriber. The filter comes
//! from `RUST_LOG` when set, otherwise [`DEFAULT_FILTER`].

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset or invalid
pub const DEFAULT_FILTER: &str = "barelydb=info,tower_http=info";

/// Build the log filter, optionally raising barelydb to debug
pub fn env_filter(verbose: bool) -> EnvFilter {
    let fallback = if verbose {
        "barelydb=debug,tower_http=debug"
    } else {
        DEFAULT_FILTER
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install the global subscriber. Repeated calls are ignored.
pub fn init_logging(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose))
        .with_writer(std::io::stderr)
        .try_init();
}
