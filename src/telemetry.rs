//! Logging setup.

use crate::constants::DEFAULT_LOG_FILTER;
use tracing_subscriber::EnvFilter;

/// Initialize a tracing subscriber with stderr output.
///
/// The filter comes from `RUST_LOG`, falling back to
/// `warn,search_query_sanitizer=info`. Returns `false` if a global
/// subscriber was already installed.
pub fn init_logging() -> bool {
    let filter = std::env::var("RUST_LOG")
        .map(EnvFilter::new)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init()
        .is_ok()
}
