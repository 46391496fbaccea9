//! Tracing subscriber setup.

use tracing_subscriber::{fmt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// `directive` is a standard `RUST_LOG`-style filter (e.g. `info` or
/// `portray=debug`); the `RUST_LOG` environment variable overrides it.
/// Safe to call once per process; subsequent calls are no-ops.
pub fn init(directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directive));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
