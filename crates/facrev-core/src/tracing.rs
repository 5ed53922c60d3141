//! Tracing subscriber initialization.

use tracing_subscriber::EnvFilter;

/// Install the global subscriber, reading the filter from `FACREV_LOG`
/// (falling back to `RUST_LOG`, then "info"). Safe to call more than once;
/// later calls are no-ops.
pub fn init() {
    let filter = std::env::var("FACREV_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .unwrap_or_else(|_| "info".to_string());

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(true)
        .try_init();
}
