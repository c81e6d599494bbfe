//! Diagnostic logging to stderr.
//!
//! stdout carries only the tracker arguments, so every log line goes to
//! stderr. The level comes from `LOG_LEVEL` (`DEBUG`, `INFO`, `WARN`,
//! `ERROR`, or any `tracing` filter directive).

use tracing_subscriber::EnvFilter;

/// Default filter when none is configured or the configured one is invalid.
pub const DEFAULT_LEVEL: &str = "info";

/// Builds the filter for a configured level string.
#[must_use]
pub fn filter(level: &str) -> EnvFilter {
    let level = level.trim().to_lowercase();
    let level = if level.is_empty() { DEFAULT_LEVEL } else { level.as_str() };
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init(level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_env_filter(filter(level))
        .try_init();
}
