//! Tracing/logging setup shared by the reporting binaries and tests.

/// Initialize process-wide tracing with JSON output, filtered by `RUST_LOG`
/// (default `info`).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::DEFAULT_FILTER, tracing::Output::Json);
}

/// Human-readable output at `debug` for local runs and test diagnostics.
///
/// Also a no-op when a subscriber is already installed.
pub fn init_pretty() {
    tracing::init("debug", tracing::Output::Pretty);
}

/// Subscriber configuration (filters, formatting).
pub mod tracing;
