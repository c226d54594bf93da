//! Subscriber initialization.
//!
//! Upstream degradation is only visible here (the overview shape never
//! changes), so warnings from the aggregator must not be filtered out by the
//! default directive.

use tracing_subscriber::EnvFilter;

/// Directive used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Output {
    /// One JSON object per event (production).
    Json,
    /// Multi-line human-readable events.
    Pretty,
}

/// Install the global subscriber. Subsequent calls are no-ops.
pub fn init(default_directive: &str, output: Output) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(tracing_subscriber::fmt::time::SystemTime);

    let _ = match output {
        Output::Json => builder.json().with_target(false).try_init(),
        Output::Pretty => builder.pretty().with_target(true).try_init(),
    };
}
