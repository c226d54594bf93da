//! `erpreport-core`: reporting read-model building blocks.
//!
//! This crate contains **pure** types shared by the upstream adapters, the
//! aggregator and the exporters (no IO, no HTTP).

pub mod clock;
pub mod health;
pub mod summary;
pub mod upstream;
pub mod value_object;

pub use clock::{process_clock, Clock, FixedClock, MonotonicClock, SystemClock};
pub use health::{HealthReport, SourceHealth, SourceStatus};
pub use summary::{FinanceSummary, HrSummary, InventorySummary, Overview};
pub use upstream::Upstream;
pub use value_object::{ValueObject, ZeroValue};
