//! `erpreport-reporting`: the aggregation core.
//!
//! - [`aggregator`]: fans out to the three upstream adapters, applies the
//!   safe-call policy per source and assembles the overview.
//! - [`service`]: façade serving overviews, single-domain summaries and exports.

pub mod aggregator;
pub mod service;

pub use aggregator::ResilientAggregator;
pub use service::{DocumentFailurePolicy, ExportError, FormatMismatch, OverviewService, UnknownPolicy};
