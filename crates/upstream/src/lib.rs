//! `erpreport-upstream`: typed adapters for the finance, HR and inventory
//! summary endpoints.
//!
//! Each adapter performs exactly one read-only call per `fetch()`. There is no
//! retry and no caching here; a transport timeout is configured on the shared
//! HTTP client and surfaces as an ordinary [`RemoteUnavailable`].

pub mod error;
pub mod http;
pub mod source;

pub use error::{ClientSetupError, RemoteUnavailable};
pub use http::{FinanceClient, HrClient, HttpSummaryClient, InventoryClient, UpstreamClients, UpstreamConfig};
pub use source::SummarySource;

/// Re-exported so configuration code can name base addresses without a direct
/// `reqwest`/`url` dependency.
pub use reqwest::Url;
