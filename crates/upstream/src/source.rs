use erpreport_core::Upstream;

use crate::error::RemoteUnavailable;

/// One remote read of a domain summary.
///
/// Implementations must not retry or cache; every call is a fresh read.
/// Object-safe so the aggregator can hold `Arc<dyn SummarySource<S>>` and tests
/// can substitute in-process stubs.
#[async_trait::async_trait]
pub trait SummarySource<S: Send>: Send + Sync {
    /// Which upstream this source reads from (used for logs and errors).
    fn upstream(&self) -> Upstream;

    async fn fetch(&self) -> Result<S, RemoteUnavailable>;
}
