//! Per-source health: whether a summary is real or a zero-value stand-in.
//!
//! The externally visible overview never carries this; it is threaded through
//! logs so operators can tell "all zero because empty" from "all zero because
//! the upstreams are down".

use crate::upstream::Upstream;
use crate::value_object::ZeroValue;

/// Outcome of one safe-called upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceHealth<S> {
    /// The upstream answered; `S` is its summary verbatim.
    Healthy(S),
    /// The upstream failed; `summary` is the zero value and `reason` says why.
    Degraded { summary: S, reason: String },
}

impl<S: ZeroValue> SourceHealth<S> {
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self::Degraded {
            summary: S::zero(),
            reason: reason.into(),
        }
    }
}

impl<S> SourceHealth<S> {
    pub fn is_healthy(&self) -> bool {
        matches!(self, SourceHealth::Healthy(_))
    }

    pub fn summary(&self) -> &S {
        match self {
            SourceHealth::Healthy(s) => s,
            SourceHealth::Degraded { summary, .. } => summary,
        }
    }

    pub fn status(&self) -> SourceStatus {
        match self {
            SourceHealth::Healthy(_) => SourceStatus::Healthy,
            SourceHealth::Degraded { reason, .. } => SourceStatus::Degraded(reason.clone()),
        }
    }

    pub fn into_summary(self) -> S {
        match self {
            SourceHealth::Healthy(s) => s,
            SourceHealth::Degraded { summary, .. } => summary,
        }
    }
}

/// Summary-free view of a [`SourceHealth`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    Healthy,
    Degraded(String),
}

/// Health of every upstream that fed one overview.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HealthReport {
    entries: Vec<(Upstream, SourceStatus)>,
}

impl HealthReport {
    pub fn new(entries: impl IntoIterator<Item = (Upstream, SourceStatus)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn status(&self, upstream: Upstream) -> Option<&SourceStatus> {
        self.entries
            .iter()
            .find(|(u, _)| *u == upstream)
            .map(|(_, s)| s)
    }

    pub fn is_fully_healthy(&self) -> bool {
        self.entries.iter().all(|(_, s)| *s == SourceStatus::Healthy)
    }

    /// Upstreams that were substituted with zero values, in report order.
    pub fn degraded(&self) -> Vec<Upstream> {
        self.entries
            .iter()
            .filter(|(_, s)| matches!(s, SourceStatus::Degraded(_)))
            .map(|(u, _)| *u)
            .collect()
    }
}
