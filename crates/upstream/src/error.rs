use erpreport_core::Upstream;
use thiserror::Error;

/// A single upstream could not produce its summary.
///
/// Callers above the aggregator never see this: it is logged and replaced
/// with the domain's zero value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RemoteUnavailable {
    #[error("{upstream} service did not answer within the transport timeout")]
    Timeout { upstream: Upstream },

    #[error("{upstream} service unreachable: {message}")]
    Transport { upstream: Upstream, message: String },

    #[error("{upstream} service answered {status}: {body}")]
    Status {
        upstream: Upstream,
        status: u16,
        body: String,
    },

    #[error("{upstream} summary could not be decoded: {message}")]
    Decode { upstream: Upstream, message: String },
}

impl RemoteUnavailable {
    pub fn upstream(&self) -> Upstream {
        match self {
            RemoteUnavailable::Timeout { upstream }
            | RemoteUnavailable::Transport { upstream, .. }
            | RemoteUnavailable::Status { upstream, .. }
            | RemoteUnavailable::Decode { upstream, .. } => *upstream,
        }
    }

    pub(crate) fn from_transport(upstream: Upstream, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RemoteUnavailable::Timeout { upstream }
        } else {
            RemoteUnavailable::Transport {
                upstream,
                message: err.to_string(),
            }
        }
    }
}

/// Adapters could not be built at startup.
#[derive(Debug, Error)]
pub enum ClientSetupError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error("cannot derive {upstream} summary endpoint from {base}: {message}")]
    Endpoint {
        upstream: Upstream,
        base: String,
        message: String,
    },
}
