//! HTTP implementation of [`SummarySource`].

use std::marker::PhantomData;
use std::time::Duration;

use erpreport_core::{FinanceSummary, HrSummary, InventorySummary, Upstream};
use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::error::{ClientSetupError, RemoteUnavailable};
use crate::source::SummarySource;

/// Longest upstream error body kept in a [`RemoteUnavailable::Status`].
const MAX_BODY_EXCERPT: usize = 256;

/// Upstream base addresses and transport settings, resolved once at startup.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub finance_url: Url,
    pub hr_url: Url,
    pub inventory_url: Url,
    /// Whole-request timeout applied by the HTTP client.
    pub timeout: Duration,
}

impl UpstreamConfig {
    pub fn base_url(&self, upstream: Upstream) -> &Url {
        match upstream {
            Upstream::Finance => &self.finance_url,
            Upstream::Hr => &self.hr_url,
            Upstream::Inventory => &self.inventory_url,
        }
    }
}

/// `GET <base>/api/<domain>-summary`, decoded into `S`.
#[derive(Debug, Clone)]
pub struct HttpSummaryClient<S> {
    upstream: Upstream,
    endpoint: Url,
    client: reqwest::Client,
    _summary: PhantomData<fn() -> S>,
}

pub type FinanceClient = HttpSummaryClient<FinanceSummary>;
pub type HrClient = HttpSummaryClient<HrSummary>;
pub type InventoryClient = HttpSummaryClient<InventorySummary>;

impl<S> HttpSummaryClient<S> {
    pub fn new(upstream: Upstream, base: &Url, client: reqwest::Client) -> Result<Self, ClientSetupError> {
        let endpoint = summary_endpoint(upstream, base)?;
        Ok(Self {
            upstream,
            endpoint,
            client,
            _summary: PhantomData,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// Joins the fixed summary path onto a base address.
///
/// A base without a trailing slash is treated as a directory, so both
/// `http://finance:5001/svc` and `http://finance:5001/svc/` resolve to
/// `http://finance:5001/svc/api/finance-summary`.
fn summary_endpoint(upstream: Upstream, base: &Url) -> Result<Url, ClientSetupError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(upstream.summary_path())
        .map_err(|e| ClientSetupError::Endpoint {
            upstream,
            base: base.to_string(),
            message: e.to_string(),
        })
}

#[async_trait::async_trait]
impl<S> SummarySource<S> for HttpSummaryClient<S>
where
    S: DeserializeOwned + Send + 'static,
{
    fn upstream(&self) -> Upstream {
        self.upstream
    }

    async fn fetch(&self) -> Result<S, RemoteUnavailable> {
        let upstream = self.upstream;
        tracing::debug!(%upstream, endpoint = %self.endpoint, "fetching upstream summary");

        let resp = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(|e| RemoteUnavailable::from_transport(upstream, e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(RemoteUnavailable::Status {
                upstream,
                status: status.as_u16(),
                body: body_excerpt(resp).await,
            });
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| RemoteUnavailable::from_transport(upstream, e))?;

        serde_json::from_slice(&bytes).map_err(|e| RemoteUnavailable::Decode {
            upstream,
            message: e.to_string(),
        })
    }
}

/// Reads the error body only until the excerpt is full; the rest is never
/// buffered. A body that fails mid-stream keeps what arrived.
async fn body_excerpt(mut resp: reqwest::Response) -> String {
    let mut buf = Vec::new();
    while buf.len() <= MAX_BODY_EXCERPT {
        match resp.chunk().await {
            Ok(Some(chunk)) => buf.extend_from_slice(&chunk),
            Ok(None) | Err(_) => break,
        }
    }
    excerpt(buf)
}

fn excerpt(mut bytes: Vec<u8>) -> String {
    let truncated = bytes.len() > MAX_BODY_EXCERPT;
    if truncated {
        bytes.truncate(MAX_BODY_EXCERPT);
        // Drop a character split by the cut.
        if let Err(e) = std::str::from_utf8(&bytes) {
            if e.error_len().is_none() {
                bytes.truncate(e.valid_up_to());
            }
        }
    }

    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    if truncated {
        text.push_str("...");
    }
    text
}

/// The three adapters, sharing one connection pool.
#[derive(Debug, Clone)]
pub struct UpstreamClients {
    pub finance: FinanceClient,
    pub hr: HrClient,
    pub inventory: InventoryClient,
}

impl UpstreamClients {
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, ClientSetupError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            finance: HttpSummaryClient::new(Upstream::Finance, config.base_url(Upstream::Finance), client.clone())?,
            hr: HttpSummaryClient::new(Upstream::Hr, config.base_url(Upstream::Hr), client.clone())?,
            inventory: HttpSummaryClient::new(
                Upstream::Inventory,
                config.base_url(Upstream::Inventory),
                client,
            )?,
        })
    }
}
