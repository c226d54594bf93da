use erpreport_reporting::{OverviewService, ResilientAggregator};
use erpreport_upstream::{ClientSetupError, UpstreamClients};

use crate::config::AppConfig;

/// Wires the upstream adapters, aggregator and renderers from configuration.
pub fn build_services(config: &AppConfig) -> Result<OverviewService, ClientSetupError> {
    let clients = UpstreamClients::from_config(&config.upstreams)?;
    tracing::info!(
        finance = %clients.finance.endpoint(),
        hr = %clients.hr.endpoint(),
        inventory = %clients.inventory.endpoint(),
        timeout_ms = config.upstreams.timeout.as_millis() as u64,
        "upstream adapters configured"
    );

    let aggregator = ResilientAggregator::from_clients(clients);
    Ok(OverviewService::new(aggregator).with_document_failure_policy(config.document_failure_policy))
}
