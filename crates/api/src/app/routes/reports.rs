use std::sync::Arc;

use axum::{extract::Extension, Json};
use erpreport_core::{FinanceSummary, HrSummary, InventorySummary, Overview};
use erpreport_reporting::OverviewService;

pub async fn overview(Extension(service): Extension<Arc<OverviewService>>) -> Json<Overview> {
    Json(service.build_overview().await)
}

pub async fn finance(Extension(service): Extension<Arc<OverviewService>>) -> Json<FinanceSummary> {
    Json(service.finance_summary().await)
}

pub async fn hr(Extension(service): Extension<Arc<OverviewService>>) -> Json<HrSummary> {
    Json(service.hr_summary().await)
}

pub async fn inventory(Extension(service): Extension<Arc<OverviewService>>) -> Json<InventorySummary> {
    Json(service.inventory_summary().await)
}
