use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use erpreport_export::RenderedReport;
use erpreport_reporting::{ExportError, OverviewService};

use crate::app::errors;

/// `/export/*`; `pdf` and `excel` are the legacy names of the two formats.
pub fn router() -> Router {
    Router::new()
        .route("/document", get(document))
        .route("/pdf", get(document))
        .route("/spreadsheet", get(spreadsheet))
        .route("/excel", get(spreadsheet))
}

pub async fn document(Extension(service): Extension<Arc<OverviewService>>) -> Response {
    report_response(service.export_document().await)
}

pub async fn spreadsheet(Extension(service): Extension<Arc<OverviewService>>) -> Response {
    report_response(service.export_spreadsheet().await)
}

fn report_response(result: Result<RenderedReport, ExportError>) -> Response {
    match result {
        Ok(report) => {
            let headers = [
                (header::CONTENT_TYPE, report.content_type().to_string()),
                (header::CONTENT_DISPOSITION, report.content_disposition()),
            ];
            (StatusCode::OK, headers, report.bytes).into_response()
        }
        Err(err) => errors::export_error_to_response(err),
    }
}
