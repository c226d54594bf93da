use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use erpreport_export::ExportFormat;
use erpreport_reporting::ExportError;

pub fn export_error_to_response(err: ExportError) -> axum::response::Response {
    let code = match err.format() {
        ExportFormat::Document => "document_render_failed",
        ExportFormat::Spreadsheet => "spreadsheet_render_failed",
    };
    let message = match std::error::Error::source(&err) {
        Some(source) => format!("{err}: {source}"),
        None => err.to_string(),
    };
    json_error(StatusCode::INTERNAL_SERVER_ERROR, code, message)
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
