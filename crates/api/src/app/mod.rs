//! HTTP application wiring (Axum router + service wiring).
//!
//! - `services.rs`: builds the overview service from configuration
//! - `routes/`: HTTP routes + handlers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use erpreport_reporting::OverviewService;
use erpreport_upstream::ClientSetupError;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;

pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &AppConfig) -> Result<Router, ClientSetupError> {
    let service = Arc::new(services::build_services(config)?);
    Ok(router(service))
}

/// Router over an already-built service.
pub fn router(service: Arc<OverviewService>) -> Router {
    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api/reports", routes::router())
        .layer(Extension(service))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
