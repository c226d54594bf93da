use axum::{routing::get, Router};

pub mod exports;
pub mod reports;
pub mod system;

/// Router for everything under `/api/reports`.
pub fn router() -> Router {
    Router::new()
        .route("/overview", get(reports::overview))
        .route("/finance", get(reports::finance))
        .route("/hr", get(reports::hr))
        .route("/inventory", get(reports::inventory))
        .nest("/export", exports::router())
}
