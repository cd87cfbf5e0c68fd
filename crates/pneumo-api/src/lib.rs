//! pneumo-api
//!
//! HTTP surface of the pathology forms: catalogs, visibility evaluation,
//! validation, per-patient records and their summaries.

use axum::Router;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod store;

use state::AppState;

/// Build the application router with its middleware stack.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(routes::health::health_check))
        // Catalogs and stateless form evaluation
        .route("/pathologies", get(routes::pathologies::list_pathologies))
        .route(
            "/pathologies/{id}",
            get(routes::pathologies::get_pathology_detail),
        )
        .route(
            "/pathologies/{id}/evaluate",
            post(routes::pathologies::evaluate),
        )
        .route(
            "/pathologies/{id}/validate",
            post(routes::pathologies::validate),
        )
        // Saved records
        .route(
            "/patients/{patient_id}/pathologies/{id}",
            get(routes::records::get_record).put(routes::records::save_record),
        )
        .route(
            "/patients/{patient_id}/pathologies/{id}/summary",
            get(routes::records::get_summary),
        )
        .route(
            "/patients/{patient_id}/pathologies/{id}/summary/docx",
            get(routes::records::export_summary_docx),
        )
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
