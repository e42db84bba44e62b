//! healthpro-server
//!
//! HTTP surface for report generation: generate, download, session listing
//! and a health probe. All state is built once at startup and shared.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use axum::Router;
use axum::http::HeaderValue;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::state::AppState;

/// All routes with audit logging, without CORS.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(routes::health::health_check))
        .route(
            "/api/reports/generate-report",
            post(routes::reports::generate_report),
        )
        .route(
            "/api/reports/download/{file_name}",
            get(routes::reports::download_report),
        )
        .route("/api/reports/sessions", get(routes::reports::list_sessions))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .with_state(state)
}

/// CORS for the configured frontend origin, or any origin when unset.
pub fn cors(frontend_url: Option<&str>) -> CorsLayer {
    let origin = match frontend_url.and_then(|url| HeaderValue::from_str(url).ok()) {
        Some(origin) => AllowOrigin::exact(origin),
        None => AllowOrigin::any(),
    };
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// The full service as served by the binary.
pub fn service(state: AppState, frontend_url: Option<&str>) -> Router {
    app(state).layer(ServiceBuilder::new().layer(cors(frontend_url)))
}
