//! # riskform-api: Axum API Service for Hazard Risk Assessment
//!
//! Serves the risk assessment form over HTTP. Each user works in an
//! isolated session: enter a hazard and get its calculated risk rating,
//! add a recommended action to save the entry, view the growing table
//! and download it as a styled spreadsheet.
//!
//! ## API Surface
//!
//! | Prefix                          | Module                      | Domain              |
//! |---------------------------------|-----------------------------|---------------------|
//! | `/v1/risk-matrix*`              | [`routes::matrix`]          | Fixed rating table  |
//! | `/v1/sessions`, `/{id}/unlock`  | [`routes::sessions`]        | Sessions and gate   |
//! | `/v1/sessions/{id}/hazard` etc. | [`routes::assessments`]     | Two-step entry      |
//! | `/v1/sessions/{id}/export`      | [`routes::export`]          | Spreadsheet export  |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! The access gate is per session rather than per request, so it is
//! enforced inside the handlers instead of as a layer.
//!
//! ## OpenAPI
//!
//! Auto-generated OpenAPI 3.1 spec via utoipa derive macros at `/openapi.json`.

pub mod auth;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

pub use error::AppError;
pub use state::AppState;

/// Assemble the full application router with all routes and middleware.
///
/// Health checks and `/metrics` sit outside the request metrics layer.
pub fn app(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::matrix::router())
        .merge(routes::sessions::router())
        .merge(routes::assessments::router())
        .merge(routes::export::router())
        .merge(openapi::router())
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let ops = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness))
        .route("/metrics", get(middleware::metrics::render_metrics))
        .with_state(state);

    Router::new().merge(ops).merge(api)
}

/// Liveness check: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness check: returns 200 when the application is ready to serve.
async fn readiness() -> &'static str {
    "ready"
}
