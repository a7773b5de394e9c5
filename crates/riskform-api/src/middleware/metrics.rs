//! # Prometheus Metrics
//!
//! Request metrics recorded through the `metrics` facade. The binary
//! installs a Prometheus recorder; without one (as in tests) the macros
//! are no-ops.
//!
//! | Metric                                   | Type      | Labels                  |
//! |------------------------------------------|-----------|-------------------------|
//! | `riskform_http_requests_total`           | counter   | method, path, status    |
//! | `riskform_http_request_duration_seconds` | histogram | method, path            |
//!
//! Domain counters (`riskform_entries_committed_total`,
//! `riskform_exports_total`, `riskform_validation_rejections_total`) are
//! incremented in the route handlers.

use std::time::Instant;

use axum::extract::{MatchedPath, Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use metrics::{counter, histogram};

use crate::state::AppState;

/// Middleware that counts requests and records their latency.
///
/// The path label is the matched route template, so session IDs do not
/// explode label cardinality.
pub async fn metrics_middleware(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16().to_string();
    counter!(
        "riskform_http_requests_total",
        "method" => method.clone(),
        "path" => path.clone(),
        "status" => status
    )
    .increment(1);
    histogram!(
        "riskform_http_request_duration_seconds",
        "method" => method,
        "path" => path
    )
    .record(start.elapsed().as_secs_f64());

    response
}

/// GET /metrics: Prometheus text exposition.
pub async fn render_metrics(State(state): State<AppState>) -> Response {
    let body = state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
        .into_response()
}
