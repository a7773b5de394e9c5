//! # Risk Matrix
//!
//! - GET /v1/risk-matrix: all 25 entries
//! - GET /v1/risk-matrix/lookup: rating for a pair of labels

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use riskform_core::{matrix, RiskMatrixEntry};

use crate::error::AppError;
use crate::state::AppState;

// ── DTOs ────────────────────────────────────────────────────────────

/// One cell of the risk matrix.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MatrixEntryView {
    pub consequence_rating: String,
    pub likelihood: String,
    pub risk_rating: String,
}

impl From<&RiskMatrixEntry> for MatrixEntryView {
    fn from(entry: &RiskMatrixEntry) -> Self {
        Self {
            consequence_rating: entry.consequence_rating.to_string(),
            likelihood: entry.likelihood.to_string(),
            risk_rating: entry.risk_rating.to_string(),
        }
    }
}

/// Labels to look up. Anything outside the enumerations rates `Unknown`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LookupParams {
    /// e.g. "Significant"
    pub consequence_rating: String,
    /// e.g. "Likely"
    pub likelihood: String,
}

// ── Router ──────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/risk-matrix", get(list_matrix))
        .route("/v1/risk-matrix/lookup", get(lookup_rating))
}

// ── Handlers ────────────────────────────────────────────────────────

/// GET /v1/risk-matrix: The full consequence × likelihood table.
#[utoipa::path(
    get,
    path = "/v1/risk-matrix",
    responses(
        (status = 200, description = "All 25 matrix entries", body = Vec<MatrixEntryView>),
    ),
    tag = "risk_matrix"
)]
pub async fn list_matrix() -> Json<Vec<MatrixEntryView>> {
    Json(matrix::entries().iter().map(MatrixEntryView::from).collect())
}

/// GET /v1/risk-matrix/lookup: Rate a consequence/likelihood pair.
#[utoipa::path(
    get,
    path = "/v1/risk-matrix/lookup",
    params(LookupParams),
    responses(
        (status = 200, description = "Rating for the pair", body = MatrixEntryView),
        (status = 400, description = "Missing query parameter", body = crate::error::ErrorBody),
    ),
    tag = "risk_matrix"
)]
pub async fn lookup_rating(
    params: Result<Query<LookupParams>, QueryRejection>,
) -> Result<Json<MatrixEntryView>, AppError> {
    let Query(params) = params.map_err(|err| AppError::BadRequest(err.body_text()))?;
    let risk_rating = matrix::lookup_labels(&params.consequence_rating, &params.likelihood);
    tracing::debug!(
        consequence_rating = %params.consequence_rating,
        likelihood = %params.likelihood,
        %risk_rating,
        "risk matrix lookup"
    );
    Ok(Json(MatrixEntryView {
        consequence_rating: params.consequence_rating,
        likelihood: params.likelihood,
        risk_rating: risk_rating.to_string(),
    }))
}
