//! # OpenAPI Specification Assembly
//!
//! Assembles all utoipa-documented routes into a single OpenAPI 3.1 spec,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// Assembled OpenAPI spec for the entire API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Risk Assessment Form API",
        version = "0.1.0",
        description = "Two-step hazard risk assessment entry, table view, spreadsheet export and the fixed 5x5 risk matrix.",
        license(name = "AGPL-3.0-or-later")
    ),
    paths(
        // Risk matrix
        crate::routes::matrix::list_matrix,
        crate::routes::matrix::lookup_rating,
        // Sessions
        crate::routes::sessions::create_session,
        crate::routes::sessions::get_session,
        crate::routes::sessions::end_session,
        crate::routes::sessions::unlock_session,
        // Assessments
        crate::routes::assessments::submit_hazard,
        crate::routes::assessments::submit_actions,
        crate::routes::assessments::list_entries,
        // Export
        crate::routes::export::export_table,
    ),
    components(schemas(
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
        crate::routes::matrix::MatrixEntryView,
        crate::routes::sessions::SessionView,
        crate::routes::sessions::UnlockRequest,
        crate::routes::assessments::HazardForm,
        crate::routes::assessments::ActionsForm,
        crate::routes::assessments::HighlightView,
        crate::routes::assessments::PendingEntryView,
        crate::routes::assessments::EntryView,
        crate::routes::assessments::TableRow,
        crate::routes::assessments::TableView,
    )),
    tags(
        (name = "risk_matrix", description = "Fixed consequence × likelihood rating table"),
        (name = "sessions", description = "Form sessions and the access gate"),
        (name = "assessments", description = "Two-step entry workflow and table view"),
        (name = "export", description = "Spreadsheet download"),
    )
)]
pub struct ApiDoc;

/// Build the OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

/// GET /openapi.json: Return the generated OpenAPI specification.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
