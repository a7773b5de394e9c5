//! # Spreadsheet Export
//!
//! `GET /v1/sessions/{session_id}/export`: "Export Table to Excel".
//!
//! The records are copied out under the session lock and the workbook is
//! rendered after it is released.

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use metrics::counter;
use uuid::Uuid;

use riskform_export::{export_file_name, XLSX_MIME};

use super::{today, with_unlocked_session};
use crate::error::AppError;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/v1/sessions/{session_id}/export", get(export_table))
}

/// GET /v1/sessions/{session_id}/export: Download the table as `.xlsx`.
#[utoipa::path(
    get,
    path = "/v1/sessions/{session_id}/export",
    params(("session_id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Workbook download",
            content_type = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            body = Vec<u8>),
        (status = 401, description = "Session locked", body = crate::error::ErrorBody),
        (status = 404, description = "Session not found", body = crate::error::ErrorBody),
    ),
    tag = "export"
)]
pub async fn export_table(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let records = with_unlocked_session(&state, &session_id, |session| {
        Ok(session.workflow().entries().records().to_vec())
    })?;

    let bytes = riskform_export::export(&records)?;
    let file_name = export_file_name(today());

    counter!("riskform_exports_total").increment(1);
    tracing::info!(
        %session_id,
        rows = records.len(),
        size = bytes.len(),
        %file_name,
        "table exported"
    );

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_MIME.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}
