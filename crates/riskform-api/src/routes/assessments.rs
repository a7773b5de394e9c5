//! # Assessment Entry
//!
//! The two-step form and the table it fills.
//!
//! ## Endpoints
//!
//! - `POST /v1/sessions/{session_id}/hazard`: step 1, "Add Entry"
//! - `POST /v1/sessions/{session_id}/actions`: step 2, "Save to Table"
//! - `GET /v1/sessions/{session_id}/entries`: the table with risk highlighting
//!
//! All three require an unlocked session. The session and the gate are
//! resolved before the form is looked at, so a missing session is a 404 and a
//! locked one a 401 whatever the body holds.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use metrics::counter;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use riskform_core::{
    AssessmentRecord, ConsequenceRating, Likelihood, PendingEntry, COLUMN_HEADERS,
};
use riskform_export::RiskHighlight;
use riskform_workflow::HazardInput;

use super::{today, with_unlocked_session};
use crate::error::AppError;
use crate::extractors::{check_length, extract_validated_json, Validate};
use crate::state::AppState;

/// Upper bound on hazard and consequences text.
pub const MAX_DESCRIPTION_CHARS: usize = 1000;
/// Upper bound on recommended action text.
pub const MAX_ACTIONS_CHARS: usize = 4000;

// ── Request DTOs ────────────────────────────────────────────────────

/// Step 1 form. Ratings are exact labels, e.g. "Significant" and "Likely".
#[derive(Debug, Deserialize, ToSchema)]
pub struct HazardForm {
    #[serde(default)]
    pub hazard: String,
    #[serde(default)]
    pub consequences: String,
    pub consequence_rating: String,
    pub likelihood: String,
}

impl Validate for HazardForm {
    fn validate(&self) -> Result<(), String> {
        check_length("hazard", &self.hazard, MAX_DESCRIPTION_CHARS)?;
        check_length("consequences", &self.consequences, MAX_DESCRIPTION_CHARS)
    }
}

/// Step 2 form.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ActionsForm {
    #[serde(default)]
    pub actions: String,
}

impl Validate for ActionsForm {
    fn validate(&self) -> Result<(), String> {
        check_length("actions", &self.actions, MAX_ACTIONS_CHARS)
    }
}

// ── Response DTOs ───────────────────────────────────────────────────

/// Screen styling for a risk cell.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HighlightView {
    pub background: String,
    pub color: String,
    pub bold: bool,
    /// The same style as an inline CSS declaration list.
    pub css: String,
}

impl HighlightView {
    fn for_label(label: &str) -> Option<Self> {
        RiskHighlight::for_label(label).map(|h| Self {
            background: h.background.to_string(),
            color: h.color.to_string(),
            bold: h.bold,
            css: h.to_css(),
        })
    }
}

/// Step 1 result: the entry with its calculated risk rating.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PendingEntryView {
    pub hazard: String,
    pub date: NaiveDate,
    pub consequences: String,
    pub consequence_rating: String,
    pub likelihood: String,
    pub risk_rating: String,
    pub highlight: Option<HighlightView>,
}

impl From<&PendingEntry> for PendingEntryView {
    fn from(pending: &PendingEntry) -> Self {
        let risk_rating = pending.risk_rating.to_string();
        Self {
            hazard: pending.hazard.clone(),
            date: pending.date,
            consequences: pending.consequences.clone(),
            consequence_rating: pending.consequence_rating.to_string(),
            likelihood: pending.likelihood.to_string(),
            highlight: HighlightView::for_label(&risk_rating),
            risk_rating,
        }
    }
}

/// A committed record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntryView {
    pub hazard: String,
    pub date: NaiveDate,
    pub consequences: String,
    pub consequence_rating: String,
    pub likelihood: String,
    pub risk_rating: String,
    pub actions: String,
}

impl From<&AssessmentRecord> for EntryView {
    fn from(record: &AssessmentRecord) -> Self {
        Self {
            hazard: record.hazard.clone(),
            date: record.date,
            consequences: record.consequences.clone(),
            consequence_rating: record.consequence_rating.to_string(),
            likelihood: record.likelihood.to_string(),
            risk_rating: record.risk_rating.to_string(),
            actions: record.actions.clone(),
        }
    }
}

/// One table row: the seven cells in column order plus the risk styling.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TableRow {
    pub cells: Vec<String>,
    pub highlight: Option<HighlightView>,
}

/// The session's table in insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TableView {
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl TableView {
    fn from_records<'a>(records: impl IntoIterator<Item = &'a AssessmentRecord>) -> Self {
        let rows = records
            .into_iter()
            .map(|record| TableRow {
                highlight: HighlightView::for_label(record.risk_rating.as_str()),
                cells: record.cells().to_vec(),
            })
            .collect();
        Self {
            columns: COLUMN_HEADERS.iter().map(|c| c.to_string()).collect(),
            rows,
        }
    }
}

// ── Router ──────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/sessions/{session_id}/hazard", post(submit_hazard))
        .route("/v1/sessions/{session_id}/actions", post(submit_actions))
        .route("/v1/sessions/{session_id}/entries", get(list_entries))
}

fn count_rejection<T>(result: Result<T, AppError>) -> Result<T, AppError> {
    if let Err(AppError::Validation(reason)) = &result {
        counter!("riskform_validation_rejections_total").increment(1);
        tracing::info!(%reason, "form submission rejected");
    }
    result
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /v1/sessions/{session_id}/hazard: Record the hazard and rate it.
///
/// Resubmitting while an entry is pending replaces it.
#[utoipa::path(
    post,
    path = "/v1/sessions/{session_id}/hazard",
    params(("session_id" = Uuid, Path, description = "Session ID")),
    request_body = HazardForm,
    responses(
        (status = 200, description = "Pending entry with calculated rating", body = PendingEntryView),
        (status = 400, description = "Malformed body or unknown rating label", body = crate::error::ErrorBody),
        (status = 401, description = "Session locked", body = crate::error::ErrorBody),
        (status = 404, description = "Session not found", body = crate::error::ErrorBody),
        (status = 422, description = "Hazard or consequences missing", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn submit_hazard(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    body: Result<Json<HazardForm>, JsonRejection>,
) -> Result<Json<PendingEntryView>, AppError> {
    let date = today();

    let view = count_rejection(with_unlocked_session(&state, &session_id, |session| {
        let form = extract_validated_json(body)?;
        let consequence_rating: ConsequenceRating = form.consequence_rating.parse()?;
        let likelihood: Likelihood = form.likelihood.parse()?;
        let input =
            HazardInput::new(form.hazard, form.consequences, consequence_rating, likelihood);
        let pending = session.workflow_mut().submit_hazard_step(input, date)?;
        Ok(PendingEntryView::from(pending))
    }))?;

    tracing::info!(
        %session_id,
        consequence_rating = %view.consequence_rating,
        likelihood = %view.likelihood,
        risk_rating = %view.risk_rating,
        "hazard recorded, awaiting action"
    );
    Ok(Json(view))
}

/// POST /v1/sessions/{session_id}/actions: Commit the pending entry.
#[utoipa::path(
    post,
    path = "/v1/sessions/{session_id}/actions",
    params(("session_id" = Uuid, Path, description = "Session ID")),
    request_body = ActionsForm,
    responses(
        (status = 201, description = "Entry saved to the table", body = EntryView),
        (status = 400, description = "Malformed body", body = crate::error::ErrorBody),
        (status = 401, description = "Session locked", body = crate::error::ErrorBody),
        (status = 404, description = "Session not found", body = crate::error::ErrorBody),
        (status = 409, description = "No pending entry", body = crate::error::ErrorBody),
        (status = 422, description = "Recommended action missing", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn submit_actions(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    body: Result<Json<ActionsForm>, JsonRejection>,
) -> Result<(StatusCode, Json<EntryView>), AppError> {
    let (entry, entry_count) = count_rejection(with_unlocked_session(
        &state,
        &session_id,
        |session| {
            let form = extract_validated_json(body)?;
            let workflow = session.workflow_mut();
            let entry = EntryView::from(&workflow.submit_action_step(&form.actions)?);
            Ok((entry, workflow.entries().len()))
        },
    ))?;

    counter!("riskform_entries_committed_total").increment(1);
    tracing::info!(
        %session_id,
        risk_rating = %entry.risk_rating,
        entry_count,
        "entry saved to table"
    );
    Ok((StatusCode::CREATED, Json(entry)))
}

/// GET /v1/sessions/{session_id}/entries: The table, oldest entry first.
#[utoipa::path(
    get,
    path = "/v1/sessions/{session_id}/entries",
    params(("session_id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Table rows in insertion order", body = TableView),
        (status = 401, description = "Session locked", body = crate::error::ErrorBody),
        (status = 404, description = "Session not found", body = crate::error::ErrorBody),
    ),
    tag = "assessments"
)]
pub async fn list_entries(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<TableView>, AppError> {
    with_unlocked_session(&state, &session_id, |session| {
        Ok(TableView::from_records(session.workflow().entries()))
    })
    .map(Json)
}
