//! # Sessions
//!
//! Each form user works in their own session. A session holds the
//! access flag, the pending entry and the entry store; ending it drops
//! all three.
//!
//! ## Endpoints
//!
//! - `POST /v1/sessions`: start a session
//! - `GET /v1/sessions/{session_id}`: stage, pending entry and entry count
//! - `DELETE /v1/sessions/{session_id}`: end the session
//! - `POST /v1/sessions/{session_id}/unlock`: present the access secret

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use riskform_workflow::Session;

use super::assessments::PendingEntryView;
use super::session_not_found;
use crate::error::AppError;
use crate::extractors::extract_json;
use crate::state::AppState;

// ── Request/Response DTOs ───────────────────────────────────────────

/// Current state of a session.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionView {
    pub session_id: Uuid,
    pub authenticated: bool,
    /// `awaiting_hazard_input` or `awaiting_action_input`.
    pub stage: String,
    /// The entry waiting for its recommended action, if any.
    pub pending: Option<PendingEntryView>,
    pub entry_count: usize,
}

impl SessionView {
    pub fn new(session_id: Uuid, session: &Session) -> Self {
        let workflow = session.workflow();
        Self {
            session_id,
            authenticated: session.is_authenticated(),
            stage: workflow.stage().to_string(),
            pending: workflow.pending().map(PendingEntryView::from),
            entry_count: workflow.entries().len(),
        }
    }
}

/// Credential presented to the access gate.
#[derive(Deserialize, ToSchema)]
pub struct UnlockRequest {
    pub secret: String,
}

impl std::fmt::Debug for UnlockRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnlockRequest")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

// ── Router ──────────────────────────────────────────────────────────

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/v1/sessions", post(create_session))
        .route(
            "/v1/sessions/{session_id}",
            get(get_session).delete(end_session),
        )
        .route("/v1/sessions/{session_id}/unlock", post(unlock_session))
}

// ── Handlers ────────────────────────────────────────────────────────

/// POST /v1/sessions: Start a session.
///
/// With no access secret configured the session starts unlocked. Refused
/// with 503 while the store holds its maximum of live sessions.
#[utoipa::path(
    post,
    path = "/v1/sessions",
    responses(
        (status = 201, description = "Session started", body = SessionView),
        (status = 503, description = "Session limit reached", body = crate::error::ErrorBody),
    ),
    tag = "sessions"
)]
pub async fn create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let session = if state.gate_open() {
        Session::unlocked()
    } else {
        Session::new()
    };
    let view_session = session.clone();
    let session_id = state.sessions.create(session).map_err(|err| {
        tracing::warn!(max_sessions = err.max_sessions, "session refused");
        AppError::from(err)
    })?;
    tracing::info!(
        %session_id,
        authenticated = view_session.is_authenticated(),
        "session started"
    );
    Ok((
        StatusCode::CREATED,
        Json(SessionView::new(session_id, &view_session)),
    ))
}

/// GET /v1/sessions/{session_id}: Session state.
#[utoipa::path(
    get,
    path = "/v1/sessions/{session_id}",
    params(("session_id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 200, description = "Session found", body = SessionView),
        (status = 404, description = "Session not found", body = crate::error::ErrorBody),
    ),
    tag = "sessions"
)]
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    state
        .sessions
        .get(&session_id)
        .map(|session| Json(SessionView::new(session_id, &session)))
        .ok_or_else(|| session_not_found(&session_id))
}

/// DELETE /v1/sessions/{session_id}: End a session and drop its table.
#[utoipa::path(
    delete,
    path = "/v1/sessions/{session_id}",
    params(("session_id" = Uuid, Path, description = "Session ID")),
    responses(
        (status = 204, description = "Session ended"),
        (status = 404, description = "Session not found", body = crate::error::ErrorBody),
    ),
    tag = "sessions"
)]
pub async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let session = state
        .sessions
        .remove(&session_id)
        .ok_or_else(|| session_not_found(&session_id))?;
    tracing::info!(
        %session_id,
        dropped_entries = session.workflow().entries().len(),
        "session ended"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/sessions/{session_id}/unlock: Present the access secret.
///
/// A session stays unlocked once unlocked; a wrong secret never re-locks it.
#[utoipa::path(
    post,
    path = "/v1/sessions/{session_id}/unlock",
    params(("session_id" = Uuid, Path, description = "Session ID")),
    request_body = UnlockRequest,
    responses(
        (status = 200, description = "Session unlocked", body = SessionView),
        (status = 401, description = "Secret rejected", body = crate::error::ErrorBody),
        (status = 404, description = "Session not found", body = crate::error::ErrorBody),
    ),
    tag = "sessions"
)]
pub async fn unlock_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    body: Result<Json<UnlockRequest>, JsonRejection>,
) -> Result<Json<SessionView>, AppError> {
    let req = extract_json(body)?;
    let verifier = state.verifier.clone();
    let view = state
        .sessions
        .try_update(&session_id, |session| {
            session.unlock(verifier.as_ref(), &req.secret)?;
            Ok::<_, AppError>(SessionView::new(session_id, session))
        })
        .ok_or_else(|| session_not_found(&session_id))?;
    match &view {
        Ok(_) => tracing::info!(%session_id, "session unlocked"),
        Err(_) => tracing::warn!(%session_id, "access secret rejected"),
    }
    view.map(Json)
}
