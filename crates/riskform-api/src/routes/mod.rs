//! # API Route Modules
//!
//! - `matrix`: read-only view of the fixed risk matrix and label lookup.
//! - `sessions`: session lifecycle and the access gate.
//! - `assessments`: the two form steps and the table view.
//! - `export`: spreadsheet download of a session's table.

pub mod assessments;
pub mod export;
pub mod matrix;
pub mod sessions;

use chrono::{Local, NaiveDate};
use riskform_workflow::Session;
use uuid::Uuid;

use crate::auth::require_unlocked;
use crate::error::AppError;
use crate::state::AppState;

/// The calendar date stamped on new entries and export file names.
pub(crate) fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub(crate) fn session_not_found(id: &Uuid) -> AppError {
    AppError::NotFound(format!("session {id} not found"))
}

/// Run `f` against an unlocked session under its write lock.
pub(crate) fn with_unlocked_session<R>(
    state: &AppState,
    id: &Uuid,
    f: impl FnOnce(&mut Session) -> Result<R, AppError>,
) -> Result<R, AppError> {
    state
        .sessions
        .try_update(id, |session| {
            require_unlocked(session)?;
            f(session)
        })
        .ok_or_else(|| session_not_found(id))?
}
