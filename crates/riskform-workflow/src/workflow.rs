//! # Two-Step Entry Workflow
//!
//! ## States
//!
//! ```text
//!  AwaitingHazardInput ──submit_hazard_step──▶ AwaitingActionInput
//!          ▲                                         │
//!          └──────────── submit_action_step ─────────┘
//!                        (record committed)
//! ```
//!
//! Step 1 may be resubmitted while a pending entry exists: the previous
//! pending entry is replaced, not queued. A rejected submission (empty
//! required text) changes nothing.
//!
//! ## Design Decision
//!
//! With only two states, an enum stage derived from the pending slot is used
//! instead of typestate types. The session has to live in a map between
//! requests, which a typestate value cannot do without boxing it back into
//! an enum anyway.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use riskform_core::{
    lookup, AssessmentRecord, ConsequenceRating, Likelihood, PendingEntry, ValidationError,
};

use crate::store::EntryStore;

/// Where the workflow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStage {
    /// Waiting for hazard, consequences and the two ratings.
    AwaitingHazardInput,
    /// A pending entry exists; waiting for the recommended action.
    AwaitingActionInput,
}

impl WorkflowStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AwaitingHazardInput => "awaiting_hazard_input",
            Self::AwaitingActionInput => "awaiting_action_input",
        }
    }
}

impl std::fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors from workflow transitions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    /// Required text was empty. The workflow stays where it was.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Step 2 was submitted while no step 1 result is pending.
    #[error("no pending entry: submit the hazard step first")]
    NoPendingEntry,
}

/// Step 1 form fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardInput {
    pub hazard: String,
    pub consequences: String,
    pub consequence_rating: ConsequenceRating,
    pub likelihood: Likelihood,
}

impl HazardInput {
    pub fn new(
        hazard: impl Into<String>,
        consequences: impl Into<String>,
        consequence_rating: ConsequenceRating,
        likelihood: Likelihood,
    ) -> Self {
        Self {
            hazard: hazard.into(),
            consequences: consequences.into(),
            consequence_rating,
            likelihood,
        }
    }
}

/// Pending slot plus the entry store of one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentWorkflow {
    pending: Option<PendingEntry>,
    entries: EntryStore,
}

impl AssessmentWorkflow {
    /// Start in `AwaitingHazardInput` with an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> WorkflowStage {
        if self.pending.is_some() {
            WorkflowStage::AwaitingActionInput
        } else {
            WorkflowStage::AwaitingHazardInput
        }
    }

    pub fn pending(&self) -> Option<&PendingEntry> {
        self.pending.as_ref()
    }

    pub fn entries(&self) -> &EntryStore {
        &self.entries
    }

    /// Step 1 ("Add Entry").
    ///
    /// Requires non-empty hazard and consequences. On success the risk
    /// rating is looked up, a pending entry dated `today` replaces any
    /// existing one, and the workflow moves to `AwaitingActionInput`.
    pub fn submit_hazard_step(
        &mut self,
        input: HazardInput,
        today: NaiveDate,
    ) -> Result<&PendingEntry, WorkflowError> {
        if input.hazard.is_empty() || input.consequences.is_empty() {
            return Err(ValidationError::MissingHazardFields.into());
        }

        let risk_rating = lookup(input.consequence_rating, input.likelihood);
        let pending = PendingEntry {
            hazard: input.hazard,
            date: today,
            consequences: input.consequences,
            consequence_rating: input.consequence_rating,
            likelihood: input.likelihood,
            risk_rating,
        };
        Ok(&*self.pending.insert(pending))
    }

    /// Step 2 ("Save to Table").
    ///
    /// Requires a pending entry and non-empty actions. On success the
    /// completed record is appended to the store, the pending slot is
    /// cleared, and the workflow returns to `AwaitingHazardInput`.
    pub fn submit_action_step(&mut self, actions: &str) -> Result<AssessmentRecord, WorkflowError> {
        if self.pending.is_none() {
            return Err(WorkflowError::NoPendingEntry);
        }
        if actions.is_empty() {
            return Err(ValidationError::MissingActions.into());
        }

        let pending = self.pending.take().ok_or(WorkflowError::NoPendingEntry)?;
        let record = pending.complete(actions);
        self.entries.append(record.clone());
        Ok(record)
    }
}
