//! # Session Context
//!
//! One user's form session: the access flag and the workflow. Handlers take
//! a `&mut Session` and nothing else, so two sessions never share state.

use serde::{Deserialize, Serialize};

use crate::gate::{CredentialVerifier, GateError};
use crate::workflow::AssessmentWorkflow;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    authenticated: bool,
    workflow: AssessmentWorkflow,
}

impl Session {
    /// A locked session with an empty workflow.
    pub fn new() -> Self {
        Self::default()
    }

    /// An already-unlocked session, for when the gate is open.
    pub fn unlocked() -> Self {
        Self {
            authenticated: true,
            workflow: AssessmentWorkflow::new(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// Present a credential. On success the session stays unlocked for the
    /// rest of its lifetime; a failed attempt never re-locks it.
    pub fn unlock(
        &mut self,
        verifier: &dyn CredentialVerifier,
        presented: &str,
    ) -> Result<(), GateError> {
        if self.authenticated {
            return Ok(());
        }
        if verifier.verify(presented) {
            self.authenticated = true;
            Ok(())
        } else {
            Err(GateError)
        }
    }

    pub fn workflow(&self) -> &AssessmentWorkflow {
        &self.workflow
    }

    pub fn workflow_mut(&mut self) -> &mut AssessmentWorkflow {
        &mut self.workflow
    }
}
