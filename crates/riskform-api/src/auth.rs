//! # Access Gate
//!
//! A session is locked until the caller presents the shared access
//! secret. The secret comes from `ACCESS_SECRET`; when it is unset the gate
//! is open and every session starts unlocked.
//!
//! The comparison itself lives in [`riskform_workflow::SharedSecretVerifier`]
//! and runs in constant time.

use std::sync::Arc;

use riskform_workflow::{CredentialVerifier, OpenGate, Session, SharedSecretVerifier};

use crate::error::AppError;
use crate::state::AppConfig;

/// Pick the verifier for a configuration.
pub fn verifier_for(config: &AppConfig) -> Arc<dyn CredentialVerifier> {
    match &config.access_secret {
        Some(secret) => Arc::new(SharedSecretVerifier::new(secret.clone())),
        None => Arc::new(OpenGate),
    }
}

/// Reject requests against a locked session.
pub fn require_unlocked(session: &Session) -> Result<(), AppError> {
    if session.is_authenticated() {
        Ok(())
    } else {
        Err(AppError::Unauthorized(
            "session is locked: unlock it with the access secret".to_string(),
        ))
    }
}
