//! # Access Gate
//!
//! A session starts locked and is unlocked by presenting a credential to a
//! [`CredentialVerifier`]. The shipped verifier compares against a single
//! shared secret. That is a convenience gate, not a credential system: there
//! is no per-user identity, no hashing at rest and no rate limiting. Swap in
//! another verifier for anything beyond that.

use subtle::ConstantTimeEq;
use thiserror::Error;

/// Decides whether a presented credential unlocks a session.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, presented: &str) -> bool;
}

/// The presented credential was not accepted.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("access secret rejected")]
pub struct GateError;

/// Accepts exactly one configured secret.
///
/// Custom `Debug` redacts the secret to prevent credential leakage in logs.
#[derive(Clone)]
pub struct SharedSecretVerifier {
    secret: String,
}

impl SharedSecretVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for SharedSecretVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedSecretVerifier")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl CredentialVerifier for SharedSecretVerifier {
    /// Constant-time comparison. When lengths differ, a dummy comparison
    /// keeps timing independent of how much of the secret matched.
    fn verify(&self, presented: &str) -> bool {
        let presented = presented.as_bytes();
        let expected = self.secret.as_bytes();
        if presented.len() != expected.len() {
            let _ = expected.ct_eq(expected);
            return false;
        }
        presented.ct_eq(expected).into()
    }
}

/// Accepts everything. Used when no secret is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGate;

impl CredentialVerifier for OpenGate {
    fn verify(&self, _presented: &str) -> bool {
        true
    }
}
