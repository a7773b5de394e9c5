//! # riskform-workflow: Session State and the Two-Step Entry Workflow
//!
//! Everything a single form session owns lives here, as explicit values
//! rather than ambient globals:
//!
//! - **Entry store** (`store.rs`): ordered, append-only list of committed
//!   assessment records.
//!
//! - **Workflow** (`workflow.rs`): the two-state machine
//!   `AwaitingHazardInput → AwaitingActionInput → AwaitingHazardInput`.
//!   Step 1 validates the hazard fields and computes the risk rating; step 2
//!   attaches the recommended action and commits the record.
//!
//! - **Gate** (`gate.rs`): the [`CredentialVerifier`] seam used to unlock a
//!   session.
//!
//! - **Session** (`session.rs`): authentication flag plus workflow, the
//!   context object handed to every handler.
//!
//! ## Design
//!
//! The workflow stage is derived from whether a pending entry exists, so the
//! stage and the pending slot cannot disagree. Rejected submissions leave the
//! session untouched.

pub mod gate;
pub mod session;
pub mod store;
pub mod workflow;

pub use gate::{CredentialVerifier, GateError, OpenGate, SharedSecretVerifier};
pub use session::Session;
pub use store::EntryStore;
pub use workflow::{AssessmentWorkflow, HazardInput, WorkflowError, WorkflowStage};
