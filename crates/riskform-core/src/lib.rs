//! # riskform-core: Foundational Types for Hazard Risk Assessment
//!
//! Defines the closed rating vocabularies, the fixed risk matrix that maps
//! them onto a risk rating, and the record shapes that flow through the
//! entry workflow and the exporter. Every other crate in the workspace
//! depends on `riskform-core`; it depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Closed enumerations.** `ConsequenceRating`, `Likelihood` and
//!    `RiskRating` are enums with exhaustive `match` everywhere. No bare
//!    strings cross the workflow boundary.
//!
//! 2. **One matrix.** The 25-entry table in [`matrix::RISK_MATRIX`] is the
//!    single definition of how ratings combine. It is a `const`, never mutated.
//!
//! 3. **Lookups degrade, they don't fail.** A miss (only reachable through
//!    the string-keyed [`lookup_labels`]) yields [`RiskRating::Unknown`].
//!
//! ## Crate Policy
//!
//! - No dependencies on other `riskform-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod matrix;
pub mod rating;
pub mod record;

// Re-export primary types for ergonomic imports.
pub use error::{ParseRatingError, ValidationError};
pub use matrix::{lookup, lookup_labels, RiskMatrixEntry, RISK_MATRIX, RISK_MATRIX_SIZE};
pub use rating::{ConsequenceRating, Likelihood, RiskRating};
pub use record::{
    AssessmentRecord, PendingEntry, COLUMN_COUNT, COLUMN_HEADERS, DATE_COLUMN, RISK_RATING_COLUMN,
};
