//! # Error Types
//!
//! Errors raised by the core vocabulary. All errors use `thiserror` for
//! derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// A rating label did not match any variant of its enumeration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} label: {value:?}")]
pub struct ParseRatingError {
    /// Which vocabulary was being parsed ("consequence rating", "likelihood", ...).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseRatingError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// A required form field was left empty.
///
/// The message text is what the user sees as the warning next to the form.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Step 1 submitted without a hazard or without consequences.
    #[error("please enter both Hazard and Consequences")]
    MissingHazardFields,

    /// Step 2 submitted without a recommended action.
    #[error("please provide a recommended action")]
    MissingActions,
}
