//! # Assessment Records
//!
//! [`PendingEntry`] is the half-finished record held between the two form
//! steps; [`AssessmentRecord`] is the committed row. Both are plain data:
//! construction rules (non-empty fields, rating derivation) live in the
//! workflow crate.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::rating::{ConsequenceRating, Likelihood, RiskRating};

/// Number of columns in the assessment table.
pub const COLUMN_COUNT: usize = 7;

/// Column headers of the assessment table, in display and export order.
pub const COLUMN_HEADERS: [&str; COLUMN_COUNT] = [
    "Hazard",
    "Date",
    "Consequences",
    "Consequence Rating",
    "Likelihood",
    "RiskRating",
    "Actions",
];

/// Index of the date column within [`COLUMN_HEADERS`].
pub const DATE_COLUMN: usize = 1;

/// Index of the risk rating column within [`COLUMN_HEADERS`].
pub const RISK_RATING_COLUMN: usize = 5;

/// A record after step 1, waiting for its recommended action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingEntry {
    pub hazard: String,
    pub date: NaiveDate,
    pub consequences: String,
    pub consequence_rating: ConsequenceRating,
    pub likelihood: Likelihood,
    pub risk_rating: RiskRating,
}

impl PendingEntry {
    /// Merge the recommended action in, producing the final record.
    pub fn complete(self, actions: impl Into<String>) -> AssessmentRecord {
        AssessmentRecord {
            hazard: self.hazard,
            date: self.date,
            consequences: self.consequences,
            consequence_rating: self.consequence_rating,
            likelihood: self.likelihood,
            risk_rating: self.risk_rating,
            actions: actions.into(),
        }
    }
}

/// A finalized row of the risk assessment table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub hazard: String,
    pub date: NaiveDate,
    pub consequences: String,
    pub consequence_rating: ConsequenceRating,
    pub likelihood: Likelihood,
    pub risk_rating: RiskRating,
    pub actions: String,
}

impl AssessmentRecord {
    /// The seven display strings in [`COLUMN_HEADERS`] order.
    ///
    /// Dates render as ISO `YYYY-MM-DD`.
    pub fn cells(&self) -> [String; COLUMN_COUNT] {
        [
            self.hazard.clone(),
            self.date.format("%Y-%m-%d").to_string(),
            self.consequences.clone(),
            self.consequence_rating.to_string(),
            self.likelihood.to_string(),
            self.risk_rating.to_string(),
            self.actions.clone(),
        ]
    }
}
