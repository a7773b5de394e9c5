//! # Risk Matrix: Single Source of Truth
//!
//! The fixed 5x5 mapping from (consequence rating, likelihood) to risk rating.
//!
//! ```text
//!               Certain  Probable  Likely  Unlikely  Rare
//! Extensive     High     High      High    High      Medium
//! Major         High     High      High    Medium    Medium
//! Significant   High     High      Medium  Medium    Low
//! Minor         Medium   Medium    Low     Low       Low
//! Negligible    Low      Low       Low     Low       Low
//! ```
//!
//! The table is the full cross product of both vocabularies, so [`lookup`]
//! never misses for typed input. [`lookup_labels`] accepts raw strings and
//! degrades to [`RiskRating::Unknown`] for anything outside the vocabularies.

use serde::{Deserialize, Serialize};

use crate::rating::{ConsequenceRating, Likelihood, RiskRating};

/// Number of entries in the matrix (5 consequence levels x 5 likelihoods).
pub const RISK_MATRIX_SIZE: usize = 25;

/// One cell of the risk matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskMatrixEntry {
    pub consequence_rating: ConsequenceRating,
    pub likelihood: Likelihood,
    pub risk_rating: RiskRating,
}

const fn entry(
    consequence_rating: ConsequenceRating,
    likelihood: Likelihood,
    risk_rating: RiskRating,
) -> RiskMatrixEntry {
    RiskMatrixEntry {
        consequence_rating,
        likelihood,
        risk_rating,
    }
}

use ConsequenceRating::{Extensive, Major, Minor, Negligible, Significant};
use Likelihood::{Certain, Likely, Probable, Rare, Unlikely};
use RiskRating::{High, Low, Medium};

/// The matrix, row-major in form order.
pub const RISK_MATRIX: [RiskMatrixEntry; RISK_MATRIX_SIZE] = [
    entry(Extensive, Certain, High),
    entry(Extensive, Probable, High),
    entry(Extensive, Likely, High),
    entry(Extensive, Unlikely, High),
    entry(Extensive, Rare, Medium),
    entry(Major, Certain, High),
    entry(Major, Probable, High),
    entry(Major, Likely, High),
    entry(Major, Unlikely, Medium),
    entry(Major, Rare, Medium),
    entry(Significant, Certain, High),
    entry(Significant, Probable, High),
    entry(Significant, Likely, Medium),
    entry(Significant, Unlikely, Medium),
    entry(Significant, Rare, Low),
    entry(Minor, Certain, Medium),
    entry(Minor, Probable, Medium),
    entry(Minor, Likely, Low),
    entry(Minor, Unlikely, Low),
    entry(Minor, Rare, Low),
    entry(Negligible, Certain, Low),
    entry(Negligible, Probable, Low),
    entry(Negligible, Likely, Low),
    entry(Negligible, Unlikely, Low),
    entry(Negligible, Rare, Low),
];

/// All matrix entries in row-major form order.
pub fn entries() -> &'static [RiskMatrixEntry] {
    &RISK_MATRIX
}

/// Look up the risk rating for a consequence/likelihood pair.
///
/// Pure and deterministic. Returns [`RiskRating::Unknown`] on a miss, which
/// cannot happen while the table covers the full cross product.
pub fn lookup(consequence_rating: ConsequenceRating, likelihood: Likelihood) -> RiskRating {
    RISK_MATRIX
        .iter()
        .find(|e| e.consequence_rating == consequence_rating && e.likelihood == likelihood)
        .map(|e| e.risk_rating)
        .unwrap_or(RiskRating::Unknown)
}

/// Look up the risk rating from raw form labels.
///
/// Labels outside the two vocabularies yield [`RiskRating::Unknown`] instead
/// of an error.
pub fn lookup_labels(consequence_rating: &str, likelihood: &str) -> RiskRating {
    match (
        consequence_rating.parse::<ConsequenceRating>(),
        likelihood.parse::<Likelihood>(),
    ) {
        (Ok(c), Ok(l)) => lookup(c, l),
        _ => RiskRating::Unknown,
    }
}
