//! # Rating Vocabularies
//!
//! The two input scales of a risk assessment (consequence severity and
//! likelihood) and the derived risk rating. Labels are the exact strings the
//! form offers, and they double as the serde representation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseRatingError;

/// Severity of a hazard's potential outcome, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConsequenceRating {
    Extensive,
    Major,
    Significant,
    Minor,
    Negligible,
}

impl ConsequenceRating {
    /// All five levels in form order.
    pub const ALL: [ConsequenceRating; 5] = [
        Self::Extensive,
        Self::Major,
        Self::Significant,
        Self::Minor,
        Self::Negligible,
    ];

    /// The display label, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Extensive => "Extensive",
            Self::Major => "Major",
            Self::Significant => "Significant",
            Self::Minor => "Minor",
            Self::Negligible => "Negligible",
        }
    }
}

impl std::fmt::Display for ConsequenceRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConsequenceRating {
    type Err = ParseRatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseRatingError::new("consequence rating", s))
    }
}

/// Probability of a hazard occurring, most probable first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Likelihood {
    Certain,
    Probable,
    Likely,
    Unlikely,
    Rare,
}

impl Likelihood {
    /// All five levels in form order.
    pub const ALL: [Likelihood; 5] = [
        Self::Certain,
        Self::Probable,
        Self::Likely,
        Self::Unlikely,
        Self::Rare,
    ];

    /// The display label, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Certain => "Certain",
            Self::Probable => "Probable",
            Self::Likely => "Likely",
            Self::Unlikely => "Unlikely",
            Self::Rare => "Rare",
        }
    }
}

impl std::fmt::Display for Likelihood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Likelihood {
    type Err = ParseRatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| ParseRatingError::new("likelihood", s))
    }
}

/// Outcome of the matrix lookup.
///
/// `Unknown` is the sentinel for a lookup miss. Deserialization maps any
/// label it does not recognise onto `Unknown` so that foreign data never
/// fails to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskRating {
    High,
    Medium,
    Low,
    #[serde(other)]
    Unknown,
}

impl RiskRating {
    /// The display label, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::Unknown => "Unknown",
        }
    }

    /// Whether this rating came from a matrix hit.
    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for RiskRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskRating {
    type Err = ParseRatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "High" => Ok(Self::High),
            "Medium" => Ok(Self::Medium),
            "Low" => Ok(Self::Low),
            "Unknown" => Ok(Self::Unknown),
            other => Err(ParseRatingError::new("risk rating", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consequence_labels_round_trip_through_from_str() {
        for c in ConsequenceRating::ALL {
            assert_eq!(c.as_str().parse::<ConsequenceRating>().unwrap(), c);
        }
    }

    #[test]
    fn likelihood_labels_round_trip_through_from_str() {
        for l in Likelihood::ALL {
            assert_eq!(l.as_str().parse::<Likelihood>().unwrap(), l);
        }
    }

    #[test]
    fn labels_are_case_sensitive() {
        assert!("major".parse::<ConsequenceRating>().is_err());
        assert!("RARE".parse::<Likelihood>().is_err());
    }

    #[test]
    fn unknown_label_is_rejected_with_kind() {
        let err = "Catastrophic".parse::<ConsequenceRating>().unwrap_err();
        assert_eq!(err.kind, "consequence rating");
        assert_eq!(err.value, "Catastrophic");
    }

    #[test]
    fn form_order_is_most_severe_first() {
        assert_eq!(ConsequenceRating::ALL[0], ConsequenceRating::Extensive);
        assert_eq!(ConsequenceRating::ALL[4], ConsequenceRating::Negligible);
        assert_eq!(Likelihood::ALL[0], Likelihood::Certain);
        assert_eq!(Likelihood::ALL[4], Likelihood::Rare);
    }

    #[test]
    fn serde_uses_display_labels() {
        assert_eq!(
            serde_json::to_string(&ConsequenceRating::Significant).unwrap(),
            "\"Significant\""
        );
        assert_eq!(serde_json::to_string(&Likelihood::Unlikely).unwrap(), "\"Unlikely\"");
        assert_eq!(serde_json::to_string(&RiskRating::Medium).unwrap(), "\"Medium\"");
    }

    #[test]
    fn unrecognised_risk_label_deserializes_as_unknown() {
        let r: RiskRating = serde_json::from_str("\"Severe\"").unwrap();
        assert_eq!(r, RiskRating::Unknown);
        assert!(!r.is_known());
    }

    #[test]
    fn risk_rating_from_str_accepts_unknown_sentinel() {
        assert_eq!("Unknown".parse::<RiskRating>().unwrap(), RiskRating::Unknown);
        assert!("Critical".parse::<RiskRating>().is_err());
    }
}
