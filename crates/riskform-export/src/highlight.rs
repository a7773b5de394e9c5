//! # On-Screen Risk Highlighting
//!
//! Styling for the risk column when the table is shown in a browser. The
//! spreadsheet only carries the background; the screen view also colors
//! and emboldens the text.

use serde::Serialize;

use crate::layout::RiskFill;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RiskHighlight {
    /// CSS background color.
    pub background: &'static str,
    /// CSS text color.
    pub color: &'static str,
    pub bold: bool,
}

impl RiskHighlight {
    /// Highlight for a risk label; `None` leaves the cell unstyled.
    pub fn for_label(label: &str) -> Option<Self> {
        let (background, color) = match RiskFill::for_label(label)? {
            RiskFill::High => ("#ffcccc", "red"),
            RiskFill::Medium => ("#fff8b0", "#b36b00"),
            RiskFill::Low => ("#d6f5d6", "green"),
        };
        Some(Self {
            background,
            color,
            bold: true,
        })
    }

    /// The style as an inline CSS declaration list.
    pub fn to_css(&self) -> String {
        let weight = if self.bold { "bold" } else { "normal" };
        format!(
            "background-color: {}; color: {}; font-weight: {}",
            self.background, self.color, weight
        )
    }
}
