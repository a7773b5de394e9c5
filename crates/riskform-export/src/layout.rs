//! # Sheet Layout
//!
//! Row 0 is the header; rows 1.. hold the records in store order. Only the
//! RiskRating column is ever filled. Date cells that hold an ISO date are
//! written as real dates.

use chrono::NaiveDate;
use riskform_core::{
    AssessmentRecord, RiskRating, COLUMN_COUNT, COLUMN_HEADERS, DATE_COLUMN, RISK_RATING_COLUMN,
};
use serde::{Deserialize, Serialize};

/// Title of the single worksheet.
pub const WORKSHEET_NAME: &str = "Risk Assessment";

/// Longest text a worksheet cell holds. Longer values are cut to fit.
pub const MAX_CELL_CHARS: usize = 32_767;

/// Background fill of a risk cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskFill {
    /// Red tint.
    High,
    /// Amber tint.
    Medium,
    /// Green tint.
    Low,
}

impl RiskFill {
    /// Fill for a risk label, or `None` for anything that is not exactly
    /// High, Medium or Low.
    pub fn for_label(label: &str) -> Option<Self> {
        match label.parse::<RiskRating>() {
            Ok(RiskRating::High) => Some(Self::High),
            Ok(RiskRating::Medium) => Some(Self::Medium),
            Ok(RiskRating::Low) => Some(Self::Low),
            Ok(RiskRating::Unknown) | Err(_) => None,
        }
    }

    /// Solid fill color as `0xRRGGBB`.
    pub fn rgb(&self) -> u32 {
        match self {
            Self::High => 0xFFCCCC,
            Self::Medium => 0xFFF8B0,
            Self::Low => 0xD6F5D6,
        }
    }
}

/// One rendered cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetCell {
    pub value: String,
    pub bold: bool,
    pub fill: Option<RiskFill>,
    /// Set when the cell holds a calendar date.
    pub date: Option<NaiveDate>,
}

impl SheetCell {
    fn header(value: &str) -> Self {
        Self {
            value: value.to_string(),
            bold: true,
            fill: None,
            date: None,
        }
    }

    fn plain(value: String) -> Self {
        Self {
            value: truncate_chars(value, MAX_CELL_CHARS),
            bold: false,
            fill: None,
            date: None,
        }
    }
}

fn truncate_chars(mut value: String, max_chars: usize) -> String {
    if let Some((idx, _)) = value.char_indices().nth(max_chars) {
        value.truncate(idx);
    }
    value
}

/// A fully resolved worksheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetLayout {
    pub name: String,
    rows: Vec<Vec<SheetCell>>,
}

impl SheetLayout {
    /// Lay out committed records.
    pub fn from_records(records: &[AssessmentRecord]) -> Self {
        Self::from_rows(records.iter().map(AssessmentRecord::cells))
    }

    /// Lay out raw seven-column rows. The risk column is styled by label, so
    /// arbitrary text is accepted and simply left unfilled.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = [String; COLUMN_COUNT]>,
    {
        let header = COLUMN_HEADERS.iter().map(|h| SheetCell::header(h)).collect();
        let mut out: Vec<Vec<SheetCell>> = vec![header];
        for row in rows {
            let cells: Vec<SheetCell> = row
                .into_iter()
                .enumerate()
                .map(|(col, value)| {
                    let mut cell = SheetCell::plain(value);
                    match col {
                        DATE_COLUMN => {
                            cell.date = NaiveDate::parse_from_str(&cell.value, "%Y-%m-%d").ok()
                        }
                        RISK_RATING_COLUMN => cell.fill = RiskFill::for_label(&cell.value),
                        _ => {}
                    }
                    cell
                })
                .collect();
            out.push(cells);
        }
        Self {
            name: WORKSHEET_NAME.to_string(),
            rows: out,
        }
    }

    /// All rows including the header.
    pub fn rows(&self) -> &[Vec<SheetCell>] {
        &self.rows
    }

    pub fn header(&self) -> &[SheetCell] {
        self.rows.first().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Record rows only.
    pub fn data_rows(&self) -> &[Vec<SheetCell>] {
        self.rows.split_first().map(|(_, rest)| rest).unwrap_or(&[])
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&SheetCell> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}
