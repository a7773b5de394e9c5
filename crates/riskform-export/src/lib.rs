//! # riskform-export: Table Rendering
//!
//! Turns the ordered entry store into a downloadable spreadsheet.
//!
//! Rendering is split in two:
//!
//! 1. [`SheetLayout`]: a pure description of the worksheet: the bold
//!    header row, one row per record, and the fill chosen for each risk
//!    cell. Deterministic for a given record sequence.
//! 2. [`write_xlsx`]: serializes a layout into an in-memory `.xlsx`
//!    buffer with `rust_xlsxwriter`.
//!
//! Unrecognised risk labels never fail an export; they simply get no fill.
//!
//! The [`highlight`] module carries the on-screen table styling, which uses
//! a slightly richer palette (text color and weight) than the spreadsheet.

pub mod highlight;
pub mod layout;
pub mod xlsx;

use chrono::NaiveDate;

pub use highlight::RiskHighlight;
pub use layout::{RiskFill, SheetCell, SheetLayout, WORKSHEET_NAME};
pub use xlsx::{export, write_xlsx, ExportError};

/// MIME type of the exported document.
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Download file name for an export produced on `date`.
pub fn export_file_name(date: NaiveDate) -> String {
    format!("risk_assessment_{}.xlsx", date.format("%Y-%m-%d"))
}
