//! # XLSX Writer
//!
//! Serializes a [`SheetLayout`] into an in-memory workbook. Nothing touches
//! the filesystem; callers decide where the bytes go.

use chrono::{Datelike, NaiveDate};
use rust_xlsxwriter::{Color, ExcelDateTime, Format, FormatPattern, Workbook, XlsxError};
use thiserror::Error;

use riskform_core::{AssessmentRecord, COLUMN_COUNT};

use crate::layout::{SheetCell, SheetLayout};

/// Column widths in character units, in header order.
const COLUMN_WIDTHS: [f64; COLUMN_COUNT] = [32.0, 12.0, 32.0, 20.0, 12.0, 12.0, 48.0];

/// Number format applied to date cells.
const DATE_FORMAT: &str = "yyyy-mm-dd";

/// Errors from producing the spreadsheet.
///
/// Text longer than a cell can hold is cut during layout, so record content
/// does not cause one of these. A layout built outside
/// [`SheetLayout::from_rows`] can still hit the writer's own limits.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("spreadsheet writer failed: {0}")]
    Writer(#[from] XlsxError),

    #[error("too many rows for a worksheet: {0}")]
    TooManyRows(usize),
}

/// Lay out and write the records as an `.xlsx` buffer.
pub fn export(records: &[AssessmentRecord]) -> Result<Vec<u8>, ExportError> {
    write_xlsx(&SheetLayout::from_records(records))
}

/// Write a prepared layout as an `.xlsx` buffer.
pub fn write_xlsx(layout: &SheetLayout) -> Result<Vec<u8>, ExportError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(&layout.name)?;
    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }
    worksheet.set_freeze_panes(1, 0)?;

    for (row_idx, row) in layout.rows().iter().enumerate() {
        let row_num = u32::try_from(row_idx).map_err(|_| ExportError::TooManyRows(row_idx))?;
        for (col_idx, cell) in row.iter().enumerate() {
            let col_num = col_idx as u16;
            if let Some(date) = cell.date.and_then(excel_date) {
                let format = cell_format(cell)
                    .unwrap_or_else(Format::new)
                    .set_num_format(DATE_FORMAT);
                worksheet.write_datetime_with_format(row_num, col_num, &date, &format)?;
                continue;
            }
            match cell_format(cell) {
                Some(format) => {
                    worksheet.write_string_with_format(row_num, col_num, &cell.value, &format)?
                }
                None => worksheet.write_string(row_num, col_num, &cell.value)?,
            };
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// `None` for dates the worksheet cannot represent; those stay text.
fn excel_date(date: NaiveDate) -> Option<ExcelDateTime> {
    let year = u16::try_from(date.year()).ok()?;
    ExcelDateTime::from_ymd(year, date.month() as u8, date.day() as u8).ok()
}

fn cell_format(cell: &SheetCell) -> Option<Format> {
    if !cell.bold && cell.fill.is_none() {
        return None;
    }
    let mut format = Format::new();
    if cell.bold {
        format = format.set_bold();
    }
    if let Some(fill) = cell.fill {
        format = format
            .set_background_color(Color::RGB(fill.rgb()))
            .set_pattern(FormatPattern::Solid);
    }
    Some(format)
}
