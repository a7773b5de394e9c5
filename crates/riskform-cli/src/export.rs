//! # Export Command
//!
//! `riskform export --input records.json [--output path]`
//!
//! Reads a JSON array of assessment records and writes the same styled
//! workbook the HTTP service serves. Risk labels outside High, Medium and
//! Low load as `Unknown` and export without a fill.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use riskform_core::AssessmentRecord;
use riskform_export::export_file_name;

/// Arguments for `riskform export`.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// JSON file holding an array of assessment records.
    #[arg(long)]
    pub input: PathBuf,

    /// Where to write the workbook. Defaults to
    /// `risk_assessment_<today>.xlsx` in the current directory.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Execute the export subcommand.
pub fn run_export(args: &ExportArgs) -> Result<u8> {
    let records = load_records(&args.input)?;
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(export_file_name(chrono::Local::now().date_naive())));

    let bytes = riskform_export::export(&records).context("failed to build workbook")?;
    std::fs::write(&output, &bytes)
        .with_context(|| format!("failed to write workbook: {}", output.display()))?;

    tracing::info!(
        rows = records.len(),
        size = bytes.len(),
        output = %output.display(),
        "table exported"
    );
    println!("{}", output.display());
    Ok(0)
}

/// Read and parse a record file.
pub fn load_records(path: &Path) -> Result<Vec<AssessmentRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let records: Vec<AssessmentRecord> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse records from {}", path.display()))?;
    tracing::debug!(count = records.len(), path = %path.display(), "loaded records");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskform_core::RiskRating;

    const RECORDS: &str = r#"[
        {
            "hazard": "Wet floor",
            "date": "2024-06-12",
            "consequences": "Slip and fall",
            "consequence_rating": "Significant",
            "likelihood": "Likely",
            "risk_rating": "Medium",
            "actions": "Place warning sign"
        },
        {
            "hazard": "Loose cable",
            "date": "2024-06-13",
            "consequences": "Trip",
            "consequence_rating": "Minor",
            "likelihood": "Probable",
            "risk_rating": "Critical",
            "actions": "Tape it down"
        }
    ]"#;

    #[test]
    fn load_maps_unrecognised_rating_to_unknown() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("records.json");
        std::fs::write(&input, RECORDS).unwrap();

        let records = load_records(&input).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].risk_rating, RiskRating::Medium);
        assert_eq!(records[1].risk_rating, RiskRating::Unknown);
    }

    #[test]
    fn export_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("records.json");
        let output = dir.path().join("out.xlsx");
        std::fs::write(&input, RECORDS).unwrap();

        let args = ExportArgs {
            input,
            output: Some(output.clone()),
        };
        assert_eq!(run_export(&args).unwrap(), 0);
        let bytes = std::fs::read(&output).unwrap();
        assert!(bytes.starts_with(b"PK\x03\x04"));
    }

    #[test]
    fn empty_array_exports_header_only_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("empty.json");
        let output = dir.path().join("empty.xlsx");
        std::fs::write(&input, "[]").unwrap();

        let args = ExportArgs {
            input,
            output: Some(output.clone()),
        };
        run_export(&args).unwrap();
        assert!(output.exists());
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_records(&dir.path().join("nope.json")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read"));
    }

    #[test]
    fn malformed_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("bad.json");
        std::fs::write(&input, "{\"hazard\": 1}").unwrap();
        let err = load_records(&input).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse"));
    }
}
