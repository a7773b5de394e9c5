//! # riskform-cli: Command-Line Tools for Risk Assessment
//!
//! Provides the `riskform` binary for working with the risk matrix and
//! assessment records outside the HTTP service.
//!
//! ## Subcommands
//!
//! - `riskform lookup`: rate a consequence/likelihood pair.
//! - `riskform matrix`: print the 5x5 risk matrix.
//! - `riskform export`: write a JSON record file as a styled `.xlsx`.
//!
//! ```bash
//! riskform lookup --consequence-rating Significant --likelihood Likely
//! riskform export --input records.json --output table.xlsx
//! ```

pub mod export;
pub mod matrix;
