//! # riskform CLI entry point
//!
//! Parses command-line arguments and dispatches to subcommand handlers.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use riskform_cli::export::{run_export, ExportArgs};
use riskform_cli::matrix::{run_lookup, run_matrix, LookupArgs};

/// Hazard risk assessment tools.
///
/// Looks up ratings in the fixed 5x5 risk matrix and exports assessment
/// records to a styled spreadsheet.
#[derive(Parser, Debug)]
#[command(name = "riskform", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Rate a consequence/likelihood pair.
    Lookup(LookupArgs),

    /// Print the risk matrix.
    Matrix,

    /// Write a JSON record file as an .xlsx workbook.
    Export(ExportArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Lookup(args) => run_lookup(&args),
        Commands::Matrix => run_matrix(),
        Commands::Export(args) => run_export(&args),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
