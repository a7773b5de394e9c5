//! # Matrix Commands
//!
//! `riskform lookup` and `riskform matrix`.

use anyhow::Result;
use clap::Args;

use riskform_core::{lookup, lookup_labels, ConsequenceRating, Likelihood};

/// Arguments for `riskform lookup`.
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Consequence rating label (Extensive, Major, Significant, Minor, Negligible).
    #[arg(long)]
    pub consequence_rating: String,

    /// Likelihood label (Certain, Probable, Likely, Unlikely, Rare).
    #[arg(long)]
    pub likelihood: String,
}

/// Print the rating for a pair of labels. Labels outside the
/// enumerations rate `Unknown` rather than failing.
pub fn run_lookup(args: &LookupArgs) -> Result<u8> {
    let rating = lookup_labels(&args.consequence_rating, &args.likelihood);
    if !rating.is_known() {
        tracing::warn!(
            consequence_rating = %args.consequence_rating,
            likelihood = %args.likelihood,
            "labels are not in the risk matrix"
        );
    }
    println!("{rating}");
    Ok(0)
}

/// Print the matrix as a grid.
pub fn run_matrix() -> Result<u8> {
    print!("{}", render_matrix());
    Ok(0)
}

/// The matrix as fixed-width text: one row per consequence rating, one
/// column per likelihood, most severe and most probable first.
pub fn render_matrix() -> String {
    let mut out = format!("{:<12}", "");
    for likelihood in Likelihood::ALL {
        out.push_str(&format!("{:<10}", likelihood.as_str()));
    }
    out.truncate(out.trim_end().len());
    out.push('\n');

    for consequence in ConsequenceRating::ALL {
        let mut line = format!("{:<12}", consequence.as_str());
        for likelihood in Likelihood::ALL {
            line.push_str(&format!("{:<10}", lookup(consequence, likelihood).as_str()));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}
