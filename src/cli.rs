use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use nikud_prep::PrepareConfig;

#[derive(Debug, Parser)]
#[command(
    name = "nikud-prep",
    version,
    about = "Build niqqud restoration training pairs from reviewed text"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(global = true, short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write aligned input/expected line files from a reviewed CSV export.
    Prepare(PrepareArgs),
    /// Turn a parsed book (JSON) into a CSV sheet for reviewers.
    ExportReview(ExportReviewArgs),
    /// Print the canonical and stripped forms of TEXT, or of each stdin line.
    Canonicalize(CanonicalizeArgs),
}

#[derive(Debug, Args)]
pub struct PrepareArgs {
    /// Reviewed CSV export with a header row.
    #[arg(long, value_name = "CSV")]
    pub source: PathBuf,
    #[arg(long, value_name = "DIR", default_value = "data/training")]
    pub out_dir: PathBuf,
    #[arg(long, default_value = "input.txt")]
    pub input_name: String,
    #[arg(long, default_value = "expected.txt")]
    pub expected_name: String,
    /// Column holding the reviewer-corrected text.
    #[arg(long, default_value = nikud_prep::dataset::CORRECTED_TEXT_COLUMN)]
    pub column: String,
}

impl From<PrepareArgs> for PrepareConfig {
    fn from(args: PrepareArgs) -> Self {
        Self {
            source: args.source,
            out_dir: args.out_dir,
            input_name: args.input_name,
            expected_name: args.expected_name,
            column: args.column,
        }
    }
}

#[derive(Debug, Args)]
pub struct ExportReviewArgs {
    #[arg(long, value_name = "JSON")]
    pub book: PathBuf,
    #[arg(long, value_name = "CSV")]
    pub out: PathBuf,
}

#[derive(Debug, Args)]
pub struct CanonicalizeArgs {
    pub text: Option<String>,
}
