//! CLI command definitions and handlers.

pub mod check;
pub mod dataset;
pub mod model;

use clap::{Parser, Subcommand};

/// X-ray Gate - Reject uploads that do not look like chest radiographs
#[derive(Parser)]
#[command(name = "xray-gate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Shared check arguments (paths, thresholds, flags).
    #[command(flatten)]
    pub check: check::CheckArgs,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Validate that images look like chest radiographs
    Check(check::CheckArgs),
    /// Inspect the training dataset layout
    Dataset(dataset::DatasetArgs),
    /// Locate the trained classifier artifact
    Model(model::ModelArgs),
}

/// Process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Every image was accepted, or the command succeeded.
    Success = 0,
    /// At least one image was rejected, or the queried item is missing.
    Rejected = 1,
    /// The command could not run.
    Error = 2,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        Self::from(code as u8)
    }
}
