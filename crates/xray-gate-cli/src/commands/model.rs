//! Model command - locate the trained classifier artifact.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use xray_gate_adapters::{model_artifact_path, model_status};

use super::ExitCode;
use crate::config::AppConfig;

/// Arguments for the model command
#[derive(Args)]
pub struct ModelArgs {
    #[command(subcommand)]
    pub command: ModelCommand,

    /// Artifact path (overrides default and config)
    #[arg(long, value_name = "PATH", global = true)]
    pub model: Option<PathBuf>,
}

/// Model subcommands
#[derive(Subcommand)]
pub enum ModelCommand {
    /// Report whether a trained model is installed
    Status,
    /// Print the artifact path
    Path,
}

/// Run the model command.
///
/// `status` exits with [`ExitCode::Rejected`] when no artifact exists, since
/// classification is unavailable until one is trained.
#[allow(clippy::unnecessary_wraps)]
pub fn run(args: &ModelArgs, config: &AppConfig) -> Result<ExitCode> {
    let override_path = args.model.as_deref().or(config.model.path.as_deref());
    let path = model_artifact_path(override_path);

    match args.command {
        ModelCommand::Path => {
            println!("{}", path.display());
            Ok(ExitCode::Success)
        }
        ModelCommand::Status => {
            let status = model_status(&path);
            println!("Model artifact: {}", status.path.display());
            match status.size_bytes {
                Some(size) => {
                    println!("  ✓ installed ({size} bytes)");
                    Ok(ExitCode::Success)
                }
                None => {
                    println!("  ✗ not installed; classification is unavailable until a model is trained");
                    Ok(ExitCode::Rejected)
                }
            }
        }
    }
}
