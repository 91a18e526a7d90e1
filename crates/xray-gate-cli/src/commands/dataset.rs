//! Dataset command - report the layout and size of the training data.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use tracing::info;
use xray_gate_adapters::scan_dataset;
use xray_gate_core::training::{DatasetLayout, Split};

use super::ExitCode;
use crate::config::AppConfig;

/// Directory used when neither the CLI nor the config names one.
const DEFAULT_DATASET_DIR: &str = "data";

/// Arguments for the dataset command
#[derive(Args)]
pub struct DatasetArgs {
    /// Dataset root containing train/, val/ and test/
    pub dir: Option<PathBuf>,
}

/// Run the dataset command.
///
/// Prints one line per split and class, then checks that training can
/// start. A missing training class is an error.
pub fn run(args: &DatasetArgs, config: &AppConfig) -> Result<ExitCode> {
    let root = args
        .dir
        .clone()
        .or_else(|| config.dataset.dir.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATASET_DIR));
    info!("Inspecting dataset at {}", root.display());

    let layout = DatasetLayout::new(root);
    let summary = scan_dataset(&layout);

    println!("Dataset: {}", summary.root.display());
    for split in Split::ALL {
        println!();
        println!("{} ({} images)", split.dir_name(), summary.split_total(split));
        for class in summary.classes.iter().filter(|c| c.split == split) {
            if class.present {
                println!("  {:<10} {}", class.finding.dir_name(), class.images);
            } else {
                println!("  {:<10} missing", class.finding.dir_name());
            }
        }
    }
    println!();
    println!("{} images total", summary.total());

    layout.check()?;
    Ok(ExitCode::Success)
}
