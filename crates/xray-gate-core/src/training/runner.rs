//! Training entry point.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use crate::domain::TrainingEvent;
use crate::ports::{TrainedModel, Trainer, TrainingSink};

use super::{DatasetLayout, TrainingParams};

/// Trains a model and saves it to `artifact`.
///
/// Parameters and dataset are checked before the trainer is invoked, so a
/// missing dataset fails immediately instead of after model construction.
/// A `Finished` event is emitted only once the artifact is on disk.
///
/// # Errors
///
/// Returns an error if:
/// - A parameter is out of range
/// - The training classes are missing from the dataset
/// - The trainer fails
/// - The artifact cannot be written
pub fn run_training(
    trainer: &dyn Trainer,
    dataset: &DatasetLayout,
    params: &TrainingParams,
    progress: &dyn TrainingSink,
    artifact: &Path,
) -> Result<Box<dyn TrainedModel>> {
    params.validate().context("Invalid training parameters")?;
    dataset.check()?;

    info!(
        "Training for {} epochs (batch size {}, validation split {})",
        params.epochs, params.batch_size, params.validation_split
    );

    let model = trainer
        .train(dataset, params, progress)
        .context("Training failed")?;

    if let Some(parent) = artifact.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    model
        .save(artifact)
        .with_context(|| format!("Failed to save model to {}", artifact.display()))?;
    info!("Saved trained model to {}", artifact.display());

    progress.on_event(TrainingEvent::Finished {
        epochs: params.epochs,
        artifact: artifact.to_path_buf(),
    });

    Ok(model)
}
