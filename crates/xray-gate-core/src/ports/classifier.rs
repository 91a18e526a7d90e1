//! Classifier and trainer ports.
//!
//! The network itself lives behind these traits; any ML backend that can
//! score a preprocessed 224x224 RGB tensor can be plugged in.

use std::path::Path;

use crate::inference::PreprocessedImage;
use crate::training::{DatasetLayout, TrainingParams};

use super::TrainingSink;

/// Port for scoring a single preprocessed image.
pub trait Classifier: Send + Sync {
    /// Returns the probability (0.0-1.0) that the image shows pneumonia.
    ///
    /// # Errors
    ///
    /// Returns an error if inference fails.
    fn predict(&self, image: &PreprocessedImage) -> anyhow::Result<f32>;
}

/// A classifier produced by training that can be persisted.
pub trait TrainedModel: Classifier {
    /// Writes the model to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the model cannot be written.
    fn save(&self, path: &Path) -> anyhow::Result<()>;
}

/// Port for training a classifier on a dataset.
pub trait Trainer: Send + Sync {
    /// Trains a model, reporting one `EpochStarted` and one `EpochCompleted`
    /// event per epoch to `progress`.
    ///
    /// # Errors
    ///
    /// Returns an error if training fails.
    fn train(
        &self,
        dataset: &DatasetLayout,
        params: &TrainingParams,
        progress: &dyn TrainingSink,
    ) -> anyhow::Result<Box<dyn TrainedModel>>;
}
