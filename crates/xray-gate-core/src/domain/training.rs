//! Training progress events.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Metrics reported at the end of one training epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// Epoch number (1-based).
    pub epoch: usize,
    /// Training loss.
    pub loss: f64,
    /// Training accuracy (0.0-1.0).
    pub accuracy: f64,
    /// Validation loss.
    pub val_loss: f64,
    /// Validation accuracy (0.0-1.0).
    pub val_accuracy: f64,
}

/// Events emitted by a trainer while it runs.
#[derive(Debug, Clone, PartialEq)]
pub enum TrainingEvent {
    /// An epoch is about to start.
    EpochStarted {
        /// Epoch number (1-based).
        epoch: usize,
        /// Total epochs planned.
        total: usize,
    },
    /// An epoch finished.
    EpochCompleted(EpochMetrics),
    /// Training finished and the model was saved.
    Finished {
        /// Epochs completed.
        epochs: usize,
        /// Where the trained model was written.
        artifact: PathBuf,
    },
}
