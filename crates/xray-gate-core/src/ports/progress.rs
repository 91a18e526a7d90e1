//! Progress reporting port for batch validation.

use crate::domain::ValidationResult;

/// Events emitted while validating a batch of images.
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// Validation started for an image.
    Started {
        /// Path to the image.
        path: String,
        /// Index in the batch (0-based).
        index: usize,
        /// Total images in batch, if known.
        total: Option<usize>,
    },
    /// Validation completed for an image.
    Completed {
        /// The validation result.
        result: ValidationResult,
    },
    /// All images have been processed.
    Finished {
        /// Images accepted.
        accepted: usize,
        /// Images rejected, including those that failed to decode.
        rejected: usize,
    },
}

/// Port for receiving progress events.
pub trait ProgressSink: Send + Sync {
    /// Called when a progress event occurs.
    fn on_event(&self, event: ProgressEvent);
}
