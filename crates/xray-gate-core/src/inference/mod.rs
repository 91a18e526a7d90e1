//! Classifier input preparation and result interpretation using Candle.
//!
//! Provides the fixed preprocessing every classifier consumes and the
//! mapping from a raw probability to a diagnosis.

mod device;
mod preprocess;

pub use device::get_device;
pub use preprocess::{preprocess, PreprocessedImage, INPUT_SIZE};

use anyhow::{Context, Result};
use candle_core::Device;
use image::DynamicImage;
use tracing::debug;

use crate::domain::{Diagnosis, Rejection, Verdict};
use crate::ports::Classifier;
use crate::validator::XrayValidator;

/// Preprocesses an image, scores it and interprets the score.
///
/// Does not re-check plausibility; use [`diagnose`] for unvetted input.
///
/// # Errors
///
/// Returns an error if preprocessing or inference fails, or if the
/// classifier returns something that is not a probability.
pub fn classify(
    classifier: &dyn Classifier,
    image: &DynamicImage,
    device: &Device,
) -> Result<Diagnosis> {
    let input = preprocess(image, device)?;
    let probability = classifier
        .predict(&input)
        .context("Classifier inference failed")?;
    debug!("Classifier probability: {probability:.4}");
    Diagnosis::from_probability(probability)
}

/// Validates an image and classifies it only if it was accepted.
///
/// A rejected image never reaches the classifier; its rejection is returned
/// as the inner `Err`. Holding a `Classifier` means a trained model was
/// found and loaded, so callers check the artifact (see the adapters'
/// `model_status`) before building one.
///
/// # Errors
///
/// Returns an error if classifying an accepted image fails.
pub fn diagnose(
    validator: &XrayValidator,
    classifier: &dyn Classifier,
    image: &DynamicImage,
    device: &Device,
) -> Result<Result<Diagnosis, Rejection>> {
    match validator.validate(image) {
        Verdict::Accepted => classify(classifier, image, device).map(Ok),
        Verdict::Rejected(rejection) => {
            debug!("Not classifying rejected image: {rejection}");
            Ok(Err(rejection))
        }
    }
}
