//! Training parameters.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::inference::INPUT_SIZE;

/// User-tunable training parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingParams {
    /// Full passes over the training set (at least 1).
    pub epochs: usize,
    /// Images per gradient update (at least 1).
    pub batch_size: usize,
    /// Fraction of data held out for validation (0.1-0.3).
    pub validation_split: f64,
}

impl TrainingParams {
    /// Accepted range for `validation_split`.
    pub const VALIDATION_SPLIT_RANGE: std::ops::RangeInclusive<f64> = 0.1..=0.3;

    /// Square input resolution every image is resized to.
    #[must_use]
    pub const fn image_size(&self) -> (u32, u32) {
        (INPUT_SIZE, INPUT_SIZE)
    }

    /// Checks every parameter against its allowed range.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first parameter out of range.
    pub fn validate(&self) -> Result<()> {
        if self.epochs < 1 {
            anyhow::bail!("epochs must be at least 1, got {}", self.epochs);
        }
        if self.batch_size < 1 {
            anyhow::bail!("batch_size must be at least 1, got {}", self.batch_size);
        }
        if !Self::VALIDATION_SPLIT_RANGE.contains(&self.validation_split) {
            anyhow::bail!(
                "validation_split must be 0.1-0.3, got {}",
                self.validation_split
            );
        }
        Ok(())
    }
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            epochs: 10,
            batch_size: 32,
            validation_split: 0.2,
        }
    }
}
