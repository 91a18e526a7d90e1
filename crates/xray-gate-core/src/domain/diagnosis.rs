//! Classifier output interpreted as a diagnosis.

use serde::{Deserialize, Serialize};

/// Probability above which the positive class is reported.
pub const DECISION_THRESHOLD: f32 = 0.5;

/// The two classes the classifier distinguishes.
///
/// Ordered the way dataset class directories sort, so `Normal` is label 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Finding {
    /// No pneumonia.
    Normal,
    /// Pneumonia (positive class).
    Pneumonia,
}

impl Finding {
    /// All findings in label order.
    pub const ALL: [Self; 2] = [Self::Normal, Self::Pneumonia];

    /// Dataset directory name for this class.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Pneumonia => "PNEUMONIA",
        }
    }
}

/// A classified image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Diagnosis {
    /// Predicted class.
    pub finding: Finding,
    /// Raw positive-class probability (0.0-1.0).
    pub probability: f32,
    /// Probability of the predicted class (0.5-1.0).
    pub confidence: f32,
}

impl Diagnosis {
    /// Interprets a positive-class probability.
    ///
    /// # Errors
    ///
    /// Returns an error if the probability is NaN or outside 0.0..=1.0.
    pub fn from_probability(probability: f32) -> anyhow::Result<Self> {
        if !(0.0..=1.0).contains(&probability) {
            anyhow::bail!("classifier returned {probability}, expected a probability in 0.0..=1.0");
        }

        let (finding, confidence) = if probability > DECISION_THRESHOLD {
            (Finding::Pneumonia, probability)
        } else {
            (Finding::Normal, 1.0 - probability)
        };

        Ok(Self {
            finding,
            probability,
            confidence,
        })
    }
}
