//! Verdict and rejection types produced by the validator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of validating a single image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    /// The image looks like a chest radiograph and may be classified.
    Accepted,
    /// The image was refused for the attached reason.
    Rejected(Rejection),
}

impl Verdict {
    /// Returns true if the image was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// Returns the rejection, if any.
    #[must_use]
    pub const fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Accepted => None,
            Self::Rejected(rejection) => Some(rejection),
        }
    }
}

impl From<Option<Rejection>> for Verdict {
    fn from(rejection: Option<Rejection>) -> Self {
        rejection.map_or(Self::Accepted, Self::Rejected)
    }
}

/// Reason an image was rejected, with the measurement that triggered it.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Rejection {
    /// At least one side is shorter than the minimum.
    TooSmall {
        /// Image width in pixels.
        width: u32,
        /// Image height in pixels.
        height: u32,
        /// Required minimum for both sides.
        min_dimension: u32,
    },
    /// Color channels disagree too much for a monochrome radiograph.
    NotGrayscaleLike {
        /// Largest per-pixel channel difference found (0-255).
        max_channel_diff: u8,
        /// Largest difference tolerated.
        limit: u8,
    },
    /// Brightness or contrast is outside the radiograph range.
    AtypicalIntensityDistribution {
        /// Mean normalized intensity (0.0-1.0).
        mean: f64,
        /// Population standard deviation of normalized intensity.
        std_dev: f64,
    },
    /// The input could not be decoded or inspected.
    DecodeOrFormatError {
        /// Underlying error message.
        detail: String,
    },
}

impl Rejection {
    /// Builds a decode rejection from any error, keeping its context chain.
    #[must_use]
    pub fn decode(error: &anyhow::Error) -> Self {
        Self::DecodeOrFormatError {
            detail: format!("{error:#}"),
        }
    }

    /// Short machine-readable code, matching the serialized `reason` tag.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::TooSmall { .. } => "too_small",
            Self::NotGrayscaleLike { .. } => "not_grayscale_like",
            Self::AtypicalIntensityDistribution { .. } => "atypical_intensity_distribution",
            Self::DecodeOrFormatError { .. } => "decode_or_format_error",
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooSmall {
                width,
                height,
                min_dimension,
            } => write!(
                f,
                "image is too small to be a valid X-ray ({width}x{height}, \
                 both sides must be at least {min_dimension}px)"
            ),
            Self::NotGrayscaleLike {
                max_channel_diff,
                limit,
            } => write!(
                f,
                "image does not look like a grayscale X-ray \
                 (channel difference {max_channel_diff} exceeds {limit})"
            ),
            Self::AtypicalIntensityDistribution { mean, std_dev } => write!(
                f,
                "image intensity distribution is not typical of an X-ray \
                 (mean {mean:.3}, std dev {std_dev:.3})"
            ),
            Self::DecodeOrFormatError { detail } => {
                write!(f, "failed to validate image: {detail}")
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_from_option() {
        assert_eq!(Verdict::from(None), Verdict::Accepted);

        let rejection = Rejection::NotGrayscaleLike {
            max_channel_diff: 40,
            limit: 30,
        };
        let verdict = Verdict::from(Some(rejection.clone()));
        assert!(!verdict.is_accepted());
        assert_eq!(verdict.rejection(), Some(&rejection));
    }

    #[test]
    fn test_rejected_serializes_flat() {
        let verdict = Verdict::Rejected(Rejection::TooSmall {
            width: 64,
            height: 480,
            min_dimension: 200,
        });
        let json = serde_json::to_value(&verdict).unwrap();

        assert_eq!(json["status"], "rejected");
        assert_eq!(json["reason"], "too_small");
        assert_eq!(json["width"], 64);
        assert_eq!(json["min_dimension"], 200);
    }

    #[test]
    fn test_accepted_serializes_status_only() {
        let json = serde_json::to_value(Verdict::Accepted).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "accepted" }));
    }

    #[test]
    fn test_code_matches_serialized_tag() {
        let rejections = [
            Rejection::TooSmall {
                width: 1,
                height: 1,
                min_dimension: 200,
            },
            Rejection::NotGrayscaleLike {
                max_channel_diff: 31,
                limit: 30,
            },
            Rejection::AtypicalIntensityDistribution {
                mean: 0.0,
                std_dev: 0.0,
            },
            Rejection::DecodeOrFormatError {
                detail: "bad".into(),
            },
        ];

        for rejection in rejections {
            let json = serde_json::to_value(&rejection).unwrap();
            assert_eq!(json["reason"], rejection.code());
        }
    }

    #[test]
    fn test_decode_keeps_context_chain() {
        let error = anyhow::anyhow!("unexpected end of file").context("Failed to decode scan.png");
        let rejection = Rejection::decode(&error);

        let Rejection::DecodeOrFormatError { detail } = &rejection else {
            panic!("expected DecodeOrFormatError");
        };
        assert!(detail.contains("scan.png"));
        assert!(detail.contains("unexpected end of file"));
        assert!(rejection.to_string().starts_with("failed to validate image"));
    }

    #[test]
    fn test_display_mentions_measurements() {
        let msg = Rejection::AtypicalIntensityDistribution {
            mean: 0.95,
            std_dev: 0.02,
        }
        .to_string();
        assert!(msg.contains("0.950"), "{msg}");
        assert!(msg.contains("0.020"), "{msg}");
    }
}
