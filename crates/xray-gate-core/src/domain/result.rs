//! Validation result types.

use std::borrow::Cow;

use image::{ColorType, DynamicImage, GenericImageView, RgbImage};
use serde::{Deserialize, Serialize};

use super::Verdict;

/// Complete validation result for a single image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Path to the validated image.
    pub path: String,
    /// Timestamp of validation (ISO 8601).
    pub timestamp: String,
    /// Image dimensions, absent when the image could not be decoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<ImageDimensions>,
    /// Acceptance or rejection with its measurements.
    pub verdict: Verdict,
    /// Human-readable rejection message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ValidationResult {
    /// Creates a result, deriving the message from the verdict.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        timestamp: impl Into<String>,
        dimensions: Option<ImageDimensions>,
        verdict: Verdict,
    ) -> Self {
        let message = verdict.rejection().map(ToString::to_string);
        Self {
            path: path.into(),
            timestamp: timestamp.into(),
            dimensions,
            verdict,
            message,
        }
    }

    /// Returns true if the image was accepted.
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        self.verdict.is_accepted()
    }
}

/// Image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageDimensions {
    /// Creates new dimensions.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Basic image information extracted during loading.
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Path to the image file.
    pub path: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Decoded image data.
    pub image: DynamicImage,
}

impl ImageInfo {
    /// Wraps a decoded image, reading its dimensions.
    #[must_use]
    pub fn new(path: impl Into<String>, image: DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            path: path.into(),
            width,
            height,
            image,
        }
    }

    /// Returns the image dimensions.
    #[must_use]
    pub const fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.width, self.height)
    }
}

/// Returns true for luminance-only color modes, with or without alpha.
#[must_use]
pub fn is_single_channel(image: &DynamicImage) -> bool {
    matches!(
        image.color(),
        ColorType::L8 | ColorType::L16 | ColorType::La8 | ColorType::La16
    )
}

/// Borrows the image as 8-bit RGB, converting only when it is stored otherwise.
///
/// Alpha is dropped and luminance is replicated into all three channels.
#[must_use]
pub fn rgb8(image: &DynamicImage) -> Cow<'_, RgbImage> {
    image
        .as_rgb8()
        .map_or_else(|| Cow::Owned(image.to_rgb8()), Cow::Borrowed)
}
