//! Grayscale-likeness check.
//!
//! Radiographs are monochrome even when stored as RGB files. The check looks
//! for the single largest disagreement between any two color channels at any
//! pixel, which tolerates JPEG ringing and mild tints while catching
//! colorful photographs.

use image::RgbImage;
use tracing::debug;

use crate::domain::{is_single_channel, rgb8, Check, Rejection};

/// Configuration for the grayscale-likeness check.
#[derive(Debug, Clone)]
pub struct GrayscaleConfig {
    /// Largest tolerated per-pixel channel difference (0-255).
    pub max_channel_diff: u8,
}

impl Default for GrayscaleConfig {
    fn default() -> Self {
        Self {
            max_channel_diff: 30,
        }
    }
}

/// Largest absolute difference between any two of R, G and B over all pixels.
///
/// Returns 0 for an empty image.
#[must_use]
pub fn max_channel_difference(image: &RgbImage) -> u8 {
    image
        .pixels()
        .map(|pixel| {
            let [r, g, b] = pixel.0;
            r.abs_diff(g).max(r.abs_diff(b)).max(g.abs_diff(b))
        })
        .max()
        .unwrap_or(0)
}

/// Rejects images whose color channels disagree.
pub struct GrayscaleCheck {
    config: GrayscaleConfig,
}

impl GrayscaleCheck {
    /// Creates a new grayscale-likeness check with the given configuration.
    #[must_use]
    pub const fn new(config: GrayscaleConfig) -> Self {
        Self { config }
    }
}

impl Default for GrayscaleCheck {
    fn default() -> Self {
        Self::new(GrayscaleConfig::default())
    }
}

impl Check for GrayscaleCheck {
    fn name(&self) -> &'static str {
        "grayscale"
    }

    fn evaluate(&self, image: &image::DynamicImage) -> anyhow::Result<Option<Rejection>> {
        if is_single_channel(image) {
            debug!("grayscale: single-channel input");
            return Ok(None);
        }

        let max_channel_diff = max_channel_difference(&rgb8(image));
        let limit = self.config.max_channel_diff;
        debug!("grayscale: max channel difference {max_channel_diff} (limit {limit})");

        if max_channel_diff > limit {
            return Ok(Some(Rejection::NotGrayscaleLike {
                max_channel_diff,
                limit,
            }));
        }

        Ok(None)
    }
}
