//! Minimum size check.

use image::GenericImageView;
use tracing::debug;

use crate::domain::{Check, Rejection};

/// Configuration for the size check.
#[derive(Debug, Clone)]
pub struct SizeConfig {
    /// Smallest allowed width and height in pixels.
    pub min_dimension: u32,
}

impl Default for SizeConfig {
    fn default() -> Self {
        Self { min_dimension: 200 }
    }
}

/// Rejects icons, thumbnails and empty images before any statistics run.
pub struct SizeCheck {
    config: SizeConfig,
}

impl SizeCheck {
    /// Creates a new size check with the given configuration.
    #[must_use]
    pub const fn new(config: SizeConfig) -> Self {
        Self { config }
    }
}

impl Default for SizeCheck {
    fn default() -> Self {
        Self::new(SizeConfig::default())
    }
}

impl Check for SizeCheck {
    fn name(&self) -> &'static str {
        "size"
    }

    fn evaluate(&self, image: &image::DynamicImage) -> anyhow::Result<Option<Rejection>> {
        let (width, height) = image.dimensions();
        let min_dimension = self.config.min_dimension;
        debug!("size: {width}x{height} (min {min_dimension})");

        if width < min_dimension || height < min_dimension {
            return Ok(Some(Rejection::TooSmall {
                width,
                height,
                min_dimension,
            }));
        }

        Ok(None)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use image::DynamicImage;

    fn evaluate(width: u32, height: u32) -> Option<Rejection> {
        SizeCheck::default()
            .evaluate(&DynamicImage::new_luma8(width, height))
            .expect("size check never errors")
    }

    #[test]
    fn test_default_config() {
        assert_eq!(SizeConfig::default().min_dimension, 200);
    }

    #[test]
    fn test_check_name() {
        assert_eq!(SizeCheck::default().name(), "size");
    }

    #[test]
    fn test_exact_minimum_passes() {
        assert!(evaluate(200, 200).is_none());
    }

    #[test]
    fn test_one_side_too_small() {
        assert!(matches!(
            evaluate(199, 1024),
            Some(Rejection::TooSmall { width: 199, .. })
        ));
        assert!(matches!(
            evaluate(1024, 150),
            Some(Rejection::TooSmall { height: 150, .. })
        ));
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(evaluate(0, 0), Some(Rejection::TooSmall { .. })));
        assert!(matches!(evaluate(0, 500), Some(Rejection::TooSmall { .. })));
    }

    #[test]
    fn test_custom_minimum() {
        let check = SizeCheck::new(SizeConfig { min_dimension: 64 });
        let result = check
            .evaluate(&DynamicImage::new_rgb8(64, 64))
            .expect("size check never errors");
        assert!(result.is_none());
    }
}
