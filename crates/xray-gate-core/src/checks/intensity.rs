//! Intensity distribution check.
//!
//! Projects the image to gray by averaging R, G and B per pixel, normalizes
//! to 0.0-1.0 and requires a mid-range mean and a moderate spread. Blank
//! scans and solid fills fail on spread, saturated photos on mean, and
//! high-contrast graphics on spread from the other side.

use image::RgbImage;
use tracing::debug;

use crate::domain::{rgb8, Check, Rejection};

/// Largest possible per-pixel channel sum (3 x 255).
const MAX_CHANNEL_SUM: usize = 765;

/// Configuration for the intensity distribution check.
///
/// All bounds are inclusive and expressed on the normalized 0.0-1.0 scale.
#[derive(Debug, Clone)]
pub struct IntensityConfig {
    /// Lowest accepted mean intensity.
    pub min_mean: f64,
    /// Highest accepted mean intensity.
    pub max_mean: f64,
    /// Lowest accepted standard deviation.
    pub min_std_dev: f64,
    /// Highest accepted standard deviation.
    pub max_std_dev: f64,
}

impl Default for IntensityConfig {
    fn default() -> Self {
        Self {
            min_mean: 0.2,
            max_mean: 0.8,
            min_std_dev: 0.1,
            max_std_dev: 0.4,
        }
    }
}

/// Histogram of per-pixel channel sums (0-765).
///
/// Keeping the sum instead of the averaged value keeps every accumulator an
/// integer, so mean and spread come out exact for exact pixel patterns.
#[derive(Debug, Clone)]
pub struct IntensityHistogram {
    bins: Vec<u64>,
    total: u64,
}

impl IntensityHistogram {
    /// Compute histogram from an RGB image.
    #[must_use]
    pub fn from_rgb(image: &RgbImage) -> Self {
        let mut bins = vec![0u64; MAX_CHANNEL_SUM + 1];
        for pixel in image.pixels() {
            let [r, g, b] = pixel.0;
            bins[usize::from(r) + usize::from(g) + usize::from(b)] += 1;
        }
        let total = bins.iter().sum();
        Self { bins, total }
    }

    /// Returns the total pixel count.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Population statistics of the normalized gray projection.
    ///
    /// Returns `None` for an empty histogram.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn stats(&self) -> Option<IntensityStats> {
        if self.total == 0 {
            return None;
        }

        let (sum, sum_sq) = self
            .bins
            .iter()
            .enumerate()
            .fold((0u64, 0u64), |(sum, sum_sq), (value, &count)| {
                let value = value as u64;
                (sum + value * count, sum_sq + value * value * count)
            });

        // Sums stay far below 2^53 for any realistic image, so these are exact
        let total = self.total as f64;
        let mean_sum = sum as f64 / total;
        let variance_sum = (sum_sq as f64 / total - mean_sum * mean_sum).max(0.0);

        let scale = MAX_CHANNEL_SUM as f64;
        Some(IntensityStats {
            mean: mean_sum / scale,
            std_dev: variance_sum.sqrt() / scale,
        })
    }
}

/// Mean and population standard deviation on the 0.0-1.0 scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityStats {
    /// Mean normalized intensity.
    pub mean: f64,
    /// Standard deviation of normalized intensity.
    pub std_dev: f64,
}

impl IntensityStats {
    /// Computes statistics for an RGB image, `None` if it has no pixels.
    #[must_use]
    pub fn from_rgb(image: &RgbImage) -> Option<Self> {
        IntensityHistogram::from_rgb(image).stats()
    }
}

/// Rejects images whose brightness or contrast is atypical for a radiograph.
pub struct IntensityCheck {
    config: IntensityConfig,
}

impl IntensityCheck {
    /// Creates a new intensity check with the given configuration.
    #[must_use]
    pub const fn new(config: IntensityConfig) -> Self {
        Self { config }
    }

    /// Returns the check configuration.
    #[must_use]
    pub const fn config(&self) -> &IntensityConfig {
        &self.config
    }
}

impl Default for IntensityCheck {
    fn default() -> Self {
        Self::new(IntensityConfig::default())
    }
}

impl Check for IntensityCheck {
    fn name(&self) -> &'static str {
        "intensity"
    }

    fn evaluate(&self, image: &image::DynamicImage) -> anyhow::Result<Option<Rejection>> {
        let Some(stats) = IntensityStats::from_rgb(&rgb8(image)) else {
            anyhow::bail!("cannot compute intensity statistics of an empty image");
        };
        debug!(
            "intensity: mean {:.4}, std dev {:.4}",
            stats.mean, stats.std_dev
        );

        let config = &self.config;
        let mean_ok = (config.min_mean..=config.max_mean).contains(&stats.mean);
        let spread_ok = (config.min_std_dev..=config.max_std_dev).contains(&stats.std_dev);

        if mean_ok && spread_ok {
            return Ok(None);
        }

        Ok(Some(Rejection::AtypicalIntensityDistribution {
            mean: stats.mean,
            std_dev: stats.std_dev,
        }))
    }
}
