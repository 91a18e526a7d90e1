//! The X-ray plausibility validator.
//!
//! Runs the size, grayscale-likeness and intensity checks in that order and
//! stops at the first rejection. Every failure, including undecodable input,
//! is reported as a [`Verdict`]; nothing is propagated to the caller.

use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;
use tracing::{debug, warn};

use crate::checks::{
    GrayscaleCheck, GrayscaleConfig, IntensityCheck, IntensityConfig, SizeCheck, SizeConfig,
};
use crate::domain::{Check, Rejection, Verdict};

/// Thresholds for all three checks.
#[derive(Debug, Clone, Default)]
pub struct ValidatorConfig {
    /// Size check settings.
    pub size: SizeConfig,
    /// Grayscale-likeness check settings.
    pub grayscale: GrayscaleConfig,
    /// Intensity distribution check settings.
    pub intensity: IntensityConfig,
}

impl ValidatorConfig {
    /// Validates that the thresholds describe non-empty ranges.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first inconsistent setting.
    pub fn validate(&self) -> Result<()> {
        if self.size.min_dimension == 0 {
            anyhow::bail!("min_dimension must be at least 1");
        }
        let i = &self.intensity;
        for (name, value) in [
            ("min_mean", i.min_mean),
            ("max_mean", i.max_mean),
            ("min_std_dev", i.min_std_dev),
            ("max_std_dev", i.max_std_dev),
        ] {
            if !(0.0..=1.0).contains(&value) {
                anyhow::bail!("{name} must be 0.0-1.0, got {value}");
            }
        }
        if i.min_mean > i.max_mean {
            anyhow::bail!(
                "min_mean ({}) must not exceed max_mean ({})",
                i.min_mean,
                i.max_mean
            );
        }
        if i.min_std_dev > i.max_std_dev {
            anyhow::bail!(
                "min_std_dev ({}) must not exceed max_std_dev ({})",
                i.min_std_dev,
                i.max_std_dev
            );
        }
        Ok(())
    }
}

/// An image to validate, decoded or not.
#[derive(Debug, Clone, Copy)]
pub enum ImageInput<'a> {
    /// An already decoded image.
    Decoded(&'a DynamicImage),
    /// A file to open; the format is sniffed from its content.
    Path(&'a Path),
    /// Encoded image bytes, e.g. an upload body.
    Bytes(&'a [u8]),
}

/// Validates an image with the default thresholds.
#[must_use]
pub fn validate(input: ImageInput<'_>) -> Verdict {
    XrayValidator::default().validate_input(input)
}

/// Ordered chain of plausibility checks.
pub struct XrayValidator {
    checks: Vec<Box<dyn Check>>,
}

impl XrayValidator {
    /// Creates the standard size, grayscale, intensity chain.
    #[must_use]
    pub fn new(config: ValidatorConfig) -> Self {
        Self::with_checks(vec![
            Box::new(SizeCheck::new(config.size)),
            Box::new(GrayscaleCheck::new(config.grayscale)),
            Box::new(IntensityCheck::new(config.intensity)),
        ])
    }

    /// Creates a validator running the given checks in order.
    #[must_use]
    pub fn with_checks(checks: Vec<Box<dyn Check>>) -> Self {
        Self { checks }
    }

    /// Names of the configured checks, in run order.
    #[must_use]
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Validates a decoded image.
    #[must_use]
    pub fn validate(&self, image: &DynamicImage) -> Verdict {
        for check in &self.checks {
            match check.evaluate(image) {
                Ok(None) => {}
                Ok(Some(rejection)) => {
                    debug!("{} check rejected image: {rejection}", check.name());
                    return Verdict::Rejected(rejection);
                }
                Err(e) => {
                    let e = e.context(format!("{} check failed", check.name()));
                    warn!("{e:#}");
                    return Verdict::Rejected(Rejection::decode(&e));
                }
            }
        }
        Verdict::Accepted
    }

    /// Validates any supported input, decoding it first if necessary.
    #[must_use]
    pub fn validate_input(&self, input: ImageInput<'_>) -> Verdict {
        match input {
            ImageInput::Decoded(image) => self.validate(image),
            ImageInput::Path(path) => self.validate_path(path),
            ImageInput::Bytes(bytes) => self.validate_bytes(bytes),
        }
    }

    /// Opens and validates an image file.
    #[must_use]
    pub fn validate_path(&self, path: &Path) -> Verdict {
        match decode_path(path) {
            Ok(image) => self.validate(&image),
            Err(e) => Verdict::Rejected(Rejection::decode(&e)),
        }
    }

    /// Decodes and validates encoded image bytes.
    #[must_use]
    pub fn validate_bytes(&self, bytes: &[u8]) -> Verdict {
        match image::load_from_memory(bytes).context("Failed to decode image data") {
            Ok(image) => self.validate(&image),
            Err(e) => Verdict::Rejected(Rejection::decode(&e)),
        }
    }
}

impl Default for XrayValidator {
    fn default() -> Self {
        Self::new(ValidatorConfig::default())
    }
}

/// Decodes a file, trusting its content over its extension.
fn decode_path(path: &Path) -> Result<DynamicImage> {
    image::ImageReader::open(path)
        .with_context(|| format!("Failed to open image: {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read image: {}", path.display()))?
        .decode()
        .with_context(|| format!("Failed to decode image: {}", path.display()))
}
