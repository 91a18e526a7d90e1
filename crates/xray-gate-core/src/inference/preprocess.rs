//! Image preprocessing for classifier input.

use anyhow::{Context, Result};
use candle_core::{DType, Device, Tensor};
use image::imageops::FilterType;
use image::DynamicImage;

/// Side length of the square classifier input.
pub const INPUT_SIZE: u32 = 224;

/// A classifier-ready image: `[1, 3, 224, 224]` f32 in 0.0-1.0.
#[derive(Debug, Clone)]
pub struct PreprocessedImage {
    tensor: Tensor,
}

impl PreprocessedImage {
    /// Returns the underlying NCHW tensor.
    #[must_use]
    pub const fn tensor(&self) -> &Tensor {
        &self.tensor
    }
}

/// Resizes to 224x224, forces three channels and scales samples to 0.0-1.0.
///
/// The aspect ratio is not preserved and sampling is nearest-neighbor, which
/// matches how the training images are loaded.
///
/// # Errors
///
/// Returns an error if the tensor cannot be built on `device`.
pub fn preprocess(image: &DynamicImage, device: &Device) -> Result<PreprocessedImage> {
    let rgb = image
        .resize_exact(INPUT_SIZE, INPUT_SIZE, FilterType::Nearest)
        .to_rgb8();
    let side = INPUT_SIZE as usize;

    let tensor = Tensor::from_vec(rgb.into_raw(), (side, side, 3), &Device::Cpu)
        .context("Failed to build image tensor")?
        .permute((2, 0, 1))?
        .to_dtype(DType::F32)?
        .affine(1.0 / 255.0, 0.0)?
        .unsqueeze(0)?
        .contiguous()?
        .to_device(device)?;

    Ok(PreprocessedImage { tensor })
}
