//! Synthetic image builders for testing.

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};
use xray_gate_core::domain::ImageInfo;

/// Builder for creating synthetic test images.
///
/// Provides convenience methods for generating images that pass or fail
/// each plausibility check in a known way.
pub struct SyntheticImageBuilder;

#[allow(clippy::cast_possible_truncation)]
fn gradient_value(x: u32, width: u32) -> u8 {
    ((u32::from(u8::MAX) * x) / width.max(1)) as u8
}

impl SyntheticImageBuilder {
    // === Plausible Radiographs ===

    /// Creates a single-channel horizontal gradient.
    ///
    /// Mean is about 0.5 and spread about 0.29, inside every default range.
    #[must_use]
    pub fn radiograph_like(width: u32, height: u32) -> ImageInfo {
        let img = GrayImage::from_fn(width, height, |x, _| Luma([gradient_value(x, width)]));
        ImageInfo::new("synthetic://radiograph_like", DynamicImage::ImageLuma8(img))
    }

    /// Same gradient stored as three identical channels.
    #[must_use]
    pub fn rgb_radiograph_like(width: u32, height: u32) -> ImageInfo {
        ImageInfo::new(
            "synthetic://rgb_radiograph_like",
            DynamicImage::ImageRgb8(Self::rgb_gradient(width, height)),
        )
    }

    /// Same gradient with an alpha channel that varies per row.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn rgba_radiograph_like(width: u32, height: u32) -> ImageInfo {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            let v = gradient_value(x, width);
            Rgba([v, v, v, (y % 256) as u8])
        });
        ImageInfo::new(
            "synthetic://rgba_radiograph_like",
            DynamicImage::ImageRgba8(img),
        )
    }

    /// Gray RGB gradient with pixel (0, 0) tinted so that |R-G| = `diff`.
    #[must_use]
    pub fn tinted_pixel(width: u32, height: u32, diff: u8) -> ImageInfo {
        let mut img = Self::rgb_gradient(width, height);
        if width > 0 && height > 0 {
            img.put_pixel(0, 0, Rgb([diff, 0, 0]));
        }
        ImageInfo::new("synthetic://tinted_pixel", DynamicImage::ImageRgb8(img))
    }

    fn rgb_gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, _| {
            let v = gradient_value(x, width);
            Rgb([v, v, v])
        })
    }

    // === Intensity Failures ===

    /// Creates a uniform gray image (zero spread).
    #[must_use]
    pub fn uniform_gray(width: u32, height: u32, value: u8) -> ImageInfo {
        let img = GrayImage::from_fn(width, height, |_, _| Luma([value]));
        ImageInfo::new("synthetic://uniform_gray", DynamicImage::ImageLuma8(img))
    }

    /// Creates a pixel-level 0/255 checkerboard (spread 0.5).
    #[must_use]
    pub fn checkerboard(width: u32, height: u32) -> ImageInfo {
        Self::checkerboard_with_cell_size(width, height, 1)
    }

    /// Creates a 0/255 checkerboard with custom cell size.
    #[must_use]
    pub fn checkerboard_with_cell_size(width: u32, height: u32, cell_size: u32) -> ImageInfo {
        let cell_size = cell_size.max(1);
        let img = GrayImage::from_fn(width, height, |x, y| {
            if (x / cell_size + y / cell_size) % 2 == 0 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        ImageInfo::new("synthetic://checkerboard", DynamicImage::ImageLuma8(img))
    }

    /// Alternating columns of two gray levels, half the pixels each.
    ///
    /// Mean is `(a + b) / 510` and spread `|a - b| / 510` exactly when the
    /// width is even.
    #[must_use]
    pub fn two_level_stripes(width: u32, height: u32, a: u8, b: u8) -> ImageInfo {
        let img = GrayImage::from_fn(width, height, |x, _| {
            if x % 2 == 0 {
                Luma([a])
            } else {
                Luma([b])
            }
        });
        ImageInfo::new("synthetic://two_level_stripes", DynamicImage::ImageLuma8(img))
    }

    /// Creates a very dark image with slight variation.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn dark_image(width: u32, height: u32, max_brightness: u8) -> ImageInfo {
        let img = GrayImage::from_fn(width, height, |x, y| {
            let val = ((x + y) % u32::from(max_brightness.max(1))) as u8;
            Luma([val])
        });
        ImageInfo::new("synthetic://dark", DynamicImage::ImageLuma8(img))
    }

    // === Color Failures ===

    /// Creates a colorful photo-like image (hue sweep).
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn color_photo(width: u32, height: u32) -> ImageInfo {
        let img = RgbImage::from_fn(width, height, |x, y| {
            let r = gradient_value(x, width);
            let g = gradient_value(y, height);
            Rgb([r, g, 255 - r])
        });
        ImageInfo::new("synthetic://color_photo", DynamicImage::ImageRgb8(img))
    }

    /// Creates an RGB color image.
    #[must_use]
    pub fn rgb_uniform(width: u32, height: u32, r: u8, g: u8, b: u8) -> ImageInfo {
        let img = RgbImage::from_fn(width, height, |_, _| Rgb([r, g, b]));
        ImageInfo::new("synthetic://rgb_uniform", DynamicImage::ImageRgb8(img))
    }

    // === Special Test Images ===

    /// Creates a small plausible-looking thumbnail.
    #[must_use]
    pub fn thumbnail() -> ImageInfo {
        Self::radiograph_like(64, 64)
    }

    /// Creates a 1x1 pixel image (edge case).
    #[must_use]
    pub fn single_pixel(value: u8) -> ImageInfo {
        let img = GrayImage::from_fn(1, 1, |_, _| Luma([value]));
        ImageInfo::new("synthetic://1x1", DynamicImage::ImageLuma8(img))
    }

    /// Creates an image with no pixels.
    #[must_use]
    pub fn empty() -> ImageInfo {
        ImageInfo::new("synthetic://empty", DynamicImage::new_luma8(0, 0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::GenericImageView;
    use xray_gate_core::checks::max_channel_difference;

    #[test]
    fn test_radiograph_like_dimensions() {
        let img = SyntheticImageBuilder::radiograph_like(320, 240);
        assert_eq!(img.width, 320);
        assert_eq!(img.height, 240);
        assert_eq!(img.image.dimensions(), (320, 240));
    }

    #[test]
    fn test_tinted_pixel_difference() {
        let img = SyntheticImageBuilder::tinted_pixel(32, 32, 31);
        assert_eq!(max_channel_difference(&img.image.to_rgb8()), 31);
    }

    #[test]
    fn test_checkerboard_alternates() {
        let img = SyntheticImageBuilder::checkerboard(4, 4).image.to_luma8();
        assert_eq!(img.get_pixel(0, 0).0, [255]);
        assert_eq!(img.get_pixel(1, 0).0, [0]);
        assert_eq!(img.get_pixel(0, 1).0, [0]);
    }

    #[test]
    fn test_color_photo_is_colorful() {
        let img = SyntheticImageBuilder::color_photo(64, 64);
        assert!(max_channel_difference(&img.image.to_rgb8()) > 200);
    }

    #[test]
    fn test_empty_has_no_pixels() {
        let img = SyntheticImageBuilder::empty();
        assert_eq!((img.width, img.height), (0, 0));
    }
}
