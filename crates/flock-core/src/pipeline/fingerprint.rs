//! Visual fingerprints for recognizing our own wallpaper after re-encoding.
//!
//! The desktop usually stores a converted copy of the wallpaper (BMP, a
//! recompressed JPEG, a scaled render), so byte hashes cannot tell whether the
//! current background is the one we downloaded. Instead both images are
//! reduced to a 16x16 grid and thresholded on brightness.
//!
//! Resampling is fixed to [`FilterType::Triangle`] and brightness uses integer
//! Rec.601 luma, so a given input produces the same bits on every platform.

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageReader};
use std::io::Cursor;

use crate::error::FingerprintError;

/// Side length of the sampling grid.
pub const GRID_SIZE: u32 = 16;

/// Number of bits in a fingerprint.
pub const FINGERPRINT_BITS: usize = (GRID_SIZE * GRID_SIZE) as usize;

const RESAMPLE_FILTER: FilterType = FilterType::Triangle;

/// One bit per grid cell, row-major; `true` marks a dark cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualFingerprint {
    bits: Vec<bool>,
}

impl VisualFingerprint {
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    /// Number of positions where both fingerprints agree (0..=256).
    pub fn agreement(&self, other: &VisualFingerprint) -> usize {
        self.bits
            .iter()
            .zip(other.bits.iter())
            .filter(|(a, b)| a == b)
            .count()
    }
}

/// Fingerprint an encoded image (format detected from content).
pub fn fingerprint(image_bytes: &[u8]) -> Result<VisualFingerprint, FingerprintError> {
    let reader = ImageReader::new(Cursor::new(image_bytes))
        .with_guessed_format()
        .map_err(|e| FingerprintError {
            message: format!("cannot detect image format: {e}"),
        })?;
    let image = reader.decode().map_err(|e| FingerprintError {
        message: e.to_string(),
    })?;
    Ok(fingerprint_image(&image))
}

/// Fingerprint an already-decoded image.
pub fn fingerprint_image(image: &DynamicImage) -> VisualFingerprint {
    let rgb = image.to_rgb8();
    let small = imageops::resize(&rgb, GRID_SIZE, GRID_SIZE, RESAMPLE_FILTER);

    // enumerate_pixels walks rows top to bottom, left to right
    let bits = small
        .enumerate_pixels()
        .map(|(_, _, pixel)| luma(pixel.0) < 128)
        .collect();
    VisualFingerprint { bits }
}

/// Rec.601 luma on 0..=255 channels.
fn luma([r, g, b]: [u8; 3]) -> u32 {
    (299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b)) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::codecs::jpeg::JpegEncoder;
    use image::{ImageFormat, Rgb, RgbImage};

    /// 4x4-cell blocks alternating dark and light, sized to the grid.
    fn block_pattern(width: u32, height: u32, invert: bool) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let cx = x * GRID_SIZE / width;
            let cy = y * GRID_SIZE / height;
            let dark = ((cx / 4) + (cy / 4)) % 2 == 0;
            if dark != invert {
                Rgb([25, 30, 40])
            } else {
                Rgb([230, 225, 210])
            }
        })
    }

    fn png_bytes(image: &RgbImage) -> Vec<u8> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(image.clone())
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    fn jpeg_bytes(image: &RgbImage, quality: u8) -> Vec<u8> {
        let mut buf = Vec::new();
        JpegEncoder::new_with_quality(&mut buf, quality)
            .encode_image(image)
            .unwrap();
        buf
    }

    #[test]
    fn test_fingerprint_has_256_bits() {
        let bytes = png_bytes(&block_pattern(640, 400, false));
        let fp = fingerprint(&bytes).unwrap();
        assert_eq!(fp.bits().len(), FINGERPRINT_BITS);
    }

    #[test]
    fn test_fingerprint_is_deterministic() {
        let bytes = jpeg_bytes(&block_pattern(800, 500, false), 80);
        let first = fingerprint(&bytes).unwrap();
        for _ in 0..5 {
            assert_eq!(fingerprint(&bytes).unwrap(), first);
        }
    }

    #[test]
    fn test_uniform_images() {
        let black = DynamicImage::new_rgb8(100, 100);
        assert!(fingerprint_image(&black).bits().iter().all(|b| *b));

        let white = DynamicImage::ImageRgb8(RgbImage::from_pixel(100, 100, Rgb([255, 255, 255])));
        assert!(fingerprint_image(&white).bits().iter().all(|b| !*b));
    }

    #[test]
    fn test_row_major_order() {
        // Top half dark, bottom half light
        let image = RgbImage::from_fn(160, 160, |_, y| {
            if y < 80 {
                Rgb([0, 0, 0])
            } else {
                Rgb([255, 255, 255])
            }
        });
        let fp = fingerprint_image(&DynamicImage::ImageRgb8(image));
        assert!(fp.bits()[..128].iter().all(|b| *b));
        assert!(fp.bits()[128..].iter().all(|b| !*b));
    }

    #[test]
    fn test_lossy_rerender_agrees() {
        let original = block_pattern(1920, 1200, false);
        let saved = fingerprint(&jpeg_bytes(&original, 90)).unwrap();

        // What the desktop keeps: rescaled and recompressed harder
        let rendered = imageops::resize(&original, 1280, 800, FilterType::CatmullRom);
        let current = fingerprint(&jpeg_bytes(&rendered, 60)).unwrap();

        assert!(saved.agreement(&current) > 250);
    }

    #[test]
    fn test_unrelated_images_disagree() {
        let a = fingerprint(&png_bytes(&block_pattern(640, 400, false))).unwrap();
        let b = fingerprint(&png_bytes(&block_pattern(640, 400, true))).unwrap();
        assert!(a.agreement(&b) < 250);
        assert_eq!(a.agreement(&a), FINGERPRINT_BITS);
    }

    #[test]
    fn test_garbage_bytes_error() {
        assert!(fingerprint(b"definitely not an image").is_err());
    }

    #[test]
    fn test_luma_midpoint() {
        assert_eq!(luma([0, 0, 0]), 0);
        assert_eq!(luma([255, 255, 255]), 255);
        assert!(luma([127, 127, 127]) < 128);
        assert!(luma([128, 128, 128]) >= 128);
    }
}
