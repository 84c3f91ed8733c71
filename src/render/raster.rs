//! # Raster Images
//!
//! Decoding of the slicer's embedded PNG thumbnail and aspect-preserving
//! resampling to the frame sizes the printers expect.
//!
//! ## Pipeline
//!
//! ```text
//! base64 text ──► PNG bytes ──► RgbImage (600x600)
//!                                   │
//!                   resample(200, 200) / resample(160, 160)
//!                                   ▼
//!                          RasterImage (fits the box)
//! ```

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageFormat, RgbImage, imageops::FilterType};

use super::quantize::Rgb565;
use crate::error::ThumbnailError;

/// An immutable 8-bit RGB pixel grid.
///
/// Resampling returns a new, independent image; the source is never touched.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixels: RgbImage,
}

impl RasterImage {
    /// Decode a base64-encoded PNG.
    ///
    /// Alpha is discarded; transparent pixels keep whatever color the PNG
    /// stores under them.
    pub fn from_base64(payload: &str) -> Result<Self, ThumbnailError> {
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| ThumbnailError::DecodeFailed(format!("invalid base64 payload: {}", e)))?;
        Self::from_png(&bytes)
    }

    /// Decode PNG bytes.
    pub fn from_png(bytes: &[u8]) -> Result<Self, ThumbnailError> {
        let image = image::load_from_memory_with_format(bytes, ImageFormat::Png)
            .map_err(|e| ThumbnailError::DecodeFailed(format!("invalid PNG thumbnail: {}", e)))?;
        log::debug!("decoded thumbnail {}x{}", image.width(), image.height());
        Ok(Self {
            pixels: image.to_rgb8(),
        })
    }

    pub fn from_rgb(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// RGB triple at (x, y). Panics when out of bounds, like `RgbImage`.
    #[inline]
    pub fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        self.pixels.get_pixel(x, y).0
    }

    /// Scale to the largest size fitting inside `width` x `height` while
    /// keeping the aspect ratio (Lanczos3).
    pub fn resample(&self, width: u32, height: u32) -> Self {
        if self.width() == width && self.height() == height {
            return self.clone();
        }
        let resized = DynamicImage::ImageRgb8(self.pixels.clone()).resize(
            width,
            height,
            FilterType::Lanczos3,
        );
        Self {
            pixels: resized.to_rgb8(),
        }
    }

    /// All pixels quantized to RGB565, row-major.
    pub fn to_rgb565(&self) -> Vec<Rgb565> {
        self.pixels
            .pixels()
            .map(|p| Rgb565::from_rgb(p[0], p[1], p[2]))
            .collect()
    }
}

// ============================================================================
// TESTS
// ============================================================================
