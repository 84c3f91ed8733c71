//! # Image Rendering
//!
//! Thumbnail decoding, resampling and color quantization.
//!
//! - [`raster`]: PNG decode and aspect-preserving resample
//! - [`quantize`]: RGB888 to RGB565

pub mod quantize;
pub mod raster;

pub use quantize::Rgb565;
pub use raster::RasterImage;
