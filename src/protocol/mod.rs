//! # Neptune Thumbnail Protocols
//!
//! This module provides the two text grammars Elegoo Neptune display
//! firmware reads thumbnails in.
//!
//! ## Module Structure
//!
//! - [`legacy`]: Hex rows with `M10086 ;` markers (Neptune 2 / X)
//! - [`vendor`]: Wrapped, padded ColPic text (Neptune 3 Pro/Plus/Max, 4)
//! - [`colpic`]: Run-length color encoder feeding the vendor grammar
//!
//! ## Usage Example
//!
//! ```
//! use image::{Rgb, RgbImage};
//! use neptune_thumbnails::printer::FrameSpec;
//! use neptune_thumbnails::protocol::{colpic::ColPicEncoder, legacy, vendor};
//! use neptune_thumbnails::render::RasterImage;
//!
//! let image = RasterImage::from_rgb(RgbImage::from_pixel(600, 600, Rgb([0, 0, 0])));
//!
//! let old = legacy::encode(&image, &FrameSpec::SMALL);
//! assert!(old.starts_with(";simage:"));
//!
//! let new = vendor::encode(&image, &FrameSpec::LARGE, &ColPicEncoder).unwrap();
//! assert!(new.ends_with("0\r"));
//! ```
//!
//! Both grammars are wire formats: byte order, wrap points and padding are
//! fixed by the firmware parsers.

pub mod colpic;
pub mod legacy;
pub mod vendor;

pub use colpic::{ColPicEncoder, RunLengthEncoder};
