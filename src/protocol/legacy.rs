//! # Legacy Thumbnail Frames (Neptune 2 / X)
//!
//! Older Neptune firmware reads thumbnails as plain hex rows. Each pixel is
//! an RGB565 word written **low byte first**:
//!
//! ```text
//! color 0xF81F (magenta) ──► "1ff8"
//!                              ││└┴── high byte 0xF8
//!                              └┴──── low byte  0x1F
//! ```
//!
//! ## Frame Layout
//!
//! ```text
//! ;gimage:<row 0 hex>\rM10086 ;<row 1 hex>\rM10086 ; ... <row h-1 hex>\rM10086 ;\r
//! ```
//!
//! - `;<label>:` opens the frame once
//! - every row is followed by `\r` and the `M10086 ;` row marker
//! - the last row gets one extra `\r`
//!
//! The frame is one string; it is not wrapped further.

use std::fmt::Write as _;

use crate::printer::FrameSpec;
use crate::render::quantize::Rgb565;
use crate::render::raster::RasterImage;

/// Row terminator
pub const ROW_END: char = '\r';

/// Marker the firmware expects after every row terminator
pub const ROW_MARKER: &str = "M10086 ;";

/// Character count at which the emitted-data counter wraps.
///
/// The counter never inserts anything into the output. It mirrors the
/// firmware's 50-character read window and is kept until that has been
/// confirmed unused on real hardware.
pub const CHUNK_CHARS: usize = 50;

/// Append one pixel as four hex digits, low byte first.
#[inline]
pub fn push_pixel(out: &mut String, color: Rgb565) {
    let [lo, hi] = color.0.to_le_bytes();
    // Writing to a String cannot fail.
    let _ = write!(out, "{:02x}{:02x}", lo, hi);
}

/// Encode `image` into a legacy frame for `spec`.
///
/// The image is resampled to fit `spec.width` x `spec.height`; the rows and
/// columns written are those of the resampled image.
pub fn encode(image: &RasterImage, spec: &FrameSpec) -> String {
    let scaled = image.resample(spec.width, spec.height);
    encode_scaled(&scaled, spec.label)
}

/// Encode an image that already has its final size.
pub fn encode_scaled(image: &RasterImage, label: &str) -> String {
    let (width, height) = (image.width(), image.height());
    let row_len = width as usize * 4 + 1 + ROW_MARKER.len();
    let mut out = String::with_capacity(label.len() + 2 + row_len * height as usize + 1);

    out.push(';');
    out.push_str(label);
    out.push(':');

    let mut chunk = 0usize;
    for y in 0..height {
        for x in 0..width {
            push_pixel(&mut out, Rgb565::from(image.rgb(x, y)));
            chunk += 4;
            if chunk >= CHUNK_CHARS {
                chunk = 0;
            }
        }
        out.push(ROW_END);
        out.push_str(ROW_MARKER);
        if y == height - 1 {
            out.push(ROW_END);
        }
    }

    log::debug!("legacy {} frame: {}x{}, {} chars", label, width, height, out.len());
    out
}

// ============================================================================
// TESTS
// ============================================================================
