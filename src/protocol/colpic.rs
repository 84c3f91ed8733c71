//! # ColPic Run-Length Color Encoding
//!
//! Newer Neptune firmware (3 Pro/Plus/Max, 4 series) stores thumbnails in
//! Elegoo's "ColPic" v3 format: a palette of up to 1024 RGB565 colors plus a
//! run-length coded stream of palette indices, expanded to printable text.
//!
//! ## Binary Layout
//!
//! All integers little-endian.
//!
//! | Offset | Size | Field |
//! |--------|------|-------|
//! | 0 | 1 | encoder version (3) |
//! | 1 | 1 | reserved |
//! | 2 | 2 | once-list quantity (0) |
//! | 4 | 4 | width |
//! | 8 | 4 | height |
//! | 12 | 4 | mark `0x05DDC33C` |
//! | 16 | 4 | palette size in bytes |
//! | 20 | 4 | color data size in bytes |
//! | 24 | 8 | reserved |
//! | 32 | 2n | palette (`u16` words) |
//! | 32+2n | m | color data |
//!
//! ## Color Data
//!
//! A palette index `i` splits into a segment id `sid = i / 32` and a table id
//! `tid = i % 32`. Runs are at most 255 pixels.
//!
//! ```text
//! 111sssss             switch to segment sssss (emitted when sid changes)
//! nnnttttt             run of n (1..=6) pixels of table entry ttttt
//! 000ttttt nnnnnnnn    run of n (7..=255) pixels of table entry ttttt
//! ```
//!
//! ## Text Expansion
//!
//! The binary stream is zero-padded to a multiple of 3 bytes (always at least
//! one pad byte) and every 3 bytes become 4 characters of 6 bits each, offset
//! by `'0'`. The only character that would need escaping, `\`, is written
//! as `~`.

use std::collections::HashMap;

use crate::error::ThumbnailError;
use crate::render::quantize::Rgb565;

/// Largest palette the format can address (32 segments x 32 entries).
pub const MAX_COLORS: usize = 1024;

/// Header mark.
pub const MARK: u32 = 0x05DD_C33C;

/// Encoder version written to the header.
pub const VERSION: u8 = 3;

/// Header size in bytes.
pub const HEADER_LEN: usize = 32;

/// Longest run of one color.
const MAX_RUN: usize = 255;

/// Compresses an RGB565 raster into the vendor's text stream.
///
/// Implementations must be deterministic: identical input gives identical
/// output. The returned buffer may carry trailing NUL bytes; frame assembly
/// drops them.
pub trait RunLengthEncoder {
    /// Encode `pixels` (row-major, `width * height` words).
    ///
    /// `max_size` bounds the encoded output in bytes, `max_colors` bounds
    /// the palette.
    fn encode(
        &self,
        pixels: &[Rgb565],
        width: u32,
        height: u32,
        max_size: usize,
        max_colors: usize,
    ) -> Result<Vec<u8>, ThumbnailError>;
}

/// Native ColPic v3 encoder.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColPicEncoder;

impl RunLengthEncoder for ColPicEncoder {
    fn encode(
        &self,
        pixels: &[Rgb565],
        width: u32,
        height: u32,
        max_size: usize,
        max_colors: usize,
    ) -> Result<Vec<u8>, ThumbnailError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(ThumbnailError::EncodingFailed(format!(
                "raster has {} pixels, expected {}x{} = {}",
                pixels.len(),
                width,
                height,
                expected
            )));
        }
        if pixels.is_empty() {
            return Err(ThumbnailError::EncodingFailed("empty raster".to_string()));
        }

        let binary = encode_binary(pixels, width, height, max_colors.clamp(1, MAX_COLORS));
        let text = expand_to_text(&binary);
        if text.len() >= max_size {
            return Err(ThumbnailError::EncodingFailed(format!(
                "encoded thumbnail needs {} bytes, budget is {}",
                text.len(),
                max_size
            )));
        }
        Ok(text)
    }
}

// ============================================================================
// PALETTE
// ============================================================================

/// Build the palette, most frequent color first, and reduce it to
/// `max_colors` entries.
///
/// Returns the palette and a map from every source color to its palette
/// index.
pub fn build_palette(pixels: &[Rgb565], max_colors: usize) -> (Vec<Rgb565>, HashMap<Rgb565, usize>) {
    // (color, count, first seen)
    let mut histogram: Vec<(Rgb565, usize, usize)> = Vec::new();
    let mut slots: HashMap<Rgb565, usize> = HashMap::new();
    for &color in pixels {
        match slots.get(&color) {
            Some(&slot) => histogram[slot].1 += 1,
            None => {
                slots.insert(color, histogram.len());
                histogram.push((color, 1, histogram.len()));
            }
        }
    }

    // Descending count; among equal counts the color seen later goes first.
    histogram.sort_by(|a, b| b.1.cmp(&a.1).then(b.2.cmp(&a.2)));

    let kept = histogram.len().min(max_colors);
    let palette: Vec<Rgb565> = histogram[..kept].iter().map(|h| h.0).collect();

    let mut index: HashMap<Rgb565, usize> =
        palette.iter().enumerate().map(|(i, c)| (*c, i)).collect();

    // Fold the rare colors into their nearest kept neighbour, least frequent first.
    for &(color, _, _) in histogram[kept..].iter().rev() {
        let mut nearest = 0;
        let mut best = u32::MAX;
        for (i, candidate) in palette.iter().enumerate() {
            let d = candidate.distance(color);
            if d < best {
                best = d;
                nearest = i;
            }
        }
        index.insert(color, nearest);
    }

    (palette, index)
}

// ============================================================================
// BINARY STREAM
// ============================================================================

/// Run-length code palette indices.
pub fn encode_runs(indices: &[usize]) -> Vec<u8> {
    let mut out = Vec::with_capacity(indices.len() / 2);
    let mut last_sid = 0u8;
    let mut pos = 0;

    while pos < indices.len() {
        let current = indices[pos];
        let run = indices[pos..]
            .iter()
            .take(MAX_RUN)
            .take_while(|&&i| i == current)
            .count();

        let tid = (current % 32) as u8;
        let sid = (current / 32) as u8;
        if sid != last_sid {
            out.push((7 << 5) | sid);
            last_sid = sid;
        }
        if run <= 6 {
            out.push(((run as u8) << 5) | tid);
        } else {
            out.push(tid);
            out.push(run as u8);
        }
        pos += run;
    }
    out
}

/// Header + palette + color data.
pub fn encode_binary(pixels: &[Rgb565], width: u32, height: u32, max_colors: usize) -> Vec<u8> {
    let (palette, index) = build_palette(pixels, max_colors);
    let indices: Vec<usize> = pixels.iter().map(|c| index[c]).collect();
    let runs = encode_runs(&indices);

    log::debug!(
        "colpic {}x{}: {} palette entries, {} bytes of runs",
        width,
        height,
        palette.len(),
        runs.len()
    );

    let mut out = Vec::with_capacity(HEADER_LEN + palette.len() * 2 + runs.len());
    out.push(VERSION);
    out.push(0);
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&MARK.to_le_bytes());
    out.extend_from_slice(&((palette.len() * 2) as u32).to_le_bytes());
    out.extend_from_slice(&(runs.len() as u32).to_le_bytes());
    out.extend_from_slice(&[0u8; 8]);
    for color in &palette {
        out.extend_from_slice(&color.0.to_le_bytes());
    }
    out.extend_from_slice(&runs);
    out
}

/// Expand binary data to the 6-bit text alphabet.
pub fn expand_to_text(binary: &[u8]) -> Vec<u8> {
    let mut padded = binary.to_vec();
    padded.resize(binary.len() + 3 - binary.len() % 3, 0);

    let mut out = Vec::with_capacity(padded.len() / 3 * 4);
    for group in padded.chunks_exact(3) {
        let sextets = [
            group[0] >> 2,
            ((group[0] & 0x03) << 4) | (group[1] >> 4),
            ((group[1] & 0x0F) << 2) | (group[2] >> 6),
            group[2] & 0x3F,
        ];
        for s in sextets {
            let c = s + b'0';
            out.push(if c == b'\\' { b'~' } else { c });
        }
    }
    out
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_short_and_long() {
        let mut indices = vec![0; 3];
        indices.extend(vec![1; 10]);
        assert_eq!(encode_runs(&indices), vec![3 << 5, 1, 10]);
    }

    #[test]
    fn test_runs_cap_at_255() {
        let indices = vec![2; 300];
        assert_eq!(encode_runs(&indices), vec![2, 255, 2, 45]);
    }

    #[test]
    fn test_runs_segment_switch() {
        // index 33 = segment 1, table 1; index 0 switches back to segment 0
        let indices = vec![33, 0];
        assert_eq!(
            encode_runs(&indices),
            vec![0xE1, (1 << 5) | 1, 0xE0, 1 << 5]
        );
    }

    #[test]
    fn test_palette_order_by_frequency() {
        let a = Rgb565(1);
        let b = Rgb565(2);
        let c = Rgb565(3);
        let pixels = [a, b, b, c, c, c];
        let (palette, index) = build_palette(&pixels, MAX_COLORS);
        assert_eq!(palette, vec![c, b, a]);
        assert_eq!(index[&a], 2);
    }

    #[test]
    fn test_palette_ties_put_later_color_first() {
        let a = Rgb565(10);
        let b = Rgb565(20);
        let (palette, _) = build_palette(&[a, b], MAX_COLORS);
        assert_eq!(palette, vec![b, a]);
    }

    #[test]
    fn test_palette_reduction_maps_to_nearest() {
        let black = Rgb565::BLACK;
        let white = Rgb565::WHITE;
        let near_white = Rgb565::from_rgb(248, 248, 240);
        let pixels = [black, black, white, white, white, near_white];
        let (palette, index) = build_palette(&pixels, 2);
        assert_eq!(palette, vec![white, black]);
        assert_eq!(index[&near_white], 0);
    }

    #[test]
    fn test_binary_header() {
        let pixels = vec![Rgb565::WHITE; 4];
        let binary = encode_binary(&pixels, 2, 2, MAX_COLORS);
        assert_eq!(binary[0], VERSION);
        assert_eq!(&binary[4..8], &2u32.to_le_bytes());
        assert_eq!(&binary[8..12], &2u32.to_le_bytes());
        assert_eq!(&binary[12..16], &MARK.to_le_bytes());
        assert_eq!(&binary[16..20], &2u32.to_le_bytes());
        assert_eq!(&binary[20..24], &1u32.to_le_bytes());
        assert_eq!(&binary[32..34], &[0xFF, 0xFF]);
        assert_eq!(binary[34], 4 << 5);
        assert_eq!(binary.len(), 35);
    }

    #[test]
    fn test_text_expansion() {
        // 0xFF 0xFF 0xFF -> four sextets of 63 -> 'o', plus a full pad group
        assert_eq!(expand_to_text(&[0xFF, 0xFF, 0xFF]), b"oooo0000".to_vec());
        // 0x00 -> padded to 3 bytes
        assert_eq!(expand_to_text(&[0x00]), b"0000".to_vec());
    }

    #[test]
    fn test_backslash_is_replaced() {
        // sextet 44 + '0' == '\\'
        let text = expand_to_text(&[44 << 2, 0x00]);
        assert_eq!(text, b"~000".to_vec());
    }

    #[test]
    fn test_encoder_is_deterministic() {
        let pixels: Vec<Rgb565> = (0..400u16).map(|i| Rgb565(i % 37 * 97)).collect();
        let first = ColPicEncoder.encode(&pixels, 20, 20, 10_000, MAX_COLORS).unwrap();
        let second = ColPicEncoder.encode(&pixels, 20, 20, 10_000, MAX_COLORS).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len() % 4, 0);
        assert!(first.iter().all(|b| (b'0'..=b'o').contains(b) || *b == b'~'));
    }

    #[test]
    fn test_encoder_budget_exceeded() {
        let pixels: Vec<Rgb565> = (0..16u16).map(Rgb565).collect();
        let err = ColPicEncoder.encode(&pixels, 4, 4, 16, MAX_COLORS).unwrap_err();
        assert!(matches!(err, ThumbnailError::EncodingFailed(_)));
    }

    #[test]
    fn test_encoder_rejects_wrong_pixel_count() {
        let err = ColPicEncoder
            .encode(&[Rgb565::BLACK; 3], 2, 2, 100, MAX_COLORS)
            .unwrap_err();
        assert!(matches!(err, ThumbnailError::EncodingFailed(_)));
    }
}
