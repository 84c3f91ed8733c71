//! # Vendor Thumbnail Frames (Neptune 3 Pro/Plus/Max, Neptune 4)
//!
//! Newer firmware reads the ColPic text stream (see [`colpic`](super::colpic))
//! wrapped into comment lines of at most 1015 payload characters.
//!
//! ## Frame Layout
//!
//! ```text
//! ;gimage:<1015 chars>
//! \r;gimage:<1015 chars>
//! ...
//! \r;;gimage:<last partial line>
//! \r;000...000            (padding)
//! \r
//! ```
//!
//! The line holding the final partial chunk is opened with `\r;;` instead of
//! `\r;` so the firmware can tell it apart. When the whole payload fits in
//! one line, that line is the final chunk and is opened with `\r;;` too.
//!
//! ## Padding
//!
//! ```text
//! append_len = 1015 - 3 - (payload_len % 1015)
//! ```
//!
//! This brings the final chunk plus padding to 1012 characters, so every
//! frame ends on the same alignment regardless of payload size.

use std::fmt::Write as _;

use super::colpic::{MAX_COLORS, RunLengthEncoder};
use crate::error::ThumbnailError;
use crate::printer::FrameSpec;
use crate::render::raster::RasterImage;

/// Firmware comment line buffer size.
pub const LINE_BUFFER: usize = 1024;

/// Payload characters per line: buffer minus tag overhead and terminator.
pub const LINE_CAPACITY: usize = LINE_BUFFER - 8 - 1;

/// Number of `0` characters appended after a payload of `payload_len` chars.
///
/// Zero when the final chunk is already longer than the padded width.
pub fn padding_len(payload_len: usize) -> usize {
    (LINE_CAPACITY - 3).saturating_sub(payload_len % LINE_CAPACITY)
}

/// Render encoder output as text.
///
/// Printable ASCII is kept verbatim, `\` and control bytes are escaped as
/// byte-literal escapes (`\\`, `\t`, `\n`, `\r`, `\xNN`), and NUL bytes are
/// dropped. The last rendered character is dropped as well, matching frames
/// produced by the reference tooling; for ColPic output it is always a
/// padding `0`.
pub fn text_dump(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            0 => {}
            b'\\' => out.push_str("\\\\"),
            b'\t' => out.push_str("\\t"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            0x20..=0x7E => out.push(b as char),
            _ => {
                let _ = write!(out, "\\x{:02x}", b);
            }
        }
    }
    out.pop();
    out
}

/// Wrap a rendered payload into the vendor frame grammar.
pub fn frame_payload(payload: &str, label: &str) -> String {
    let tag = format!(";{}:", label);
    let len = payload.len();
    let last_line_start = (len / LINE_CAPACITY) * LINE_CAPACITY;
    let append_len = padding_len(len);

    let lines = len / LINE_CAPACITY + 1;
    let mut out = String::with_capacity(len + lines * (tag.len() + 2) + append_len + 4);

    for (i, ch) in payload.chars().enumerate() {
        if i == last_line_start {
            out.push_str("\r;");
            out.push_str(&tag);
        } else if i == 0 {
            out.push_str(&tag);
        } else if i % LINE_CAPACITY == 0 {
            out.push('\r');
            out.push_str(&tag);
        }
        out.push(ch);
    }

    out.push_str("\r;");
    out.extend(std::iter::repeat_n('0', append_len));
    out.push('\r');
    out
}

/// Encode `image` into a vendor frame for `spec`.
pub fn encode(
    image: &RasterImage,
    spec: &FrameSpec,
    encoder: &dyn RunLengthEncoder,
) -> Result<String, ThumbnailError> {
    let scaled = image.resample(spec.width, spec.height);
    let (width, height) = (scaled.width(), scaled.height());
    let pixels = scaled.to_rgb565();

    let encoded = encoder.encode(
        &pixels,
        width,
        height,
        width as usize * height as usize,
        MAX_COLORS,
    )?;
    let payload = text_dump(&encoded);

    log::debug!(
        "vendor {} frame: {}x{}, {} payload chars, {} padding",
        spec.label,
        width,
        height,
        payload.len(),
        padding_len(payload.len())
    );
    Ok(frame_payload(&payload, spec.label))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::colpic::ColPicEncoder;
    use crate::render::quantize::Rgb565;
    use image::{Rgb, RgbImage};
    use pretty_assertions::assert_eq;

    /// Returns a fixed payload regardless of input.
    struct FixedEncoder(Vec<u8>);

    impl RunLengthEncoder for FixedEncoder {
        fn encode(
            &self,
            _pixels: &[Rgb565],
            _width: u32,
            _height: u32,
            _max_size: usize,
            _max_colors: usize,
        ) -> Result<Vec<u8>, ThumbnailError> {
            Ok(self.0.clone())
        }
    }

    struct FailingEncoder;

    impl RunLengthEncoder for FailingEncoder {
        fn encode(
            &self,
            _pixels: &[Rgb565],
            _width: u32,
            _height: u32,
            _max_size: usize,
            _max_colors: usize,
        ) -> Result<Vec<u8>, ThumbnailError> {
            Err(ThumbnailError::EncodingFailed("refused".to_string()))
        }
    }

    fn solid(color: [u8; 3]) -> RasterImage {
        RasterImage::from_rgb(RgbImage::from_pixel(600, 600, Rgb(color)))
    }

    #[test]
    fn test_capacity() {
        assert_eq!(LINE_CAPACITY, 1015);
    }

    #[test]
    fn test_padding_invariant() {
        for len in [0, 1, 7, 1011, 1012, 1015, 2030, 5000, 12345] {
            if len % LINE_CAPACITY <= LINE_CAPACITY - 3 {
                assert_eq!((len + padding_len(len)) % LINE_CAPACITY, LINE_CAPACITY - 3);
            }
        }
        assert_eq!(padding_len(1014), 0);
    }

    #[test]
    fn test_text_dump_strips_nul_and_last_char() {
        assert_eq!(text_dump(b"abc0\0\0\0"), "abc");
        assert_eq!(text_dump(b"a\\b\x01z"), "a\\\\b\\x01");
        assert_eq!(text_dump(b""), "");
    }

    #[test]
    fn test_short_payload_frame() {
        let frame = frame_payload("abc", "simage");
        let mut expected = String::from("\r;;simage:abc\r;");
        expected.push_str(&"0".repeat(1012 - 3));
        expected.push('\r');
        assert_eq!(frame, expected);
    }

    #[test]
    fn test_multi_line_frame() {
        let payload: String = "x".repeat(LINE_CAPACITY * 2 + 10);
        let frame = frame_payload(&payload, "gimage");

        assert!(frame.starts_with(";gimage:x"));
        let second = 8 + LINE_CAPACITY;
        assert_eq!(&frame[second..second + 9], "\r;gimage:");
        let third = second + 9 + LINE_CAPACITY;
        assert_eq!(&frame[third..third + 10], "\r;;gimage:");
        let tail = &frame[third + 10..];
        assert_eq!(tail.len(), 10 + 2 + (1012 - 10) + 1);
        assert!(tail.starts_with("xxxxxxxxxx\r;000"));
        assert!(tail.ends_with("0\r"));
    }

    #[test]
    fn test_exact_multiple_payload() {
        let payload: String = "y".repeat(LINE_CAPACITY);
        let frame = frame_payload(&payload, "gimage");
        // No final partial chunk: the full line is followed by the padding.
        assert!(frame.starts_with(";gimage:y"));
        assert!(!frame.contains(";;gimage:"));
        assert!(frame.ends_with(&format!("y\r;{}\r", "0".repeat(1012))));
    }

    #[test]
    fn test_empty_payload() {
        let frame = frame_payload("", "gimage");
        assert_eq!(frame, format!("\r;{}\r", "0".repeat(1012)));
    }

    #[test]
    fn test_encode_with_test_double() {
        let encoder = FixedEncoder(b"hello!\0\0".to_vec());
        let frame = encode(&solid([1, 2, 3]), &FrameSpec::LARGE, &encoder).unwrap();
        assert!(frame.starts_with("\r;;gimage:hello\r;"));
    }

    #[test]
    fn test_encoder_failure_propagates() {
        let err = encode(&solid([0, 0, 0]), &FrameSpec::SMALL, &FailingEncoder).unwrap_err();
        assert!(matches!(err, ThumbnailError::EncodingFailed(_)));
    }

    #[test]
    fn test_encode_solid_with_colpic() {
        let frame = encode(&solid([255, 255, 255]), &FrameSpec::SMALL, &ColPicEncoder).unwrap();
        assert!(frame.starts_with("\r;;simage:"));
        assert!(frame.ends_with("0\r"));

        // Payload + padding after the final tag always spans 1012 characters.
        let body = &frame["\r;;simage:".len()..frame.len() - 1];
        assert_eq!(body.len() - 2, LINE_CAPACITY - 3);
    }
}
