//! # RGB565 Quantization
//!
//! Both Neptune thumbnail grammars carry 16-bit colors:
//!
//! ```text
//!  15      11 10        5 4       0
//! ┌──────────┬───────────┬─────────┐
//! │ R (5 bit)│ G (6 bit) │B (5 bit)│
//! └──────────┴───────────┴─────────┘
//! ```
//!
//! Channels are truncated with a right shift, never rounded.

use std::fmt;

/// A packed 5/6/5 color word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rgb565(pub u16);

impl Rgb565 {
    pub const BLACK: Self = Self(0x0000);
    pub const WHITE: Self = Self(0xFFFF);

    /// Quantize one 8-bit RGB sample.
    ///
    /// ```
    /// use neptune_thumbnails::render::quantize::Rgb565;
    ///
    /// assert_eq!(Rgb565::from_rgb(255, 255, 255), Rgb565::WHITE);
    /// assert_eq!(Rgb565::from_rgb(255, 0, 0).0, 0xF800);
    /// assert_eq!(Rgb565::from_rgb(0, 255, 0).0, 0x07E0);
    /// assert_eq!(Rgb565::from_rgb(0, 0, 255).0, 0x001F);
    /// ```
    #[inline]
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let r = (r >> 3) as u16;
        let g = (g >> 2) as u16;
        let b = (b >> 3) as u16;
        Self((r << 11) | (g << 5) | b)
    }

    /// 5-bit red channel.
    #[inline]
    pub fn red(self) -> u8 {
        (self.0 >> 11) as u8
    }

    /// 6-bit green channel.
    #[inline]
    pub fn green(self) -> u8 {
        ((self.0 >> 5) & 0x3F) as u8
    }

    /// 5-bit blue channel.
    #[inline]
    pub fn blue(self) -> u8 {
        (self.0 & 0x1F) as u8
    }

    /// Sum of absolute per-channel differences in 5/6/5 space.
    pub fn distance(self, other: Self) -> u32 {
        self.red().abs_diff(other.red()) as u32
            + self.green().abs_diff(other.green()) as u32
            + self.blue().abs_diff(other.blue()) as u32
    }
}

impl From<[u8; 3]> for Rgb565 {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::from_rgb(r, g, b)
    }
}

impl fmt::LowerHex for Rgb565 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

// ============================================================================
// TESTS
// ============================================================================
