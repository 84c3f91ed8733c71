//! # Printer Configuration
//!
//! This module defines which Elegoo Neptune models take which thumbnail
//! grammar, and the two frame sizes every supported model expects.
//!
//! ## Supported Printers
//!
//! | Family | Models | Grammar |
//! |--------|--------|---------|
//! | Legacy | NEPTUNE2, NEPTUNE2D, NEPTUNE2S, NEPTUNEX | hex rows + `M10086 ;` |
//! | Vendor | NEPTUNE4, NEPTUNE4PRO, NEPTUNE3PRO, NEPTUNE3PLUS, NEPTUNE3MAX | run-length text |
//!
//! ## Usage
//!
//! ```
//! use neptune_thumbnails::printer::{DeviceFamily, FrameSpec, PrinterModel};
//!
//! let model = PrinterModel::new("NEPTUNE4PRO");
//! assert_eq!(model.family(), DeviceFamily::Vendor);
//! assert_eq!(FrameSpec::LARGE.width, 200);
//! ```

use std::fmt;

/// Models whose firmware reads the legacy hex-row grammar.
pub const LEGACY_MODELS: &[&str] = &["NEPTUNE2", "NEPTUNE2D", "NEPTUNE2S", "NEPTUNEX"];

/// Models whose firmware reads the run-length vendor grammar.
pub const VENDOR_MODELS: &[&str] = &[
    "NEPTUNE4",
    "NEPTUNE4PRO",
    "NEPTUNE3PRO",
    "NEPTUNE3PLUS",
    "NEPTUNE3MAX",
];

/// Thumbnail grammar family of a printer model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceFamily {
    /// Neptune 2 / X series
    Legacy,
    /// Neptune 3 Pro/Plus/Max and Neptune 4 series
    Vendor,
    /// Anything else; no thumbnail is generated
    Unsupported,
}

/// Printer model string as written by the slicer (`; printer_model = ...`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrinterModel(String);

impl PrinterModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classify this model. Matching is exact and case-sensitive.
    pub fn family(&self) -> DeviceFamily {
        let name = self.0.as_str();
        if LEGACY_MODELS.contains(&name) {
            DeviceFamily::Legacy
        } else if VENDOR_MODELS.contains(&name) {
            DeviceFamily::Vendor
        } else {
            DeviceFamily::Unsupported
        }
    }
}

impl fmt::Display for PrinterModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// # Frame Specification
///
/// Target box and label of one encoded thumbnail frame. The image is scaled
/// to fit inside `width` x `height` keeping its aspect ratio, so a non-square
/// source produces a frame smaller than the box in one dimension.
///
/// ```text
/// ;gimage:....   200 x 200, shown on the file detail screen
/// ;simage:....   160 x 160, shown in the file list
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSpec {
    /// Label written after the leading `;` (`gimage` or `simage`)
    pub label: &'static str,

    /// Target width in pixels
    pub width: u32,

    /// Target height in pixels
    pub height: u32,
}

impl FrameSpec {
    /// Full-size preview
    pub const LARGE: Self = Self {
        label: "gimage",
        width: 200,
        height: 200,
    };

    /// Small preview
    pub const SMALL: Self = Self {
        label: "simage",
        width: 160,
        height: 160,
    };

    /// Frames in the order they are written to the prefix block.
    pub const ALL: [Self; 2] = [Self::LARGE, Self::SMALL];

    /// The `;<label>:` tag opening the frame.
    pub fn tag(&self) -> String {
        format!(";{}:", self.label)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_models() {
        for name in LEGACY_MODELS {
            assert_eq!(PrinterModel::new(*name).family(), DeviceFamily::Legacy);
        }
    }

    #[test]
    fn test_vendor_models() {
        for name in VENDOR_MODELS {
            assert_eq!(PrinterModel::new(*name).family(), DeviceFamily::Vendor);
        }
    }

    #[test]
    fn test_unknown_models_are_unsupported() {
        assert_eq!(
            PrinterModel::new("NEPTUNE3000").family(),
            DeviceFamily::Unsupported
        );
        assert_eq!(
            PrinterModel::new("neptune4").family(),
            DeviceFamily::Unsupported
        );
        assert_eq!(PrinterModel::new("").family(), DeviceFamily::Unsupported);
    }

    #[test]
    fn test_frame_tags() {
        assert_eq!(FrameSpec::LARGE.tag(), ";gimage:");
        assert_eq!(FrameSpec::SMALL.tag(), ";simage:");
        assert_eq!(FrameSpec::ALL[0], FrameSpec::LARGE);
    }
}
