//! # Prefix Injection
//!
//! Builds the thumbnail prefix block for a printer model and prepends it to
//! the g-code file, at most once.
//!
//! ## Prefix Block
//!
//! ```text
//! ;gimage:...   200x200 frame (legacy or vendor grammar)
//! ;simage:...   160x160 frame
//! ;Thumbnail generated by ...\r\r
//! <original g-code>
//! ```
//!
//! A file that already contains `;gimage:` or `;simage:` is left untouched,
//! which makes running the tool twice harmless.

use std::fs;
use std::path::Path;

use super::scanner;
use crate::error::ThumbnailError;
use crate::printer::{DeviceFamily, FrameSpec, PrinterModel};
use crate::protocol::colpic::{ColPicEncoder, RunLengthEncoder};
use crate::protocol::{legacy, vendor};
use crate::render::raster::RasterImage;

/// Comment line closing every non-empty prefix block.
pub const ATTRIBUTION: &str = ";Thumbnail generated by the ElegooNeptuneThumbnails-Prusa post processing script (https://github.com/Molodos/ElegooNeptuneThumbnails-Prusa)\r\r";

/// Tags whose presence means a thumbnail was already injected.
pub const THUMBNAIL_TAGS: [&str; 2] = [";gimage:", ";simage:"];

/// What [`add_thumbnail_prefix`] did to the file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InjectOutcome {
    /// The prefix was written; holds its length in bytes
    Injected { prefix_len: usize },
    /// The file already carries a thumbnail; nothing written
    AlreadyPresent,
    /// The printer model takes no thumbnail; nothing written
    UnsupportedModel(PrinterModel),
}

/// Whether `gcode` already contains an injected thumbnail.
pub fn has_thumbnail(gcode: &str) -> bool {
    THUMBNAIL_TAGS.iter().any(|tag| gcode.contains(tag))
}

/// Encode both frames for `family` and join them into a prefix block.
///
/// Returns an empty string for [`DeviceFamily::Unsupported`].
pub fn generate_prefix(
    image: &RasterImage,
    family: DeviceFamily,
    encoder: &dyn RunLengthEncoder,
) -> Result<String, ThumbnailError> {
    let mut prefix = String::new();
    for spec in FrameSpec::ALL {
        match family {
            DeviceFamily::Legacy => prefix.push_str(&legacy::encode(image, &spec)),
            DeviceFamily::Vendor => prefix.push_str(&vendor::encode(image, &spec, encoder)?),
            DeviceFamily::Unsupported => {}
        }
    }
    if !prefix.is_empty() {
        prefix.push_str(ATTRIBUTION);
    }
    Ok(prefix)
}

/// Thumbnail source read from a g-code file.
#[derive(Debug, Clone)]
pub struct ThumbnailSource {
    pub image: RasterImage,
    pub model: PrinterModel,
}

impl ThumbnailSource {
    /// Scan g-code text for the embedded thumbnail and printer model.
    pub fn from_gcode(gcode: &str) -> Result<Self, ThumbnailError> {
        let payload = scanner::extract_thumbnail(gcode)?;
        let model = scanner::extract_printer_model(gcode)?;
        let image = RasterImage::from_base64(&payload)?;
        Ok(Self { image, model })
    }

    /// Read and scan a g-code file.
    pub fn from_file(path: &Path) -> Result<Self, ThumbnailError> {
        Self::from_gcode(&fs::read_to_string(path)?)
    }
}

/// Add the thumbnail prefix to the g-code file at `path` using the native
/// ColPic encoder.
pub fn add_thumbnail_prefix(path: &Path) -> Result<InjectOutcome, ThumbnailError> {
    add_thumbnail_prefix_with(path, &ColPicEncoder)
}

/// Add the thumbnail prefix using a custom run-length encoder.
///
/// Nothing is written unless every frame encoded successfully.
pub fn add_thumbnail_prefix_with(
    path: &Path,
    encoder: &dyn RunLengthEncoder,
) -> Result<InjectOutcome, ThumbnailError> {
    let source = ThumbnailSource::from_file(path)?;

    // Re-read: the guard must see the file as it is right before writing.
    let gcode = fs::read_to_string(path)?;
    if has_thumbnail(&gcode) {
        log::info!("{} already contains a thumbnail, skipping", path.display());
        return Ok(InjectOutcome::AlreadyPresent);
    }

    let family = source.model.family();
    let prefix = generate_prefix(&source.image, family, encoder)?;
    if prefix.is_empty() {
        log::warn!("printer model {} takes no thumbnail", source.model);
        return Ok(InjectOutcome::UnsupportedModel(source.model));
    }

    let mut output = String::with_capacity(prefix.len() + gcode.len());
    output.push_str(&prefix);
    output.push_str(&gcode);
    fs::write(path, output)?;

    log::info!(
        "added {:?} thumbnail for {} ({} bytes)",
        family,
        source.model,
        prefix.len()
    );
    Ok(InjectOutcome::Injected {
        prefix_len: prefix.len(),
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn solid() -> RasterImage {
        RasterImage::from_rgb(RgbImage::from_pixel(600, 600, Rgb([0, 0, 0])))
    }

    #[test]
    fn test_has_thumbnail() {
        assert!(has_thumbnail("G28\n;gimage:0000\n"));
        assert!(has_thumbnail(";simage:"));
        assert!(!has_thumbnail("; thumbnail begin 600x600 10\n"));
    }

    #[test]
    fn test_unsupported_prefix_is_empty() {
        let prefix = generate_prefix(&solid(), DeviceFamily::Unsupported, &ColPicEncoder).unwrap();
        assert!(prefix.is_empty());
    }

    #[test]
    fn test_legacy_prefix_layout() {
        let prefix = generate_prefix(&solid(), DeviceFamily::Legacy, &ColPicEncoder).unwrap();
        assert!(prefix.starts_with(";gimage:"));
        let small = prefix.find(";simage:").unwrap();
        assert_eq!(prefix[..small].matches(legacy::ROW_MARKER).count(), 200);
        assert_eq!(prefix[small..].matches(legacy::ROW_MARKER).count(), 160);
        assert!(prefix.ends_with(ATTRIBUTION));
    }

    #[test]
    fn test_vendor_prefix_layout() {
        let prefix = generate_prefix(&solid(), DeviceFamily::Vendor, &ColPicEncoder).unwrap();
        let large = prefix.find(";gimage:").unwrap();
        let small = prefix.find(";simage:").unwrap();
        assert!(large < small);
        assert!(prefix.ends_with(&format!("0\r{}", ATTRIBUTION)));
    }
}
