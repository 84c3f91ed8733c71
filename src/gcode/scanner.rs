//! # G-code Source Scanner
//!
//! Extracts the slicer-embedded thumbnail and the printer model from g-code
//! text. PrusaSlicer writes both as comments:
//!
//! ```text
//! ; thumbnail begin 600x600 26812
//! ; iVBORw0KGgoAAAANSUhEUgAAAlgAAAJYCAYAAAC+ZpjcAAAgAElEQVR4nOy9...
//! ; ...
//! ; thumbnail end
//! ...
//! ; printer_model = NEPTUNE4PRO
//! ```
//!
//! The two scans are independent passes; neither marker is assumed to come
//! before the other.

use crate::error::ThumbnailError;
use crate::printer::PrinterModel;

/// Prefix of the line opening the 600x600 thumbnail block.
pub const THUMBNAIL_BEGIN: &str = "; thumbnail begin 600x600";

/// Line closing a thumbnail block.
pub const THUMBNAIL_END: &str = "; thumbnail end";

/// Prefix of the printer model comment.
pub const PRINTER_MODEL_PREFIX: &str = "; printer_model = ";

/// Comment prefix stripped from every payload line.
const PAYLOAD_LINE_PREFIX_LEN: usize = 2;

/// State of the thumbnail block scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    /// Looking for [`THUMBNAIL_BEGIN`]
    Searching,
    /// Inside the block, accumulating base64 text
    Collecting(String),
    /// [`THUMBNAIL_END`] seen; holds the complete payload
    Done(String),
}

impl ScanState {
    /// Advance by one line.
    pub fn feed(self, line: &str) -> Self {
        match self {
            Self::Searching if line.starts_with(THUMBNAIL_BEGIN) => Self::Collecting(String::new()),
            Self::Searching => Self::Searching,
            Self::Collecting(payload) if line == THUMBNAIL_END => Self::Done(payload),
            Self::Collecting(mut payload) => {
                payload.push_str(line.get(PAYLOAD_LINE_PREFIX_LEN..).unwrap_or(""));
                Self::Collecting(payload)
            }
            done @ Self::Done(_) => done,
        }
    }
}

/// Extract the base64 text of the 600x600 thumbnail.
///
/// Fails with [`ThumbnailError::NotFound`] when the block is missing or is
/// not closed before the end of the file.
pub fn extract_thumbnail(gcode: &str) -> Result<String, ThumbnailError> {
    let mut state = ScanState::Searching;
    for line in gcode.lines() {
        state = state.feed(line);
        if let ScanState::Done(_) = state {
            break;
        }
    }

    match state {
        ScanState::Done(payload) => {
            log::debug!("found thumbnail payload ({} base64 chars)", payload.len());
            Ok(payload)
        }
        ScanState::Searching => Err(ThumbnailError::NotFound(
            "thumbnail is not present (expected a 600x600 thumbnail block)".to_string(),
        )),
        ScanState::Collecting(_) => Err(ThumbnailError::NotFound(
            "thumbnail block is not terminated".to_string(),
        )),
    }
}

/// Extract the printer model from the first `; printer_model = ` line.
pub fn extract_printer_model(gcode: &str) -> Result<PrinterModel, ThumbnailError> {
    gcode
        .lines()
        .find_map(|line| line.strip_prefix(PRINTER_MODEL_PREFIX))
        .map(PrinterModel::new)
        .ok_or_else(|| ThumbnailError::NotFound("printer model not found".to_string()))
}

// ============================================================================
// TESTS
// ============================================================================
