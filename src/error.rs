//! # Error Types
//!
//! This module defines the error type used throughout the thumbnail pipeline.
//!
//! Every variant is fatal: the pipeline aborts before writing anything, so a
//! failed run never leaves a half-written g-code file behind.

use thiserror::Error;

/// Main error type for thumbnail operations
#[derive(Debug, Error)]
pub enum ThumbnailError {
    /// A required marker (thumbnail block, printer model line) is missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// The embedded payload is not valid base64 or not a valid PNG
    #[error("Decode failed: {0}")]
    DecodeFailed(String),

    /// The run-length color encoder rejected the raster
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
