//! # Neptune Thumbnails - Display Thumbnails for Elegoo Neptune Printers
//!
//! Neptune printers show a preview of the print on their display, but their
//! firmware does not read the PNG thumbnails slicers embed. This library
//! converts the slicer's 600x600 thumbnail into the text encodings the
//! firmware understands and prepends them to the g-code file. It provides:
//!
//! - **Source scanning**: thumbnail block and printer model extraction
//! - **Rendering**: PNG decode, Lanczos resample, RGB565 quantization
//! - **Protocols**: legacy hex-row frames and vendor ColPic frames
//! - **Injection**: idempotent prefix insertion
//!
//! ## Quick Start
//!
//! ```no_run
//! use neptune_thumbnails::gcode::{self, InjectOutcome};
//! use std::path::Path;
//!
//! match gcode::add_thumbnail_prefix(Path::new("benchy.gcode"))? {
//!     InjectOutcome::Injected { prefix_len } => println!("added {} bytes", prefix_len),
//!     InjectOutcome::AlreadyPresent => println!("already done"),
//!     InjectOutcome::UnsupportedModel(model) => println!("{} not supported", model),
//! }
//!
//! # Ok::<(), neptune_thumbnails::error::ThumbnailError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`gcode`] | Source scanning and prefix injection |
//! | [`render`] | Decode, resample, quantize |
//! | [`protocol`] | Legacy and vendor frame grammars |
//! | [`printer`] | Model families and frame sizes |
//! | [`error`] | Error types |
//!
//! ## Supported Printers
//!
//! - Legacy grammar: Neptune 2, 2D, 2S, X
//! - Vendor grammar: Neptune 3 Pro, 3 Plus, 3 Max, 4, 4 Pro

pub mod error;
pub mod gcode;
pub mod printer;
pub mod protocol;
pub mod render;

// Re-exports for convenience
pub use error::ThumbnailError;
pub use printer::{DeviceFamily, PrinterModel};
