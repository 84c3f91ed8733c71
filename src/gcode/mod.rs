//! # G-code Handling
//!
//! Reading thumbnail sources out of slicer g-code and writing the encoded
//! thumbnail prefix back.
//!
//! ## Module Structure
//!
//! - [`scanner`]: Thumbnail block and printer model extraction
//! - [`inject`]: Prefix assembly and idempotent file rewrite

pub mod inject;
pub mod scanner;

pub use inject::{InjectOutcome, ThumbnailSource, add_thumbnail_prefix, generate_prefix};
