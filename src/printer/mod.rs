//! # Printer Module
//!
//! This module provides printer model classification and frame sizes.
//!
//! ## Modules
//!
//! - [`config`]: Model allow-lists and frame specifications

pub mod config;

pub use config::{DeviceFamily, FrameSpec, PrinterModel};
