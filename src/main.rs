//! # Neptune Thumbnails CLI
//!
//! Post-processing script for PrusaSlicer. Adds Elegoo Neptune display
//! thumbnails to a g-code file in place.
//!
//! ## Usage
//!
//! ```bash
//! # Add thumbnails to a sliced file
//! neptune-thumbnails benchy.gcode
//!
//! # With debug logging
//! RUST_LOG=debug neptune-thumbnails benchy.gcode
//! ```
//!
//! In PrusaSlicer, add the binary under Print Settings > Output options >
//! Post-processing scripts and enable a 600x600 PNG thumbnail.

use clap::Parser;
use std::path::PathBuf;

use neptune_thumbnails::{
    ThumbnailError,
    gcode::{self, InjectOutcome},
};

/// Neptune Thumbnails - add Elegoo Neptune thumbnails to g-code
#[derive(Parser, Debug)]
#[command(name = "neptune-thumbnails")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// G-code file to modify in place
    gcode: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), ThumbnailError> {
    let cli = Cli::parse();

    match gcode::add_thumbnail_prefix(&cli.gcode)? {
        InjectOutcome::Injected { prefix_len } => {
            println!(
                "Added thumbnail to {} ({} bytes)",
                cli.gcode.display(),
                prefix_len
            );
        }
        InjectOutcome::AlreadyPresent => {
            println!("{} already contains a thumbnail", cli.gcode.display());
        }
        InjectOutcome::UnsupportedModel(model) => {
            println!("Printer model {} does not use Neptune thumbnails", model);
        }
    }

    Ok(())
}
