//! Configuration for wsi-convert.
//!
//! The CLI exposes one subcommand per supported source format:
//!
//! ```text
//! wsi-convert szi   <input.szi>  <output.svs>
//! wsi-convert image <input.png>  <output.svs>
//! ```
//!
//! The output profile (256x256 JPEG tiles at quality 85, BigTIFF, pyramid)
//! is fixed to match what slide viewers expect; it is deliberately not
//! configurable from the command line. See the constants in
//! [`crate::tiff`].

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

// =============================================================================
// CLI Arguments
// =============================================================================

/// wsi-convert - Convert whole-slide images to pyramidal SVS-style TIFF.
///
/// Reconstructs the full-resolution raster from an SZI (Deep Zoom) archive,
/// or decodes a plain raster file, and re-encodes it as a tiled pyramidal
/// TIFF for histology viewers.
#[derive(Parser, Debug, Clone)]
#[command(name = "wsi-convert")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Convert an SZI (Deep Zoom) archive.
    Szi(SziConfig),

    /// Convert a plain raster image.
    Image(ImageConfig),
}

/// Configuration for the `szi` subcommand.
#[derive(Args, Debug, Clone)]
pub struct SziConfig {
    /// Path to the input .szi archive.
    pub input: PathBuf,

    /// Path for the output .svs file.
    pub output: PathBuf,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl SziConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_paths(&self.input, &self.output)
    }
}

/// Configuration for the `image` subcommand.
#[derive(Args, Debug, Clone)]
pub struct ImageConfig {
    /// Path to the input raster image (any decodable format).
    pub input: PathBuf,

    /// Path for the output .svs file.
    pub output: PathBuf,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl ImageConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        validate_paths(&self.input, &self.output)
    }
}

fn validate_paths(input: &Path, output: &Path) -> Result<(), String> {
    if input.as_os_str().is_empty() {
        return Err("input path must not be empty".to_string());
    }
    if output.as_os_str().is_empty() {
        return Err("output path must not be empty".to_string());
    }
    if input == output {
        return Err("input and output paths must differ".to_string());
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
