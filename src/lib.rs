//! # wsi-convert
//!
//! A converter for whole-slide pathology images: reconstructs the
//! full-resolution raster from an archived Deep Zoom tile set (SZI) and
//! re-encodes it as a tiled, pyramidal, SVS-style BigTIFF for histology
//! viewers. A secondary path converts plain raster files to the same
//! output profile.
//!
//! ## Pipeline
//!
//! The SZI path is a single linear pipeline with four stages:
//!
//! ```text
//! ┌─────────────┐   ┌─────────────┐   ┌─────────────┐   ┌─────────────┐
//! │   archive   │──▶│   layout    │──▶│   stitch    │──▶│    tiff     │
//! │ (ZIP → mem) │   │ (locate dzi │   │ (tiles →    │   │ (pyramidal  │
//! │             │   │  + tiles)   │   │  canvas)    │   │  BigTIFF)   │
//! └─────────────┘   └─────────────┘   └─────────────┘   └─────────────┘
//! ```
//!
//! Everything is synchronous and single-threaded: the archive is
//! materialized in memory, one canvas is stitched, one output file is
//! written. A failed stage aborts the whole conversion with no partial
//! output.
//!
//! ## Modules
//!
//! - [`archive`] - ZIP container loading into an in-memory entry table
//! - [`layout`] - descriptor and tile-root location in the scan layout
//! - [`dzi`] - Deep Zoom descriptor and tile naming parsers
//! - [`stitch`] - grid-based tile stitching into a canvas
//! - [`tiff`] - tiled pyramidal BigTIFF writing with JPEG tiles
//! - [`convert`] - pipeline entry points
//! - [`config`] - CLI types
//! - [`error`] - per-stage error taxonomy
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use wsi_convert::convert_szi;
//!
//! fn main() -> Result<(), wsi_convert::ConvertError> {
//!     convert_szi(Path::new("slide.szi"), Path::new("slide.svs"))
//! }
//! ```

pub mod archive;
pub mod config;
pub mod convert;
pub mod dzi;
pub mod error;
pub mod layout;
pub mod stitch;
pub mod tiff;

// Re-export commonly used types
pub use archive::{ArchiveEntry, SziArchive};
pub use config::{Cli, Command, ImageConfig, SziConfig};
pub use convert::{convert_image, convert_szi};
pub use dzi::{parse_tile_coords, DziDescriptor, TileSet};
pub use error::{ArchiveError, ConvertError, EncodeError, FormatError, LayoutError};
pub use layout::{ScanLayout, DESCRIPTOR_EXTENSION, SCAN_ROOT, TILE_ROOT_MARKER};
pub use stitch::stitch;
pub use tiff::{
    pyramid_levels, BigTiffWriter, Compression, FieldType, Ifd, IfdEntry, Photometric,
    PyramidEncoder, TiffTag, BIGTIFF_HEADER_SIZE, SVS_JPEG_QUALITY, SVS_TILE_SIZE,
};
