//! Conversion pipeline entry points.
//!
//! Two independent paths share the pyramidal encoder:
//!
//! - [`convert_szi`]: the four-stage linear pipeline for archived Deep Zoom
//!   tile sets — load the archive into memory, locate the descriptor and
//!   tile tree, stitch the deepest zoom level into one canvas, encode.
//! - [`convert_image`]: the degenerate variant for plain rasters — decode
//!   the source directly and encode.
//!
//! Every stage runs to completion before the next begins; there is no
//! concurrency, no cancellation, and no retry. Any failure aborts the run
//! with no partial output retained.

use std::path::Path;

use image::ImageReader;
use tracing::info;

use crate::archive::SziArchive;
use crate::dzi::{DziDescriptor, TileSet};
use crate::error::{ConvertError, FormatError, LayoutError};
use crate::layout::ScanLayout;
use crate::stitch::stitch;
use crate::tiff::PyramidEncoder;

/// Convert an SZI Deep Zoom archive to a pyramidal SVS-style TIFF.
pub fn convert_szi(input: &Path, output: &Path) -> Result<(), ConvertError> {
    info!("loading archive {}", input.display());
    let archive = SziArchive::load(input)?;
    info!("loaded {} entries into memory", archive.len());

    let layout = ScanLayout::locate(&archive)?;
    info!(
        "using descriptor {} and tile root {}",
        layout.descriptor_path, layout.tile_root,
    );

    let descriptor_data = archive
        .get(&layout.descriptor_path)
        .ok_or(LayoutError::DescriptorMissing)?;
    let descriptor = DziDescriptor::parse(&layout.descriptor_path, descriptor_data)?;
    info!(
        "full-resolution dimensions: {}x{}",
        descriptor.width, descriptor.height,
    );

    let tiles = TileSet::collect(&archive, &layout.tile_root)?;
    info!("selected zoom level {} ({} tiles)", tiles.level, tiles.len());

    let canvas = stitch(&archive, &descriptor, &tiles)?;

    info!("encoding pyramid to {}", output.display());
    PyramidEncoder::new().encode_to_file(&canvas, output)?;

    Ok(())
}

/// Convert a plain raster image to a pyramidal SVS-style TIFF.
pub fn convert_image(input: &Path, output: &Path) -> Result<(), ConvertError> {
    info!("decoding source image {}", input.display());

    let read_err = |message: String| FormatError::ImageRead {
        path: input.to_path_buf(),
        message,
    };

    let source = ImageReader::open(input)
        .map_err(|e| read_err(e.to_string()))?
        .with_guessed_format()
        .map_err(|e| read_err(e.to_string()))?
        .decode()
        .map_err(|e| read_err(e.to_string()))?;

    let canvas = source.to_rgb8();
    info!("decoded {}x{} pixels", canvas.width(), canvas.height());

    info!("encoding pyramid to {}", output.display());
    PyramidEncoder::new().encode_to_file(&canvas, output)?;

    Ok(())
}
