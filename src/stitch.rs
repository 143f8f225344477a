//! Tile stitcher.
//!
//! Reconstructs the full-resolution raster from the tiles of the selected
//! zoom level. The canvas is allocated at exactly the dimensions declared by
//! the descriptor, zero-initialized (black), and each tile is copied in at
//! the offset derived from its grid position:
//!
//! ```text
//! (col, row)  →  top-left pixel at (col * tile_width, row * tile_height)
//! ```
//!
//! Placement is driven solely by the tiles actually present. Gaps in the
//! grid leave the default fill; tiles overhanging the canvas edge are
//! clipped, never rejected. The result is independent of iteration order
//! since tiles do not overlap by construction of the format.
//!
//! # Tile size validation
//!
//! The grid pitch is inferred from one sample tile (the first in key order,
//! so deterministically the smallest (col, row) present). Every tile is then
//! checked against it: a tile larger than the pitch in either dimension, or
//! an interior tile smaller than it, aborts the conversion rather than
//! silently misplacing content. Edge tiles are allowed to be smaller, as
//! Deep Zoom edge tiles are.

use std::io::Cursor;

use image::{ImageReader, RgbImage};
use tracing::{debug, info};

use crate::archive::SziArchive;
use crate::dzi::{DziDescriptor, TileSet};
use crate::error::FormatError;

/// Stitch the tile set into a canvas of the descriptor's dimensions.
///
/// # Errors
///
/// - [`FormatError::TileDecode`] if a tile's bytes cannot be decoded
/// - [`FormatError::MixedTileSizes`] if a tile contradicts the inferred
///   grid pitch
pub fn stitch(
    archive: &SziArchive,
    descriptor: &DziDescriptor,
    tiles: &TileSet,
) -> Result<RgbImage, FormatError> {
    let (tile_width, tile_height) = infer_tile_size(archive, tiles)?;

    // Informational only; placement is driven by the tiles present.
    let grid_cols = descriptor.width.div_ceil(tile_width);
    let grid_rows = descriptor.height.div_ceil(tile_height);
    info!(
        "stitching {} tiles ({}x{} px each, {}x{} grid) into {}x{} canvas",
        tiles.len(),
        tile_width,
        tile_height,
        grid_cols,
        grid_rows,
        descriptor.width,
        descriptor.height,
    );

    let max_col = tiles.max_col();
    let max_row = tiles.max_row();

    let mut canvas = RgbImage::new(descriptor.width, descriptor.height);

    for (&(col, row), path) in &tiles.tiles {
        let tile = decode_tile(archive, path)?;

        let oversized = tile.width() > tile_width || tile.height() > tile_height;
        let interior_short = (col < max_col && tile.width() != tile_width)
            || (row < max_row && tile.height() != tile_height);
        if oversized || interior_short {
            return Err(FormatError::MixedTileSizes {
                path: path.clone(),
                expected_width: tile_width,
                expected_height: tile_height,
                actual_width: tile.width(),
                actual_height: tile.height(),
            });
        }

        let x0 = u64::from(col) * u64::from(tile_width);
        let y0 = u64::from(row) * u64::from(tile_height);
        paste_clipped(&mut canvas, &tile, x0, y0);
        debug!("placed tile ({col}, {row}) at ({x0}, {y0})");
    }

    Ok(canvas)
}

/// Decode one sample tile to read the grid pitch.
///
/// All tiles are assumed to share this size; the assumption is enforced
/// during stitching.
fn infer_tile_size(archive: &SziArchive, tiles: &TileSet) -> Result<(u32, u32), FormatError> {
    // Collection guarantees at least one tile.
    let sample_path = tiles
        .tiles
        .values()
        .next()
        .ok_or_else(|| FormatError::TileDecode {
            path: tiles.level_dir.clone(),
            message: "empty tile set".to_string(),
        })?;

    let sample = decode_tile(archive, sample_path)?;
    Ok((sample.width(), sample.height()))
}

/// Decode a tile entry into an RGB raster.
fn decode_tile(archive: &SziArchive, path: &str) -> Result<RgbImage, FormatError> {
    let data = archive.get(path).ok_or_else(|| FormatError::TileDecode {
        path: path.to_string(),
        message: "entry not found in archive".to_string(),
    })?;

    let decode_err = |message: String| FormatError::TileDecode {
        path: path.to_string(),
        message,
    };

    let reader = ImageReader::new(Cursor::new(data.as_ref()))
        .with_guessed_format()
        .map_err(|e| decode_err(e.to_string()))?;

    let img = reader.decode().map_err(|e| decode_err(e.to_string()))?;
    Ok(img.to_rgb8())
}

/// Copy `tile` into `canvas` with its top-left corner at (x0, y0), clipping
/// silently wherever the paste target exceeds the canvas bounds.
fn paste_clipped(canvas: &mut RgbImage, tile: &RgbImage, x0: u64, y0: u64) {
    let canvas_w = u64::from(canvas.width());
    let canvas_h = u64::from(canvas.height());
    if x0 >= canvas_w || y0 >= canvas_h {
        return;
    }

    let copy_w = u64::from(tile.width()).min(canvas_w - x0) as u32;
    let copy_h = u64::from(tile.height()).min(canvas_h - y0) as u32;

    for dy in 0..copy_h {
        for dx in 0..copy_w {
            let pixel = *tile.get_pixel(dx, dy);
            canvas.put_pixel((x0 + u64::from(dx)) as u32, (y0 + u64::from(dy)) as u32, pixel);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
