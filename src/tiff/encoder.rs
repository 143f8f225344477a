//! Pyramidal JPEG tile encoder.
//!
//! Serializes a stitched RGB canvas as a tiled, pyramidal, JPEG-compressed
//! BigTIFF matching the profile histology viewers expect. The parameters
//! are hard-coded; callers get no knobs.
//!
//! Each pyramid level is tiled into fixed-size tiles, every tile is
//! compressed as a complete JPEG stream, and one IFD per level is written
//! through [`BigTiffWriter`]. Reduced levels are produced by repeated 2x
//! shrinks of the previous level and marked with `NewSubfileType = 1`;
//! the pyramid stops once a level fits in a single tile.

use std::fs::File;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::RgbImage;
use tracing::{debug, info};

use crate::error::EncodeError;

use super::tags::{Compression, Photometric, TiffTag};
use super::writer::{BigTiffWriter, Ifd, IfdEntry};

/// Output tile edge length in pixels.
pub const SVS_TILE_SIZE: u32 = 256;

/// JPEG quality for output tiles (1-100).
pub const SVS_JPEG_QUALITY: u8 = 85;

// =============================================================================
// Pyramid Planning
// =============================================================================

/// Plan the level dimensions of a pyramid.
///
/// Level 0 is (width, height); each further level is a ceil-halving of the
/// previous one. The pyramid ends with the first level that fits in a
/// single tile.
pub fn pyramid_levels(width: u32, height: u32, tile_size: u32) -> Vec<(u32, u32)> {
    let mut levels = vec![(width, height)];
    let (mut w, mut h) = (width, height);

    while w > tile_size || h > tile_size {
        w = w.div_ceil(2).max(1);
        h = h.div_ceil(2).max(1);
        levels.push((w, h));
    }

    levels
}

// =============================================================================
// Encoder
// =============================================================================

/// Fixed-profile pyramidal encoder.
///
/// The profile — JPEG compression, 256x256 tiles, BigTIFF addressing,
/// quality 85, 8-bit RGB chunky — matches the structural expectations of
/// slide viewers and is not configurable.
#[derive(Debug, Clone)]
pub struct PyramidEncoder {
    tile_size: u32,
    quality: u8,
}

impl Default for PyramidEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PyramidEncoder {
    pub fn new() -> Self {
        PyramidEncoder {
            tile_size: SVS_TILE_SIZE,
            quality: SVS_JPEG_QUALITY,
        }
    }

    /// Encode `canvas` to a pyramidal file at `path`.
    ///
    /// On failure the partially written file is removed: a failed run
    /// leaves no output behind.
    pub fn encode_to_file(&self, canvas: &RgbImage, path: &Path) -> Result<(), EncodeError> {
        let file = File::create(path)?;
        let result = self.encode(canvas, BufWriter::new(file));

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let _ = std::fs::remove_file(path);
                Err(e)
            }
        }
    }

    /// Encode `canvas` into `out` and return the written sink.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::EmptyImage`] if the canvas has a zero dimension
    /// - [`EncodeError::JpegEncode`] if a tile fails to compress
    /// - [`EncodeError::Io`] on write failure
    pub fn encode<W: Write + Seek>(&self, canvas: &RgbImage, out: W) -> Result<W, EncodeError> {
        if canvas.width() == 0 || canvas.height() == 0 {
            return Err(EncodeError::EmptyImage);
        }

        let levels = pyramid_levels(canvas.width(), canvas.height(), self.tile_size);
        info!(
            "encoding {}x{} canvas as {}-level pyramid",
            canvas.width(),
            canvas.height(),
            levels.len(),
        );

        let mut writer = BigTiffWriter::new(out)?;
        let mut ifds = Vec::with_capacity(levels.len());
        let mut scaled: Option<RgbImage> = None;

        for (index, &(w, h)) in levels.iter().enumerate() {
            if index > 0 {
                let source = scaled.as_ref().unwrap_or(canvas);
                scaled = Some(image::imageops::resize(source, w, h, FilterType::Triangle));
            }
            let level_image = scaled.as_ref().unwrap_or(canvas);

            let ifd = self.write_level(&mut writer, level_image, index)?;
            ifds.push(ifd);
        }

        writer.finish(ifds)
    }

    /// Tile one pyramid level into the blob region and build its IFD.
    fn write_level<W: Write + Seek>(
        &self,
        writer: &mut BigTiffWriter<W>,
        image: &RgbImage,
        level_index: usize,
    ) -> Result<Ifd, EncodeError> {
        let tiles_x = image.width().div_ceil(self.tile_size);
        let tiles_y = image.height().div_ceil(self.tile_size);

        let mut offsets = Vec::with_capacity((tiles_x * tiles_y) as usize);
        let mut byte_counts = Vec::with_capacity((tiles_x * tiles_y) as usize);

        for ty in 0..tiles_y {
            for tx in 0..tiles_x {
                let jpeg = self.encode_tile(image, tx, ty)?;
                let at = writer.write_blob(&jpeg)?;
                offsets.push(at);
                byte_counts.push(jpeg.len() as u64);
            }
        }

        debug!(
            "level {}: {}x{} px, {}x{} tiles",
            level_index,
            image.width(),
            image.height(),
            tiles_x,
            tiles_y,
        );

        let mut ifd = Ifd::new();
        if level_index > 0 {
            ifd.push(IfdEntry::long(TiffTag::NewSubfileType, 1));
        }
        ifd.push(IfdEntry::long(TiffTag::ImageWidth, image.width()));
        ifd.push(IfdEntry::long(TiffTag::ImageLength, image.height()));
        ifd.push(IfdEntry::shorts(TiffTag::BitsPerSample, &[8, 8, 8]));
        ifd.push(IfdEntry::short(TiffTag::Compression, Compression::Jpeg.as_u16()));
        ifd.push(IfdEntry::short(
            TiffTag::PhotometricInterpretation,
            Photometric::YCbCr.as_u16(),
        ));
        ifd.push(IfdEntry::short(TiffTag::SamplesPerPixel, 3));
        ifd.push(IfdEntry::short(TiffTag::PlanarConfiguration, 1));
        ifd.push(IfdEntry::long(TiffTag::TileWidth, self.tile_size));
        ifd.push(IfdEntry::long(TiffTag::TileLength, self.tile_size));
        ifd.push(IfdEntry::long8s(TiffTag::TileOffsets, &offsets));
        ifd.push(IfdEntry::long8s(TiffTag::TileByteCounts, &byte_counts));

        Ok(ifd)
    }

    /// Compress the tile at grid position (tx, ty) as a complete JPEG
    /// stream.
    ///
    /// Tiled TIFF tiles are always full tile size; edge tiles are
    /// zero-padded out to it and readers clip against the level dimensions.
    fn encode_tile(&self, image: &RgbImage, tx: u32, ty: u32) -> Result<Vec<u8>, EncodeError> {
        let x0 = tx * self.tile_size;
        let y0 = ty * self.tile_size;
        let copy_w = self.tile_size.min(image.width() - x0);
        let copy_h = self.tile_size.min(image.height() - y0);

        let mut tile = RgbImage::new(self.tile_size, self.tile_size);
        for dy in 0..copy_h {
            for dx in 0..copy_w {
                tile.put_pixel(dx, dy, *image.get_pixel(x0 + dx, y0 + dy));
            }
        }

        let mut jpeg = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, self.quality);
        encoder
            .encode_image(&tile)
            .map_err(|e| EncodeError::JpegEncode {
                message: e.to_string(),
            })?;

        Ok(jpeg)
    }
}

// =============================================================================
// Tests
// =============================================================================
