//! Tiled pyramidal BigTIFF output.
//!
//! This module owns the target format: a JPEG-compressed, internally tiled
//! raster with embedded downsampled resolutions, written as BigTIFF so
//! stitched slides past the 4GB classic-TIFF ceiling remain addressable.
//!
//! # Key Concepts
//!
//! - **IFD (Image File Directory)**: metadata block plus pointers to image
//!   data. One IFD is written per pyramid level, chained in resolution
//!   order (level 0 = full size first).
//!
//! - **Inline vs offset values**: small tag values are stored inline in
//!   the 8-byte value field of a BigTIFF entry; larger ones (tile offset
//!   arrays, strings) are written out-of-line and referenced by offset.
//!
//! - **Complete JPEG streams**: every tile blob is a self-contained JPEG,
//!   so no shared quantization/Huffman table segment is needed.

mod encoder;
mod tags;
mod writer;

pub use encoder::{pyramid_levels, PyramidEncoder, SVS_JPEG_QUALITY, SVS_TILE_SIZE};
pub use tags::{Compression, FieldType, Photometric, TiffTag};
pub use writer::{BigTiffWriter, Ifd, IfdEntry, BIGTIFF_HEADER_SIZE};
