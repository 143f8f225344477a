//! TIFF tag and field type definitions for the writer.
//!
//! This module defines the vocabulary the BigTIFF writer emits:
//! - Field types that determine how values are encoded
//! - Tag IDs for the metadata fields a tiled pyramidal file needs
//!
//! Only the tags the output profile uses are defined. The writer emits
//! BigTIFF exclusively, so inline-value sizing uses the 8-byte BigTIFF
//! threshold throughout.

// =============================================================================
// TIFF Field Types
// =============================================================================

/// TIFF field types that determine how values are encoded.
///
/// Each field type has a specific size in bytes, which decides whether a
/// value array fits inline in an IFD entry or must be written out-of-line
/// at an offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum FieldType {
    /// 8-bit ASCII character, NUL-terminated strings (1 byte)
    Ascii = 2,

    /// Unsigned 16-bit integer (2 bytes)
    Short = 3,

    /// Unsigned 32-bit integer (4 bytes)
    Long = 4,

    /// Unsigned 64-bit integer (8 bytes), BigTIFF only
    Long8 = 16,
}

impl FieldType {
    /// Size of a single value of this type in bytes.
    #[inline]
    pub const fn size_in_bytes(self) -> usize {
        match self {
            FieldType::Ascii => 1,
            FieldType::Short => 2,
            FieldType::Long => 4,
            FieldType::Long8 => 8,
        }
    }

    /// Maximum bytes that can be stored inline in a BigTIFF IFD entry.
    ///
    /// In BigTIFF, the value/offset field is 8 bytes.
    pub const INLINE_THRESHOLD: usize = 8;

    /// Check if a value with this type and count fits inline in an entry.
    #[inline]
    pub fn fits_inline(self, count: u64) -> bool {
        self.size_in_bytes() as u64 * count <= Self::INLINE_THRESHOLD as u64
    }

    /// Get the numeric field type ID.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

// =============================================================================
// TIFF Tags
// =============================================================================

/// TIFF tag IDs emitted for each pyramid level.
///
/// Tags are 16-bit identifiers describing the type of metadata in an IFD
/// entry. The TIFF structure requires entries sorted by ascending tag ID;
/// the writer enforces that ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u16)]
pub enum TiffTag {
    /// Subfile kind; 1 marks a reduced-resolution pyramid level
    NewSubfileType = 254,

    /// Image width in pixels
    ImageWidth = 256,

    /// Image height (length) in pixels
    ImageLength = 257,

    /// Bits per sample (8 per channel here)
    BitsPerSample = 258,

    /// Compression scheme used
    Compression = 259,

    /// Photometric interpretation (YCbCr for JPEG-compressed output)
    PhotometricInterpretation = 262,

    /// Description string
    ImageDescription = 270,

    /// Number of components per pixel (3 for RGB)
    SamplesPerPixel = 277,

    /// How components are organized (1 = chunky)
    PlanarConfiguration = 284,

    /// Width of each tile in pixels
    TileWidth = 322,

    /// Height (length) of each tile in pixels
    TileLength = 323,

    /// Byte offsets of each tile in the file
    TileOffsets = 324,

    /// Byte counts of each tile
    TileByteCounts = 325,
}

impl TiffTag {
    /// Get the numeric tag ID.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

// =============================================================================
// Compression Values
// =============================================================================

/// TIFF compression scheme identifiers.
///
/// The output profile always uses JPEG (value 7); `Uncompressed` exists for
/// completeness of the vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Compression {
    /// No compression
    Uncompressed = 1,

    /// JPEG compression ("new-style", complete streams per tile)
    Jpeg = 7,
}

impl Compression {
    /// Get the numeric compression ID.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

/// Photometric interpretation identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Photometric {
    /// RGB color
    Rgb = 2,

    /// YCbCr color, the space JPEG-compressed tiles are stored in
    YCbCr = 6,
}

impl Photometric {
    /// Get the numeric photometric ID.
    #[inline]
    pub const fn as_u16(self) -> u16 {
        self as u16
    }
}

// =============================================================================
// Tests
// =============================================================================
