use std::path::PathBuf;

use thiserror::Error;

/// Errors opening or reading the source archive container.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archive file could not be opened
    #[error("cannot open archive {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid ZIP container
    #[error("{} is not a valid archive container: {source}", path.display())]
    Container {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// A contained entry could not be listed
    #[error("cannot access archive entry #{index}: {source}")]
    Entry {
        index: usize,
        #[source]
        source: zip::result::ZipError,
    },

    /// A contained entry could not be decompressed
    #[error("cannot read archive entry {name}: {source}")]
    EntryRead {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors caused by expected archive substructure being absent.
///
/// The SZI layout convention requires a `scan/` root holding exactly one
/// `.dzi` descriptor and a `<name>_files/` tile tree with at least one
/// integer-named zoom level directory containing tiles. Any missing piece
/// is fatal for the whole conversion.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LayoutError {
    /// No entries under the scan root
    #[error("no entries found under the 'scan/' root of the archive")]
    ScanRootMissing,

    /// No descriptor file in the scan root
    #[error("could not find a .dzi descriptor inside 'scan/'")]
    DescriptorMissing,

    /// More than one descriptor file in the scan root
    #[error("multiple .dzi descriptors found inside 'scan/': {first} and {second}")]
    DescriptorAmbiguous { first: String, second: String },

    /// No tile-container directory in the scan root
    #[error("could not find a '_files/' tile directory inside 'scan/'")]
    TileRootMissing,

    /// The tile root holds no integer-named zoom level directories
    #[error("no zoom level directories found under {tile_root}")]
    NoZoomLevels { tile_root: String },

    /// The selected zoom level holds no tiles
    #[error("no tiles found in {level_dir}")]
    NoTiles { level_dir: String },
}

/// Errors caused by present-but-unusable input data.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The descriptor is not valid UTF-8 text
    #[error("descriptor {descriptor} is not valid UTF-8 text")]
    DescriptorNotUtf8 { descriptor: String },

    /// The descriptor lacks the required dimension attributes
    #[error("could not find Width=\"..\" Height=\"..\" in descriptor {descriptor}")]
    DimensionsMissing { descriptor: String },

    /// The descriptor declares dimensions outside the usable range
    #[error("descriptor {descriptor} declares unusable dimensions {width}x{height}")]
    DimensionsInvalid {
        descriptor: String,
        width: u64,
        height: u64,
    },

    /// A tile image could not be decoded
    #[error("cannot decode tile {path}: {message}")]
    TileDecode { path: String, message: String },

    /// A tile's pixel size contradicts the size inferred for the tile set
    #[error(
        "tile {path} is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}"
    )]
    MixedTileSizes {
        path: String,
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    /// A plain source image could not be opened or decoded
    #[error("cannot read source image {}: {message}", path.display())]
    ImageRead { path: PathBuf, message: String },
}

/// Errors writing the pyramidal output file.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// I/O error while writing the output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A tile failed to compress
    #[error("JPEG encoding failed: {message}")]
    JpegEncode { message: String },

    /// The raster handed to the encoder has a zero dimension
    #[error("cannot encode an empty image")]
    EmptyImage,
}

/// Top-level conversion error.
///
/// Wraps the per-stage error types so the pipeline entry points can use `?`
/// across stages. All variants are unrecoverable for the current invocation:
/// the run aborts, no partial output is retained, and there is no retry.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}
