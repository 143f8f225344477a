//! Deep Zoom source format handling.
//!
//! Deep Zoom splits an image into fixed-size tiles at multiple zoom levels,
//! described by a small XML descriptor carrying the full-resolution
//! dimensions. Level directories are numbered by depth, with the greatest
//! number holding the full-resolution tiles.
//!
//! This module owns the structural parsing of that source format:
//!
//! - [`DziDescriptor`]: the `Width="W" Height="H"` attribute pair
//! - [`parse_tile_coords`]: the `<col>_<row>.<ext>` tile naming convention
//! - [`TileSet`]: zoom level selection and the (col, row) → path mapping
//!
//! Parsers live here, isolated from the stitching loop, so their edge cases
//! (malformed filenames, missing attributes) are independently testable.

mod descriptor;
mod tiles;

pub use descriptor::DziDescriptor;
pub use tiles::{parse_tile_coords, TileSet};
