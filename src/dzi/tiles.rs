//! Zoom level selection and tile enumeration.

use std::collections::BTreeMap;

use tracing::debug;

use crate::archive::SziArchive;
use crate::error::LayoutError;

/// Parse Deep Zoom tile coordinates from a filename like `3_5.jpg`.
///
/// The grid position is encoded as the two integers preceding the file
/// extension, `<col>_<row>.<ext>`. Returns `None` for names that do not
/// follow the convention; such files (thumbnails, metadata) may coexist in
/// a level directory and are skipped without error.
pub fn parse_tile_coords(filename: &str) -> Option<(u32, u32)> {
    let (stem, _ext) = filename.rsplit_once('.')?;

    let parts: Vec<&str> = stem.split('_').collect();
    if parts.len() != 2 {
        return None;
    }

    let col: u32 = parts[0].parse().ok()?;
    let row: u32 = parts[1].parse().ok()?;

    Some((col, row))
}

/// The tiles of the highest-resolution zoom level.
///
/// Tiles are keyed by (col, row) in a `BTreeMap`, so iteration order is
/// deterministic. Placement does not depend on that order (tiles do not
/// overlap by construction of the format), but tile-size inference does:
/// the first tile in key order is the sample whose pixel size defines the
/// grid pitch.
#[derive(Debug, Clone, PartialEq)]
pub struct TileSet {
    /// Selected zoom level (the maximum integer directory name present)
    pub level: u32,

    /// Directory prefix of the selected level, e.g. `scan/slide_files/12/`
    pub level_dir: String,

    /// Mapping from grid position to archive entry path
    pub tiles: BTreeMap<(u32, u32), String>,
}

impl TileSet {
    /// Enumerate zoom levels under `tile_root` and collect the tiles of the
    /// deepest one.
    ///
    /// Level directories are the path segments directly under the tile root
    /// that parse as integers; anything else under the root is ignored.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::NoZoomLevels`] if no integer level directory exists
    /// - [`LayoutError::NoTiles`] if the selected level holds no entry
    ///   matching the `<col>_<row>.<ext>` naming convention
    pub fn collect(archive: &SziArchive, tile_root: &str) -> Result<Self, LayoutError> {
        let mut max_level: Option<u32> = None;

        for entry in archive.iter() {
            if let Some(rest) = entry.path.strip_prefix(tile_root) {
                if let Some((dir, _)) = rest.split_once('/') {
                    if let Ok(level) = dir.parse::<u32>() {
                        max_level = Some(max_level.map_or(level, |m| m.max(level)));
                    }
                }
            }
        }

        let level = max_level.ok_or_else(|| LayoutError::NoZoomLevels {
            tile_root: tile_root.to_string(),
        })?;
        let level_dir = format!("{tile_root}{level}/");

        let mut tiles = BTreeMap::new();
        for entry in archive.iter() {
            if let Some(name) = entry.path.strip_prefix(&level_dir) {
                let basename = name.rsplit('/').next().unwrap_or(name);
                if let Some((col, row)) = parse_tile_coords(basename) {
                    tiles.insert((col, row), entry.path.clone());
                }
            }
        }

        if tiles.is_empty() {
            return Err(LayoutError::NoTiles { level_dir });
        }

        debug!("selected level {} with {} tiles", level, tiles.len());

        Ok(TileSet {
            level,
            level_dir,
            tiles,
        })
    }

    /// Number of tiles at the selected level.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the set holds no tiles. Never true for a collected set.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Greatest column index present.
    pub fn max_col(&self) -> u32 {
        self.tiles.keys().map(|&(col, _)| col).max().unwrap_or(0)
    }

    /// Greatest row index present.
    pub fn max_row(&self) -> u32 {
        self.tiles.keys().map(|&(_, row)| row).max().unwrap_or(0)
    }
}

// =============================================================================
// Tests
// =============================================================================
