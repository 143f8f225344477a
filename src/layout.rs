//! Metadata and tile locator for the SZI scan layout.
//!
//! An SZI archive is expected to hold everything under a `scan/` root:
//!
//! ```text
//! scan/
//!   <name>.dzi            descriptor with full-resolution dimensions
//!   <name>_files/
//!     <level>/            integer zoom level directories
//!       <col>_<row>.<ext> fixed-size tiles named by grid position
//! ```
//!
//! The locator scans the in-memory entry table for the descriptor and the
//! tile root. The descriptor must be unique: rather than silently picking
//! the first match in archive enumeration order, an archive with more than
//! one `.dzi` entry under `scan/` is rejected.

use tracing::debug;

use crate::archive::SziArchive;
use crate::error::LayoutError;

/// Required top-level subfolder inside the archive.
pub const SCAN_ROOT: &str = "scan/";

/// Extension of the Deep Zoom descriptor file.
pub const DESCRIPTOR_EXTENSION: &str = ".dzi";

/// Path segment marking the tile-container directory.
pub const TILE_ROOT_MARKER: &str = "_files/";

/// Resolved locations of the descriptor and tile tree inside the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanLayout {
    /// Full path of the unique `.dzi` descriptor entry
    pub descriptor_path: String,

    /// Tile-root prefix ending in `_files/`, e.g. `scan/slide_files/`
    pub tile_root: String,
}

impl ScanLayout {
    /// Locate the descriptor and tile root inside a loaded archive.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::ScanRootMissing`] if no entry lives under `scan/`
    /// - [`LayoutError::DescriptorMissing`] if no `.dzi` entry exists
    /// - [`LayoutError::DescriptorAmbiguous`] if more than one `.dzi` entry exists
    /// - [`LayoutError::TileRootMissing`] if no path contains a `_files/` segment
    pub fn locate(archive: &SziArchive) -> Result<Self, LayoutError> {
        let mut saw_scan_entry = false;
        let mut descriptor: Option<&str> = None;
        let mut tile_root: Option<String> = None;

        for entry in archive.iter() {
            if !entry.path.starts_with(SCAN_ROOT) {
                continue;
            }
            saw_scan_entry = true;

            if entry.path.ends_with(DESCRIPTOR_EXTENSION) {
                match descriptor {
                    None => descriptor = Some(&entry.path),
                    Some(first) => {
                        return Err(LayoutError::DescriptorAmbiguous {
                            first: first.to_string(),
                            second: entry.path.clone(),
                        })
                    }
                }
            }

            if tile_root.is_none() {
                if let Some(pos) = entry.path.find(TILE_ROOT_MARKER) {
                    tile_root = Some(entry.path[..pos + TILE_ROOT_MARKER.len()].to_string());
                }
            }
        }

        if !saw_scan_entry {
            return Err(LayoutError::ScanRootMissing);
        }

        let descriptor_path = descriptor.ok_or(LayoutError::DescriptorMissing)?.to_string();
        let tile_root = tile_root.ok_or(LayoutError::TileRootMissing)?;

        debug!("descriptor: {descriptor_path}, tile root: {tile_root}");

        Ok(ScanLayout {
            descriptor_path,
            tile_root,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================
