//! Archive loader for SZI containers.
//!
//! An SZI file is a ZIP container holding a Deep Zoom tile tree. The loader
//! materializes the entire archive into an in-memory table of
//! (entry path → bytes), preserving the archive's enumeration order. No
//! streaming: slide tile sets are bounded in aggregate size for this tool's
//! use case, and whole-archive materialization keeps the later stages free
//! of I/O. Memory is bounded by the archive itself plus the stitched canvas
//! plus one decoded tile at a time.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use bytes::Bytes;
use tracing::debug;
use zip::ZipArchive;

use crate::error::ArchiveError;

/// One file extracted from the source archive.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    /// Relative path of the entry inside the archive
    pub path: String,

    /// Raw (decompressed) content
    pub data: Bytes,
}

/// In-memory table of archive entries.
///
/// Entries keep their archive enumeration order, and exact-path lookup is
/// backed by an index map. The table is immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct SziArchive {
    entries: Vec<ArchiveEntry>,
    index: HashMap<String, usize>,
}

impl SziArchive {
    /// Load every entry of the ZIP container at `path` into memory.
    ///
    /// Directory entries are skipped; only files are retained.
    ///
    /// # Errors
    ///
    /// Returns an [`ArchiveError`] if the file cannot be opened, is not a
    /// valid ZIP container, or any entry fails to decompress.
    pub fn load(path: &Path) -> Result<Self, ArchiveError> {
        let file = File::open(path).map_err(|source| ArchiveError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let mut zip = ZipArchive::new(file).map_err(|source| ArchiveError::Container {
            path: path.to_path_buf(),
            source,
        })?;

        let mut archive = SziArchive {
            entries: Vec::with_capacity(zip.len()),
            index: HashMap::with_capacity(zip.len()),
        };

        for i in 0..zip.len() {
            let mut entry = zip
                .by_index(i)
                .map_err(|source| ArchiveError::Entry { index: i, source })?;

            if entry.is_dir() {
                continue;
            }

            let name = entry.name().to_string();
            let mut data = Vec::with_capacity(entry.size() as usize);
            entry
                .read_to_end(&mut data)
                .map_err(|source| ArchiveError::EntryRead {
                    name: name.clone(),
                    source,
                })?;

            debug!("extracted {} ({} bytes)", name, data.len());
            archive.insert(name, Bytes::from(data));
        }

        Ok(archive)
    }

    /// Build an archive table directly from (path, content) pairs.
    ///
    /// Pairs keep their given order, matching how [`SziArchive::load`]
    /// preserves archive enumeration order. Later duplicates of a path
    /// shadow earlier ones in lookups.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, Bytes)>,
    {
        let mut archive = SziArchive::default();
        for (path, data) in entries {
            archive.insert(path, data);
        }
        archive
    }

    fn insert(&mut self, path: String, data: Bytes) {
        self.index.insert(path.clone(), self.entries.len());
        self.entries.push(ArchiveEntry { path, data });
    }

    /// Look up an entry's content by its exact path.
    pub fn get(&self, path: &str) -> Option<&Bytes> {
        self.index.get(path).map(|&i| &self.entries[i].data)
    }

    /// Iterate entries in archive enumeration order.
    pub fn iter(&self) -> impl Iterator<Item = &ArchiveEntry> {
        self.entries.iter()
    }

    /// Number of file entries in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
