//! BigTIFF structure writer.
//!
//! Emits the container structure of a tiled pyramidal file: the BigTIFF
//! header, a blob region holding the compressed tile data, and an IFD chain
//! describing one pyramid level per IFD.
//!
//! # BigTIFF Header (16 bytes)
//!
//! ```text
//! Bytes 0-1:  Byte order (0x4949 = little-endian "II")
//! Bytes 2-3:  Version (43)
//! Bytes 4-5:  Offset byte size (8)
//! Bytes 6-7:  Reserved (0)
//! Bytes 8-15: Offset to first IFD (8 bytes)
//! ```
//!
//! # File Layout
//!
//! The writer streams tile blobs first, then writes all out-of-line IFD
//! values, then the IFD tables themselves, and finally seeks back to patch
//! the header's first-IFD offset. Every structure starts on an even offset
//! as the TIFF structure requires.
//!
//! # IFD Encoding
//!
//! A BigTIFF IFD is a u64 entry count, `count` 20-byte entries sorted by
//! ascending tag ID, and a u64 offset to the next IFD (0 terminates the
//! chain). Each entry is tag (u16), field type (u16), value count (u64),
//! and 8 bytes holding either the value itself (if it fits) or the offset
//! where the value is stored.

use std::io::{Seek, SeekFrom, Write};

use crate::error::EncodeError;

use super::tags::{FieldType, TiffTag};

/// Size of the BigTIFF header in bytes.
pub const BIGTIFF_HEADER_SIZE: u64 = 16;

/// Size of one BigTIFF IFD entry in bytes.
const IFD_ENTRY_SIZE: u64 = 20;

/// Byte offset of the first-IFD pointer inside the header.
const FIRST_IFD_POINTER_OFFSET: u64 = 8;

// =============================================================================
// IFD Entries
// =============================================================================

/// One IFD entry: a tag with its typed value, encoded little-endian.
#[derive(Debug, Clone)]
pub struct IfdEntry {
    tag: TiffTag,
    field_type: FieldType,
    count: u64,
    /// Raw little-endian value bytes; inline or out-of-line is decided by
    /// the writer from `field_type` and `count`.
    data: Vec<u8>,
}

impl IfdEntry {
    /// A single SHORT value.
    pub fn short(tag: TiffTag, value: u16) -> Self {
        Self::shorts(tag, &[value])
    }

    /// An array of SHORT values.
    pub fn shorts(tag: TiffTag, values: &[u16]) -> Self {
        let mut data = Vec::with_capacity(values.len() * 2);
        for v in values {
            data.extend_from_slice(&v.to_le_bytes());
        }
        IfdEntry {
            tag,
            field_type: FieldType::Short,
            count: values.len() as u64,
            data,
        }
    }

    /// A single LONG value.
    pub fn long(tag: TiffTag, value: u32) -> Self {
        IfdEntry {
            tag,
            field_type: FieldType::Long,
            count: 1,
            data: value.to_le_bytes().to_vec(),
        }
    }

    /// An array of LONG8 values.
    pub fn long8s(tag: TiffTag, values: &[u64]) -> Self {
        let mut data = Vec::with_capacity(values.len() * 8);
        for v in values {
            data.extend_from_slice(&v.to_le_bytes());
        }
        IfdEntry {
            tag,
            field_type: FieldType::Long8,
            count: values.len() as u64,
            data,
        }
    }

    /// A NUL-terminated ASCII string.
    pub fn ascii(tag: TiffTag, text: &str) -> Self {
        let mut data = text.as_bytes().to_vec();
        data.push(0);
        IfdEntry {
            tag,
            field_type: FieldType::Ascii,
            count: data.len() as u64,
            data,
        }
    }

    fn is_inline(&self) -> bool {
        self.field_type.fits_inline(self.count)
    }
}

/// An IFD under construction: the entries of one pyramid level.
#[derive(Debug, Clone, Default)]
pub struct Ifd {
    entries: Vec<IfdEntry>,
}

impl Ifd {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry. Entries may be pushed in any order; the writer sorts
    /// by tag ID before encoding.
    pub fn push(&mut self, entry: IfdEntry) {
        self.entries.push(entry);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the IFD holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encoded size of the IFD table itself (count + entries + next pointer).
    fn encoded_size(&self) -> u64 {
        8 + self.entries.len() as u64 * IFD_ENTRY_SIZE + 8
    }
}

// =============================================================================
// Writer
// =============================================================================

/// Streaming little-endian BigTIFF writer.
///
/// Usage: create (writes the header), call [`BigTiffWriter::write_blob`]
/// for each compressed tile, then [`BigTiffWriter::finish`] with one IFD
/// per pyramid level.
#[derive(Debug)]
pub struct BigTiffWriter<W: Write + Seek> {
    inner: W,
    offset: u64,
}

impl<W: Write + Seek> BigTiffWriter<W> {
    /// Write the BigTIFF header with a placeholder first-IFD offset.
    pub fn new(mut inner: W) -> Result<Self, EncodeError> {
        inner.write_all(b"II")?;
        inner.write_all(&43u16.to_le_bytes())?;
        inner.write_all(&8u16.to_le_bytes())?;
        inner.write_all(&0u16.to_le_bytes())?;
        inner.write_all(&0u64.to_le_bytes())?;
        Ok(BigTiffWriter {
            inner,
            offset: BIGTIFF_HEADER_SIZE,
        })
    }

    /// Append a data blob at the next even offset and return that offset.
    pub fn write_blob(&mut self, data: &[u8]) -> Result<u64, EncodeError> {
        self.align()?;
        let at = self.offset;
        self.inner.write_all(data)?;
        self.offset += data.len() as u64;
        Ok(at)
    }

    /// Pad with a single zero byte if the current offset is odd.
    fn align(&mut self) -> Result<(), EncodeError> {
        if self.offset % 2 == 1 {
            self.inner.write_all(&[0])?;
            self.offset += 1;
        }
        Ok(())
    }

    /// Write the IFD chain, patch the header, and return the inner writer.
    ///
    /// # Errors
    ///
    /// [`EncodeError::EmptyImage`] if `ifds` is empty; I/O errors otherwise.
    pub fn finish(mut self, mut ifds: Vec<Ifd>) -> Result<W, EncodeError> {
        if ifds.is_empty() {
            return Err(EncodeError::EmptyImage);
        }

        for ifd in &mut ifds {
            ifd.entries.sort_by_key(|e| e.tag.as_u16());
        }

        // Phase 1: out-of-line values. Record the offset each non-inline
        // entry's data lands at.
        let mut value_offsets: Vec<Vec<Option<u64>>> = Vec::with_capacity(ifds.len());
        for ifd in &ifds {
            let mut offsets = Vec::with_capacity(ifd.entries.len());
            for entry in &ifd.entries {
                if entry.is_inline() {
                    offsets.push(None);
                } else {
                    offsets.push(Some(self.write_blob(&entry.data)?));
                }
            }
            value_offsets.push(offsets);
        }

        // Phase 2: IFD tables. With all value offsets known, the position
        // of every IFD (and so every next-pointer) is computable up front.
        self.align()?;
        let mut ifd_offsets = Vec::with_capacity(ifds.len());
        let mut at = self.offset;
        for ifd in &ifds {
            ifd_offsets.push(at);
            at += ifd.encoded_size();
        }

        for (i, ifd) in ifds.iter().enumerate() {
            self.write_u64(ifd.entries.len() as u64)?;

            for (entry, value_offset) in ifd.entries.iter().zip(&value_offsets[i]) {
                self.write_u16(entry.tag.as_u16())?;
                self.write_u16(entry.field_type.as_u16())?;
                self.write_u64(entry.count)?;

                match value_offset {
                    Some(offset) => self.write_u64(*offset)?,
                    None => {
                        let mut inline = [0u8; 8];
                        inline[..entry.data.len()].copy_from_slice(&entry.data);
                        self.inner.write_all(&inline)?;
                        self.offset += 8;
                    }
                }
            }

            let next = ifd_offsets.get(i + 1).copied().unwrap_or(0);
            self.write_u64(next)?;
        }

        // Phase 3: patch the header's first-IFD pointer.
        self.inner.seek(SeekFrom::Start(FIRST_IFD_POINTER_OFFSET))?;
        self.inner.write_all(&ifd_offsets[0].to_le_bytes())?;
        self.inner.flush()?;

        Ok(self.inner)
    }

    fn write_u16(&mut self, value: u16) -> Result<(), EncodeError> {
        self.inner.write_all(&value.to_le_bytes())?;
        self.offset += 2;
        Ok(())
    }

    fn write_u64(&mut self, value: u64) -> Result<(), EncodeError> {
        self.inner.write_all(&value.to_le_bytes())?;
        self.offset += 8;
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
