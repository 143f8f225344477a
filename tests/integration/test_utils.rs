//! Test utilities for integration tests.
//!
//! This module provides helpers for building synthetic SZI archives and a
//! minimal BigTIFF reader for verifying the structure of written output.

use std::collections::HashMap;
use std::io::{Cursor, Write};

use image::codecs::jpeg::JpegEncoder;
use image::{Rgb, RgbImage};
use zip::write::SimpleFileOptions;

// =============================================================================
// Source Material Builders
// =============================================================================

/// Standard DZI descriptor text for the given dimensions.
pub fn dzi_descriptor(width: u32, height: u32) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Image xmlns="http://schemas.microsoft.com/deepzoom/2008"
       TileSize="256"
       Overlap="0"
       Format="jpg">
  <Size Width="{width}" Height="{height}" />
</Image>"#
    )
}

/// Encode a solid-color tile as PNG (lossless, for exact pixel checks).
pub fn png_tile(width: u32, height: u32, color: Rgb<u8>) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, color);
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

/// Encode a solid-color tile as JPEG.
pub fn jpeg_tile(width: u32, height: u32, color: Rgb<u8>) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, color);
    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, 90);
    encoder.encode_image(&img).unwrap();
    buf
}

/// Build an SZI (ZIP) archive holding the given (path, content) entries.
pub fn build_szi(entries: &[(&str, Vec<u8>)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        writer
            .start_file(name.to_string(), SimpleFileOptions::default())
            .unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Check whether `data` looks like a complete JPEG stream.
pub fn is_valid_jpeg(data: &[u8]) -> bool {
    data.len() >= 4
        && data[0] == 0xFF
        && data[1] == 0xD8
        && data[data.len() - 2] == 0xFF
        && data[data.len() - 1] == 0xD9
}

// =============================================================================
// Minimal BigTIFF Reader
// =============================================================================

/// One parsed IFD: tag ID → (field type, count, resolved value bytes).
pub struct ParsedIfd {
    pub entries: HashMap<u16, (u16, u64, Vec<u8>)>,
}

impl ParsedIfd {
    /// Read an unsigned integer tag value (SHORT, LONG, or LONG8).
    pub fn uint(&self, tag: u16) -> Option<u64> {
        let (field_type, _count, data) = self.entries.get(&tag)?;
        match field_type {
            3 => Some(u64::from(u16::from_le_bytes([data[0], data[1]]))),
            4 => Some(u64::from(u32::from_le_bytes([
                data[0], data[1], data[2], data[3],
            ]))),
            16 => Some(read_u64(data, 0)),
            _ => None,
        }
    }

    /// Read a LONG8 array tag value.
    pub fn uint64s(&self, tag: u16) -> Option<Vec<u64>> {
        let (field_type, count, data) = self.entries.get(&tag)?;
        if *field_type != 16 {
            return None;
        }
        Some(
            (0..*count as usize)
                .map(|i| read_u64(data, i * 8))
                .collect(),
        )
    }
}

/// Parsed structure of a written BigTIFF file.
pub struct ParsedTiff {
    pub ifds: Vec<ParsedIfd>,
}

impl ParsedTiff {
    /// Parse the IFD chain of a little-endian BigTIFF byte buffer.
    ///
    /// Panics on malformed structure; these are tests.
    pub fn parse(bytes: &[u8]) -> Self {
        assert_eq!(&bytes[0..2], b"II", "expected little-endian byte order");
        assert_eq!(
            u16::from_le_bytes([bytes[2], bytes[3]]),
            43,
            "expected BigTIFF version"
        );
        assert_eq!(u16::from_le_bytes([bytes[4], bytes[5]]), 8);

        let mut ifds = Vec::new();
        let mut next = read_u64(bytes, 8) as usize;

        while next != 0 {
            let count = read_u64(bytes, next) as usize;
            let mut entries = HashMap::new();

            for i in 0..count {
                let at = next + 8 + i * 20;
                let tag = u16::from_le_bytes([bytes[at], bytes[at + 1]]);
                let field_type = u16::from_le_bytes([bytes[at + 2], bytes[at + 3]]);
                let value_count = read_u64(bytes, at + 4);
                let value_size = field_type_size(field_type) * value_count;

                let data = if value_size <= 8 {
                    bytes[at + 12..at + 12 + value_size as usize].to_vec()
                } else {
                    let offset = read_u64(bytes, at + 12) as usize;
                    bytes[offset..offset + value_size as usize].to_vec()
                };

                entries.insert(tag, (field_type, value_count, data));
            }

            ifds.push(ParsedIfd { entries });
            next = read_u64(bytes, next + 8 + count * 20) as usize;
        }

        ParsedTiff { ifds }
    }

    /// Extract the tile blobs of one IFD as byte vectors.
    pub fn tiles_of(&self, bytes: &[u8], ifd_index: usize) -> Vec<Vec<u8>> {
        let ifd = &self.ifds[ifd_index];
        let offsets = ifd.uint64s(324).expect("TileOffsets");
        let counts = ifd.uint64s(325).expect("TileByteCounts");
        assert_eq!(offsets.len(), counts.len());

        offsets
            .iter()
            .zip(&counts)
            .map(|(&at, &len)| bytes[at as usize..(at + len) as usize].to_vec())
            .collect()
    }
}

fn field_type_size(field_type: u16) -> u64 {
    match field_type {
        1 | 2 | 7 => 1,
        3 => 2,
        4 => 4,
        16 => 8,
        other => panic!("unexpected field type {other}"),
    }
}

fn read_u64(bytes: &[u8], at: usize) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&bytes[at..at + 8]);
    u64::from_le_bytes(buf)
}
