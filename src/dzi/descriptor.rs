//! Deep Zoom descriptor parsing.
//!
//! The descriptor is a small XML file whose `Width` and `Height` attributes
//! give the pixel dimensions of the full-resolution image:
//!
//! ```xml
//! <?xml version="1.0" encoding="UTF-8"?>
//! <Image xmlns="http://schemas.microsoft.com/deepzoom/2008"
//!        TileSize="256" Overlap="0" Format="jpg">
//!   <Size Width="46920" Height="33600" />
//! </Image>
//! ```
//!
//! Only the two dimension attributes matter here, so the parser scans for
//! `Width="<int>"` and `Height="<int>"` anywhere in the text instead of
//! pulling in an XML reader. Absence of either attribute is a fatal input
//! error.

use crate::error::FormatError;

/// Parsed Deep Zoom descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DziDescriptor {
    /// Full-resolution image width in pixels
    pub width: u32,

    /// Full-resolution image height in pixels
    pub height: u32,
}

impl DziDescriptor {
    /// Parse a descriptor from its raw bytes.
    ///
    /// `path` is the descriptor's archive path, used only for diagnostics.
    ///
    /// # Errors
    ///
    /// - [`FormatError::DescriptorNotUtf8`] if the bytes are not UTF-8 text
    /// - [`FormatError::DimensionsMissing`] if either attribute is absent
    /// - [`FormatError::DimensionsInvalid`] if a dimension is zero or does
    ///   not fit in a `u32`
    pub fn parse(path: &str, data: &[u8]) -> Result<Self, FormatError> {
        let text = std::str::from_utf8(data).map_err(|_| FormatError::DescriptorNotUtf8 {
            descriptor: path.to_string(),
        })?;

        let width = find_int_attribute(text, "Width").ok_or_else(|| FormatError::DimensionsMissing {
            descriptor: path.to_string(),
        })?;
        let height =
            find_int_attribute(text, "Height").ok_or_else(|| FormatError::DimensionsMissing {
                descriptor: path.to_string(),
            })?;

        if width == 0 || height == 0 || width > u64::from(u32::MAX) || height > u64::from(u32::MAX)
        {
            return Err(FormatError::DimensionsInvalid {
                descriptor: path.to_string(),
                width,
                height,
            });
        }

        Ok(DziDescriptor {
            width: width as u32,
            height: height as u32,
        })
    }
}

/// Find the first `name="<digits>"` attribute anywhere in `text`.
///
/// The match must start at an attribute boundary, so `Width` does not fire
/// inside a longer name like `TileWidth`. Occurrences whose quoted value
/// is not a plain decimal integer are skipped, and the scan continues
/// after them.
fn find_int_attribute(text: &str, name: &str) -> Option<u64> {
    let pattern = format!("{name}=\"");
    let mut remaining = text;

    while let Some(pos) = remaining.find(&pattern) {
        let at_boundary = remaining[..pos]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_ascii_alphanumeric());

        let value_start = &remaining[pos + pattern.len()..];
        let end = value_start.find('"')?;

        if at_boundary {
            if let Ok(value) = value_start[..end].parse::<u64>() {
                return Some(value);
            }
        }

        remaining = &value_start[end..];
    }

    None
}

// =============================================================================
// Tests
// =============================================================================
