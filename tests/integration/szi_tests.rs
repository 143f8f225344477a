//! End-to-end tests for the SZI conversion path.

use image::Rgb;
use std::path::PathBuf;

use wsi_convert::{convert_szi, ConvertError, FormatError, LayoutError};

use super::test_utils::{build_szi, dzi_descriptor, is_valid_jpeg, jpeg_tile, png_tile, ParsedTiff};

const RED: Rgb<u8> = Rgb([255, 0, 0]);
const GREEN: Rgb<u8> = Rgb([0, 255, 0]);
const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Write an archive to disk and return (input path, output path, tempdir).
fn stage_archive(archive: Vec<u8>) -> (PathBuf, PathBuf, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("slide.szi");
    let output = dir.path().join("slide.svs");
    std::fs::write(&input, archive).unwrap();
    (input, output, dir)
}

fn four_tile_archive(width: u32, height: u32) -> Vec<u8> {
    build_szi(&[
        (
            "scan/slide.dzi",
            dzi_descriptor(width, height).into_bytes(),
        ),
        ("scan/slide_files/9/0_0.jpg", jpeg_tile(256, 256, RED)),
        ("scan/slide_files/9/1_0.jpg", jpeg_tile(256, 256, GREEN)),
        ("scan/slide_files/9/0_1.jpg", jpeg_tile(256, 256, BLUE)),
        ("scan/slide_files/9/1_1.jpg", jpeg_tile(256, 256, WHITE)),
    ])
}

#[test]
fn test_szi_conversion_produces_valid_pyramid() {
    let (input, output, _dir) = stage_archive(four_tile_archive(512, 512));

    convert_szi(&input, &output).unwrap();

    let bytes = std::fs::read(&output).unwrap();
    let tiff = ParsedTiff::parse(&bytes);

    // 512x512 halves once to 256x256, which fits a single tile: two levels.
    assert_eq!(tiff.ifds.len(), 2);
    assert_eq!(tiff.ifds[0].uint(256), Some(512)); // ImageWidth
    assert_eq!(tiff.ifds[0].uint(257), Some(512)); // ImageLength
    assert_eq!(tiff.ifds[1].uint(256), Some(256));
    assert_eq!(tiff.ifds[1].uint(257), Some(256));

    // Fixed output profile.
    assert_eq!(tiff.ifds[0].uint(259), Some(7)); // JPEG compression
    assert_eq!(tiff.ifds[0].uint(322), Some(256)); // TileWidth
    assert_eq!(tiff.ifds[0].uint(323), Some(256)); // TileLength
    assert_eq!(tiff.ifds[0].uint(277), Some(3)); // SamplesPerPixel

    // Level 0 is the base image, reduced levels are flagged.
    assert_eq!(tiff.ifds[0].uint(254), None);
    assert_eq!(tiff.ifds[1].uint(254), Some(1));

    // Four tiles at level 0, one at level 1, all complete JPEG streams.
    let base_tiles = tiff.tiles_of(&bytes, 0);
    assert_eq!(base_tiles.len(), 4);
    for tile in &base_tiles {
        assert!(is_valid_jpeg(tile));
    }
    assert_eq!(tiff.tiles_of(&bytes, 1).len(), 1);
}

#[test]
fn test_szi_tile_pixels_survive_roundtrip() {
    let (input, output, _dir) = stage_archive(four_tile_archive(512, 512));

    convert_szi(&input, &output).unwrap();

    let bytes = std::fs::read(&output).unwrap();
    let tiff = ParsedTiff::parse(&bytes);
    let base_tiles = tiff.tiles_of(&bytes, 0);

    // Tiles are written row-major: (0,0), (1,0), (0,1), (1,1).
    let expectations: [Rgb<u8>; 4] = [RED, GREEN, BLUE, WHITE];
    for (tile, expected) in base_tiles.iter().zip(&expectations) {
        let decoded = image::load_from_memory(tile).unwrap().to_rgb8();
        assert_eq!((decoded.width(), decoded.height()), (256, 256));

        let center = decoded.get_pixel(128, 128);
        for channel in 0..3 {
            let delta = i32::from(center[channel]) - i32::from(expected[channel]);
            assert!(
                delta.abs() <= 16,
                "channel {channel} off by {delta} after JPEG roundtrip"
            );
        }
    }
}

#[test]
fn test_szi_non_multiple_dimensions_are_clipped() {
    // Descriptor declares 300x300 with a full 2x2 grid of 256px tiles:
    // the canvas must stay 300x300 and tile content past it is clipped.
    let (input, output, _dir) = stage_archive(four_tile_archive(300, 300));

    convert_szi(&input, &output).unwrap();

    let bytes = std::fs::read(&output).unwrap();
    let tiff = ParsedTiff::parse(&bytes);

    assert_eq!(tiff.ifds[0].uint(256), Some(300));
    assert_eq!(tiff.ifds[0].uint(257), Some(300));
    // 300px still needs a 2x2 grid of 256px output tiles.
    assert_eq!(tiff.tiles_of(&bytes, 0).len(), 4);
    // 300 halves to 150, which fits one tile: exactly two levels.
    assert_eq!(tiff.ifds.len(), 2);
    assert_eq!(tiff.ifds[1].uint(256), Some(150));
}

#[test]
fn test_szi_selects_deepest_level() {
    // A lower-resolution level 3 exists alongside level 9; the converter
    // must stitch level 9 (one blue tile), not the level-3 red one.
    let archive = build_szi(&[
        ("scan/slide.dzi", dzi_descriptor(200, 200).into_bytes()),
        ("scan/slide_files/3/0_0.png", png_tile(50, 50, RED)),
        ("scan/slide_files/9/0_0.png", png_tile(200, 200, BLUE)),
    ]);
    let (input, output, _dir) = stage_archive(archive);

    convert_szi(&input, &output).unwrap();

    let bytes = std::fs::read(&output).unwrap();
    let tiff = ParsedTiff::parse(&bytes);
    let tile = &tiff.tiles_of(&bytes, 0)[0];
    let decoded = image::load_from_memory(tile).unwrap().to_rgb8();

    let center = decoded.get_pixel(100, 100);
    assert!(center[2] > 200, "level 9 (blue) content expected");
    assert!(center[0] < 50, "level 3 (red) content must not appear");
}

#[test]
fn test_szi_missing_descriptor_creates_no_output() {
    let archive = build_szi(&[(
        "scan/slide_files/9/0_0.jpg",
        jpeg_tile(256, 256, RED),
    )]);
    let (input, output, _dir) = stage_archive(archive);

    let result = convert_szi(&input, &output);

    assert!(matches!(
        result,
        Err(ConvertError::Layout(LayoutError::DescriptorMissing))
    ));
    assert!(!output.exists(), "no output file on failure");
}

#[test]
fn test_szi_ambiguous_descriptor_rejected() {
    let archive = build_szi(&[
        ("scan/a.dzi", dzi_descriptor(512, 512).into_bytes()),
        ("scan/b.dzi", dzi_descriptor(512, 512).into_bytes()),
        ("scan/a_files/9/0_0.jpg", jpeg_tile(256, 256, RED)),
    ]);
    let (input, output, _dir) = stage_archive(archive);

    let result = convert_szi(&input, &output);

    assert!(matches!(
        result,
        Err(ConvertError::Layout(LayoutError::DescriptorAmbiguous { .. }))
    ));
    assert!(!output.exists());
}

#[test]
fn test_szi_empty_level_creates_no_output() {
    // The level directory exists but holds nothing matching the tile
    // naming convention.
    let archive = build_szi(&[
        ("scan/slide.dzi", dzi_descriptor(512, 512).into_bytes()),
        ("scan/slide_files/9/preview.jpg", jpeg_tile(64, 64, RED)),
    ]);
    let (input, output, _dir) = stage_archive(archive);

    let result = convert_szi(&input, &output);

    assert!(matches!(
        result,
        Err(ConvertError::Layout(LayoutError::NoTiles { .. }))
    ));
    assert!(!output.exists());
}

#[test]
fn test_szi_undecodable_tile_rejected() {
    let archive = build_szi(&[
        ("scan/slide.dzi", dzi_descriptor(256, 256).into_bytes()),
        ("scan/slide_files/9/0_0.jpg", b"corrupt".to_vec()),
    ]);
    let (input, output, _dir) = stage_archive(archive);

    let result = convert_szi(&input, &output);

    assert!(matches!(
        result,
        Err(ConvertError::Format(FormatError::TileDecode { .. }))
    ));
    assert!(!output.exists());
}

#[test]
fn test_szi_gaps_yield_black_regions() {
    // Only the (0,0) tile of a 2x2 grid is present; the missing quadrants
    // must come out black in the encoded output.
    let archive = build_szi(&[
        ("scan/slide.dzi", dzi_descriptor(512, 512).into_bytes()),
        ("scan/slide_files/9/0_0.png", png_tile(256, 256, WHITE)),
    ]);
    let (input, output, _dir) = stage_archive(archive);

    convert_szi(&input, &output).unwrap();

    let bytes = std::fs::read(&output).unwrap();
    let tiff = ParsedTiff::parse(&bytes);
    let base_tiles = tiff.tiles_of(&bytes, 0);
    assert_eq!(base_tiles.len(), 4);

    let covered = image::load_from_memory(&base_tiles[0]).unwrap().to_rgb8();
    assert!(covered.get_pixel(128, 128)[0] > 200);

    // Tile (1,1) of the output grid had no source tile.
    let gap = image::load_from_memory(&base_tiles[3]).unwrap().to_rgb8();
    let p = gap.get_pixel(128, 128);
    assert!(p[0] < 16 && p[1] < 16 && p[2] < 16);
}

#[test]
fn test_szi_conversion_is_idempotent() {
    let (input, output, dir) = stage_archive(four_tile_archive(512, 512));
    let second_output = dir.path().join("again.svs");

    convert_szi(&input, &output).unwrap();
    convert_szi(&input, &second_output).unwrap();

    let first = std::fs::read(&output).unwrap();
    let second = std::fs::read(&second_output).unwrap();
    assert_eq!(first, second, "repeated runs must produce identical bytes");
}
