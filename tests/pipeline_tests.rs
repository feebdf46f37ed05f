//! End-to-end tests for the extraction pipeline through the library API.
//!
//! Sheets are generated in memory, written to a temp directory, and run
//! through load → segment → write exactly as the CLI does.

use image::{Rgba, RgbaImage};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use spritecut::extract::extract_to_dir;
use spritecut::source::load_sheet;
use spritecut::{
    segment, write_all, Connectivity, DirectorySink, ExtractConfig, MemorySink, Region,
};

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// A 32x16 sheet with three sprites: a solid square, an L-shape joined at a
/// diagonal, and a single semi-transparent pixel.
fn sample_sheet() -> RgbaImage {
    let mut img = RgbaImage::from_pixel(32, 16, BLACK);

    // 4x4 square at (2, 2), with a gradient so crops are distinguishable
    for y in 2..6 {
        for x in 2..6 {
            img.put_pixel(x, y, Rgba([40 * x as u8, 30 * y as u8, 200, 255]));
        }
    }

    // L-shape: vertical bar at x=12, y=2..7, foot from (13, 8) to (17, 8)
    for y in 2..8 {
        img.put_pixel(12, y, Rgba([0, 220, 0, 255]));
    }
    for x in 13..18 {
        img.put_pixel(x, 8, Rgba([0, 220, 0, 255]));
    }

    // Lone pixel
    img.put_pixel(28, 13, Rgba([250, 250, 0, 90]));

    img
}

/// SHA-256 of every file in `dir`, keyed by file name.
fn digest_dir(dir: &Path) -> BTreeMap<String, String> {
    fs::read_dir(dir)
        .expect("should read output dir")
        .map(|entry| {
            let path = entry.expect("dir entry").path();
            let bytes = fs::read(&path).expect("should read output file");
            let digest = Sha256::digest(&bytes);
            let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
            (path.file_name().unwrap().to_string_lossy().into_owned(), hex)
        })
        .collect()
}

#[test]
fn test_files_written_equals_component_count() {
    let temp = TempDir::new().expect("should create temp dir");
    let sheet = sample_sheet();
    let config = ExtractConfig::default();

    let segmentation = segment(&sheet, &config).expect("should segment");
    assert_eq!(segmentation.components, 3);

    let out = temp.path().join("icons_detected");
    let written = extract_to_dir(&sheet, &config, &out, "icon_").expect("should extract");
    assert_eq!(written, segmentation.components as usize);
    assert_eq!(fs::read_dir(&out).unwrap().count(), written);

    for i in 0..written {
        assert!(out.join(format!("icon_{}.png", i)).exists(), "missing icon_{}.png", i);
    }
}

#[test]
fn test_l_shape_is_one_sprite_under_eight_connectivity() {
    let sheet = sample_sheet();
    let eight = segment(&sheet, &ExtractConfig::default()).unwrap();
    let l_shape = eight.regions.iter().find(|r| r.x1 == 12).expect("L-shape region");
    assert_eq!((l_shape.x1, l_shape.y1, l_shape.x2, l_shape.y2), (12, 2, 18, 9));
    assert_eq!(l_shape.area, 11);

    let four = segment(
        &sheet,
        &ExtractConfig { connectivity: Connectivity::Four, ..Default::default() },
    )
    .unwrap();
    assert_eq!(four.components, 4, "diagonal junction splits under 4-connectivity");
}

#[test]
fn test_black_sheet_writes_nothing_but_creates_dir() {
    let temp = TempDir::new().expect("should create temp dir");
    let out = temp.path().join("out");
    let sheet = RgbaImage::from_pixel(16, 16, Rgba([20, 20, 20, 255]));

    let written = extract_to_dir(&sheet, &ExtractConfig::default(), &out, "icon_").unwrap();
    assert_eq!(written, 0);
    assert!(out.is_dir());
    assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
}

#[test]
fn test_ring_separated_sprites_do_not_overlap() {
    let mut sheet = RgbaImage::from_pixel(12, 12, BLACK);
    for (x0, y0) in [(1, 1), (6, 6)] {
        for y in y0..y0 + 4 {
            for x in x0..x0 + 4 {
                sheet.put_pixel(x, y, Rgba([255, 0, 0, 255]));
            }
        }
    }
    let regions: Vec<Region> = segment(&sheet, &ExtractConfig::default()).unwrap().regions;
    assert_eq!(regions.len(), 2);
    assert!(!regions[0].overlaps(&regions[1]));
}

#[test]
fn test_written_pngs_match_source_pixels() {
    let temp = TempDir::new().expect("should create temp dir");
    let sheet_path = temp.path().join("sheet.png");
    sample_sheet().save(&sheet_path).expect("should save sheet");

    let sheet = load_sheet(&sheet_path).expect("should load sheet");
    let segmentation = segment(&sheet, &ExtractConfig::default()).unwrap();
    let out = temp.path().join("icons");
    let mut sink = DirectorySink::create(&out, "icon_").unwrap();
    write_all(segmentation.sprites(&sheet), &mut sink).unwrap();

    for (index, region) in segmentation.regions.iter().enumerate() {
        let crop = image::open(&sink.written()[index]).unwrap().to_rgba8();
        assert_eq!(crop.dimensions(), (region.width(), region.height()));
        for (x, y, px) in crop.enumerate_pixels() {
            assert_eq!(px, sheet.get_pixel(region.x1 + x, region.y1 + y));
        }
    }
}

#[test]
fn test_memory_sink_matches_directory_sink() {
    let temp = TempDir::new().expect("should create temp dir");
    let sheet = sample_sheet();
    let segmentation = segment(&sheet, &ExtractConfig::default()).unwrap();

    let mut memory = MemorySink::default();
    let mut dir = DirectorySink::create(temp.path(), "icon_").unwrap();
    assert_eq!(write_all(segmentation.sprites(&sheet), &mut memory).unwrap(), 3);
    assert_eq!(write_all(segmentation.sprites(&sheet), &mut dir).unwrap(), 3);

    for (sprite, path) in memory.images.iter().zip(dir.written()) {
        assert_eq!(sprite, &image::open(path).unwrap().to_rgba8());
    }
}

#[test]
fn test_two_runs_produce_identical_files() {
    let sheet = sample_sheet();
    let config = ExtractConfig::default();

    let first = TempDir::new().expect("should create temp dir");
    let second = TempDir::new().expect("should create temp dir");
    extract_to_dir(&sheet, &config, first.path(), "icon_").unwrap();
    extract_to_dir(&sheet, &config, second.path(), "icon_").unwrap();

    let a = digest_dir(first.path());
    let b = digest_dir(second.path());
    assert_eq!(a.len(), 3);
    assert_eq!(a, b);
}

#[test]
fn test_unwritable_output_is_an_error() {
    let temp = TempDir::new().expect("should create temp dir");
    // A regular file where the output directory should go
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, b"not a dir").unwrap();

    let result =
        extract_to_dir(&sample_sheet(), &ExtractConfig::default(), &blocker.join("out"), "icon_");
    assert!(result.is_err());
}
