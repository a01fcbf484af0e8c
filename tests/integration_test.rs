//! Integration tests for the extraction pipeline

mod common;

use std::fs;

use common::{directory_contents, source_pixel, write_fixture, MALFORMED_XML, PAGE_XML};
use segregs::{ExtractionConfig, Granularity, SegError, Segregs};

fn config(granularity: Granularity, workers: usize) -> ExtractionConfig {
    ExtractionConfig {
        granularity,
        workers,
        ..ExtractionConfig::default()
    }
}

#[test]
fn test_region_mode_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let (xml, image) = write_fixture(dir.path(), PAGE_XML);
    let prefix = dir.path().join("out").join("page");

    let segregs = Segregs::new(config(Granularity::Region, 2)).unwrap();
    let summary = segregs.extract(&xml, &image, &prefix).unwrap();

    assert_eq!(summary.candidates, 3);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.written.len(), 2);

    let out = dir.path().join("out");
    let names: Vec<String> = directory_contents(&out).into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec![
        "page_r1.gt.txt", "page_r1.json", "page_r1.png",
        "page_r2.gt.txt", "page_r2.json", "page_r2.png",
    ]);

    assert_eq!(fs::read_to_string(out.join("page_r1.gt.txt")).unwrap(), "first line\nsecond line\n");

    let raw = fs::read_to_string(out.join("page_r2.json")).unwrap();
    assert!(raw.ends_with('\n'));
    let record: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(record["Index"], 2);
    assert_eq!(record["id"], "r2");
    assert_eq!(record["type"], "heading");
    assert_eq!(record["Text"], "slanted");
    assert_eq!(record["Coordinates"].as_array().unwrap().len(), 3);
    assert_eq!(record["Coordinates"][1], serde_json::json!({"X": 90, "Y": 50}));
    assert!(record["Image"].as_str().unwrap().ends_with("page_r2.png"));
}

#[test]
fn test_region_crop_is_masked() {
    let dir = tempfile::tempdir().unwrap();
    let (xml, image) = write_fixture(dir.path(), PAGE_XML);
    let prefix = dir.path().join("page");

    Segregs::new(config(Granularity::Region, 1)).unwrap().extract(&xml, &image, &prefix).unwrap();

    let crop = image::open(dir.path().join("page_r2.png")).unwrap().to_rgba8();
    assert_eq!(crop.dimensions(), (80, 40));
    // crop origin is (10,50)
    assert_eq!(*crop.get_pixel(1, 1), source_pixel(11, 51));
    assert_eq!(*crop.get_pixel(79, 39), image::Rgba([255, 255, 255, 255]));
}

#[test]
fn test_line_mode_outputs() {
    let dir = tempfile::tempdir().unwrap();
    let (xml, image) = write_fixture(dir.path(), PAGE_XML);
    let out = dir.path().join("lines");

    let config = ExtractionConfig { padding: 2, ..config(Granularity::Line, 3) };
    let summary = Segregs::new(config).unwrap().extract(&xml, &image, &out).unwrap();

    assert_eq!(summary.written.len(), 3);
    let names: Vec<String> = directory_contents(&out).into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec![
        "00001.gt.txt", "00001.png",
        "00002.gt.txt", "00002.png",
        "00003.gt.txt", "00003.png",
    ]);
    assert_eq!(fs::read_to_string(out.join("00002.gt.txt")).unwrap(), "second line\n");

    let first = image::open(out.join("00001.png")).unwrap();
    assert_eq!((first.width(), first.height()), (100, 16));
}

#[test]
fn test_worker_count_does_not_change_output() {
    let dir = tempfile::tempdir().unwrap();
    let (xml, image) = write_fixture(dir.path(), PAGE_XML);

    let single = dir.path().join("single");
    let pooled = dir.path().join("pooled");
    Segregs::new(config(Granularity::Line, 1)).unwrap().extract(&xml, &image, &single).unwrap();
    Segregs::new(config(Granularity::Line, 4)).unwrap().extract(&xml, &image, &pooled).unwrap();

    assert_eq!(directory_contents(&single), directory_contents(&pooled));
}

#[test]
fn test_rerun_overwrites_identically() {
    let dir = tempfile::tempdir().unwrap();
    let (xml, image) = write_fixture(dir.path(), PAGE_XML);
    let prefix = dir.path().join("out").join("page");
    let segregs = Segregs::new(config(Granularity::Region, 2)).unwrap();

    segregs.extract(&xml, &image, &prefix).unwrap();
    let first = directory_contents(&dir.path().join("out"));
    segregs.extract(&xml, &image, &prefix).unwrap();

    assert_eq!(first, directory_contents(&dir.path().join("out")));
}

#[test]
fn test_malformed_coordinates_abort_before_writing() {
    let dir = tempfile::tempdir().unwrap();
    let (xml, image) = write_fixture(dir.path(), MALFORMED_XML);
    let prefix = dir.path().join("out").join("page");

    let result = Segregs::new(config(Granularity::Region, 2)).unwrap().extract(&xml, &image, &prefix);

    assert!(matches!(result, Err(SegError::Format(_))));
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_missing_image_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let (xml, _) = write_fixture(dir.path(), PAGE_XML);

    let result = Segregs::new(config(Granularity::Region, 1))
        .unwrap()
        .extract(&xml, &dir.path().join("missing.png"), &dir.path().join("page"));

    assert!(matches!(result, Err(SegError::Io(_))));
}

#[test]
fn test_read_regions_and_rasterize() {
    let dir = tempfile::tempdir().unwrap();
    let (xml, image_path) = write_fixture(dir.path(), PAGE_XML);
    let segregs = Segregs::new(ExtractionConfig { padding: 200, ..config(Granularity::Region, 1) }).unwrap();

    let regions = segregs.read_regions(&xml).unwrap();
    let image = segregs.load_image(&image_path).unwrap();
    let crop = segregs.rasterize(&image, &regions.descriptors[0]).unwrap();

    assert_eq!(segregs.config().padding, 200);
    // padding is clamped to the page
    assert_eq!(crop.dimensions(), (120, 100));
}

#[test]
fn test_run_log_file() {
    let dir = tempfile::tempdir().unwrap();
    let (xml, image) = write_fixture(dir.path(), PAGE_XML);
    let log_path = dir.path().join("run.log");

    Segregs::new(config(Granularity::Region, 2))
        .unwrap()
        .with_log_file(&log_path)
        .unwrap()
        .extract(&xml, &image, &dir.path().join("page"))
        .unwrap();

    let log = fs::read_to_string(&log_path).unwrap();
    let mut lines: Vec<&str> = log.lines().collect();
    lines.sort();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("1\tr1\t"));
    assert!(lines[1].starts_with("2\tr2\t"));
}

#[test]
fn test_invalid_config_rejected() {
    let result = Segregs::new(config(Granularity::Region, 0));
    assert!(matches!(result, Err(SegError::Config(_))));
}
