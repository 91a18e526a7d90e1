//! Integration tests for raster image loading.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::{Path, PathBuf};

use xray_gate_adapters::{load_image, FsImageSource};
use xray_gate_core::ImageSource;
use xray_gate_test_support::SyntheticImageBuilder;

const FORMATS: &[&str] = &["jpg", "png", "bmp", "gif", "tiff", "webp"];

/// Writes an 8x8 RGB image per format into `dir`.
fn write_fixtures(dir: &Path) -> Vec<PathBuf> {
    let info = SyntheticImageBuilder::rgb_radiograph_like(8, 8);
    FORMATS
        .iter()
        .map(|ext| {
            let path = dir.join(format!("test.{ext}"));
            info.image.save(&path).unwrap();
            path
        })
        .collect()
}

#[test]
fn test_load_each_format() {
    let dir = tempfile::tempdir().unwrap();

    for path in write_fixtures(dir.path()) {
        let source = FsImageSource::new(vec![path.clone()], false);
        let items: Vec<_> = source.images().collect();
        assert_eq!(items.len(), 1);

        let item = items.into_iter().next().unwrap();
        assert_eq!(item.path, path.to_string_lossy());
        let info = item
            .image
            .unwrap_or_else(|e| panic!("{}: {e:#}", path.display()));
        assert_eq!((info.width, info.height), (8, 8));
    }
}

#[test]
fn test_load_directory_in_path_order() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let source = FsImageSource::new(vec![dir.path().to_path_buf()], false);
    let paths: Vec<String> = source.images().map(|item| item.path).collect();

    assert_eq!(paths.len(), FORMATS.len());
    let mut sorted = paths.clone();
    sorted.sort();
    assert_eq!(paths, sorted);
}

#[test]
fn test_count_hint() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let source = FsImageSource::new(vec![dir.path().to_path_buf()], false);
    assert_eq!(source.count_hint(), Some(FORMATS.len()));
}

#[test]
fn test_recursion_is_opt_in() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("train/NORMAL");
    std::fs::create_dir_all(&nested).unwrap();
    SyntheticImageBuilder::radiograph_like(8, 8)
        .image
        .save(nested.join("a.png"))
        .unwrap();

    let flat = FsImageSource::new(vec![dir.path().to_path_buf()], false);
    let deep = FsImageSource::new(vec![dir.path().to_path_buf()], true);

    assert_eq!(flat.count_hint(), Some(0));
    assert_eq!(deep.count_hint(), Some(1));
}

#[test]
fn test_named_missing_and_unsupported_paths_fail_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let text = dir.path().join("report.txt");
    std::fs::write(&text, "not an image").unwrap();
    let absent = dir.path().join("absent.png");

    let source = FsImageSource::new(vec![text.clone(), absent.clone()], false);
    assert_eq!(source.count_hint(), Some(2));

    let items: Vec<_> = source.images().collect();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].path, text.to_string_lossy());
    assert_eq!(items[1].path, absent.to_string_lossy());

    let unsupported = items[0].image.as_ref().err().unwrap();
    assert!(unsupported.to_string().contains("Unsupported file type"));
    let missing = items[1].image.as_ref().err().unwrap();
    assert!(missing.to_string().contains("does not exist"));
}

#[test]
fn test_file_list_is_collected_once() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());

    let source = FsImageSource::new(vec![dir.path().to_path_buf()], false);
    std::fs::write(dir.path().join("late.png"), b"added after construction").unwrap();

    assert_eq!(source.count_hint(), Some(FORMATS.len()));
    assert_eq!(source.images().count(), FORMATS.len());
}

#[test]
fn test_corrupt_file_keeps_its_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"\x89PNG but not really").unwrap();

    let source = FsImageSource::new(vec![path.clone()], false);
    let item = source.images().next().unwrap();

    assert_eq!(item.path, path.to_string_lossy());
    assert!(item.image.is_err());
}

#[test]
fn test_format_sniffed_from_content() {
    let dir = tempfile::tempdir().unwrap();
    let png = dir.path().join("scan.png");
    let misnamed = dir.path().join("scan.jpg");
    SyntheticImageBuilder::radiograph_like(8, 8)
        .image
        .save(&png)
        .unwrap();
    std::fs::rename(&png, &misnamed).unwrap();

    let info = load_image(&misnamed).expect("content decides the format");
    assert_eq!((info.width, info.height), (8, 8));
}
