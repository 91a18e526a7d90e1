//! Output format tests.
//!
//! Verifies the JSON and JSON Lines shapes of validation results.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use assert_cmd::Command;
use serde_json::Value;
use xray_gate_test_support::SyntheticImageBuilder;

/// Directory holding one accepted and one rejected image.
fn fixtures() -> tempfile::TempDir {
    let temp_dir = tempfile::tempdir().unwrap();
    SyntheticImageBuilder::radiograph_like(256, 256)
        .image
        .save(temp_dir.path().join("a_chest.png"))
        .unwrap();
    SyntheticImageBuilder::color_photo(256, 256)
        .image
        .save(temp_dir.path().join("b_holiday.png"))
        .unwrap();
    temp_dir
}

fn run(temp_dir: &tempfile::TempDir, args: &[&str]) -> (i32, String) {
    let output = Command::cargo_bin("xray-gate")
        .unwrap()
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .current_dir(temp_dir.path())
        .args(args)
        .arg(temp_dir.path())
        .output()
        .unwrap();
    (
        output.status.code().unwrap(),
        String::from_utf8(output.stdout).unwrap(),
    )
}

// === JSONL ===

#[test]
fn test_jsonl_one_object_per_line() {
    let temp_dir = fixtures();
    let (code, stdout) = run(&temp_dir, &[]);

    assert_eq!(code, 1);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let value: Value = serde_json::from_str(line).unwrap();
        assert!(value.is_object());
    }
}

#[test]
fn test_accepted_result_shape() {
    let temp_dir = fixtures();
    let (_, stdout) = run(&temp_dir, &[]);
    let first: Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();

    assert!(first["path"].as_str().unwrap().ends_with("a_chest.png"));
    assert_eq!(first["dimensions"]["width"], 256);
    assert_eq!(first["dimensions"]["height"], 256);
    assert_eq!(first["verdict"]["status"], "accepted");
    assert!(first.get("message").is_none());
}

#[test]
fn test_rejected_result_shape() {
    let temp_dir = fixtures();
    let (_, stdout) = run(&temp_dir, &[]);
    let second: Value = serde_json::from_str(stdout.lines().nth(1).unwrap()).unwrap();

    assert_eq!(second["verdict"]["status"], "rejected");
    assert_eq!(second["verdict"]["reason"], "not_grayscale_like");
    assert_eq!(second["verdict"]["limit"], 30);
    assert!(second["verdict"]["max_channel_diff"].as_u64().unwrap() > 30);
    assert!(second["message"].is_string());
}

#[test]
fn test_timestamp_is_rfc3339() {
    let temp_dir = fixtures();
    let (_, stdout) = run(&temp_dir, &[]);
    let first: Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();

    let ts = first["timestamp"].as_str().unwrap();
    assert!(
        time::OffsetDateTime::parse(ts, &time::format_description::well_known::Rfc3339).is_ok(),
        "{ts}"
    );
}

#[test]
fn test_decode_failure_has_no_dimensions() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("corrupt.png"), b"not an image").unwrap();

    let (code, stdout) = run(&temp_dir, &[]);
    let value: Value = serde_json::from_str(stdout.trim()).unwrap();

    assert_eq!(code, 1);
    assert_eq!(value["verdict"]["reason"], "decode_or_format_error");
    assert!(value["verdict"]["detail"].is_string());
    assert!(value.get("dimensions").is_none());
}

// === JSON ===

#[test]
fn test_json_format_is_array() {
    let temp_dir = fixtures();
    let (_, stdout) = run(&temp_dir, &["--format", "json"]);

    let value: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value.as_array().unwrap().len(), 2);
}

#[test]
fn test_json_format_empty_array_for_no_images() {
    let temp_dir = tempfile::tempdir().unwrap();
    let (code, stdout) = run(&temp_dir, &["--format", "json"]);

    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "[]");
}

#[test]
fn test_pretty_format_is_indented() {
    let temp_dir = fixtures();
    let (_, stdout) = run(&temp_dir, &["--format", "json", "--pretty"]);

    assert!(stdout.lines().count() > 2);
    assert!(stdout.contains("\n  {"));
}

#[test]
fn test_non_pretty_format_is_compact() {
    let temp_dir = fixtures();
    let (_, stdout) = run(&temp_dir, &["--format", "json"]);

    assert_eq!(stdout.lines().count(), 1);
}
