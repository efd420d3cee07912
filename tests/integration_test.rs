use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use image::{GenericImageView, ImageReader, Rgb, RgbImage};
use tempfile::TempDir;

fn run_cli(work_dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_corner-mask-rs"))
        .current_dir(work_dir)
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("failed to run binary")
}

#[test]
fn test_missing_argument_exits_with_usage() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_cli(temp_dir.path(), &["out", "64"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage:"), "stderr: {stderr}");
    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn test_non_numeric_size_exits_with_usage() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_cli(temp_dir.path(), &["out", "big", "10"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn test_help_exits_successfully() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_cli(temp_dir.path(), &["--help"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stdout).contains("BORDER_RADIUS"));
}

#[test]
fn test_cli_processes_original_directory() {
    let temp_dir = TempDir::new().unwrap();
    let input_dir = temp_dir.path().join("original");
    fs::create_dir_all(&input_dir).unwrap();
    RgbImage::from_pixel(100, 50, Rgb([200, 10, 10]))
        .save(input_dir.join("a.png"))
        .unwrap();
    RgbImage::from_pixel(200, 200, Rgb([10, 200, 10]))
        .save(input_dir.join("b.jpg"))
        .unwrap();
    fs::write(input_dir.join("broken.png"), b"corrupt").unwrap();
    fs::write(input_dir.join("readme.txt"), b"skip me").unwrap();

    let output = run_cli(temp_dir.path(), &["icons/rounded", "64", "10"]);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stdout.contains("Processed: icons/rounded/a.png"), "stdout: {stdout}");
    assert!(stdout.contains("Processed: icons/rounded/b.jpg"), "stdout: {stdout}");
    assert!(stdout.trim_end().ends_with("All images processed."), "stdout: {stdout}");
    assert!(stderr.contains("Failed to process"), "stderr: {stderr}");
    assert!(stderr.contains("broken.png"), "stderr: {stderr}");
    assert!(!stderr.contains("readme.txt"), "stderr: {stderr}");

    let output_dir = temp_dir.path().join("icons").join("rounded");
    for name in ["a.png", "b.jpg"] {
        let image = ImageReader::open(output_dir.join(name))
            .unwrap()
            .with_guessed_format()
            .unwrap()
            .decode()
            .unwrap();
        assert_eq!(image.dimensions(), (64, 64));
        assert_eq!(image.get_pixel(0, 0)[3], 0);
        assert_eq!(image.get_pixel(32, 32)[3], 255);
    }
    assert!(!output_dir.join("broken.png").exists());
}

#[test]
fn test_missing_original_directory_still_exits_zero() {
    let temp_dir = TempDir::new().unwrap();

    let output = run_cli(temp_dir.path(), &["out", "32", "4"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(temp_dir.path().join("out").is_dir());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error processing images"), "stderr: {stderr}");
}
