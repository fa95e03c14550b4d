use assert_cmd::Command;
use image::{Rgba, RgbaImage};
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

// A dark image with a bright vertical stripe near its right edge.
fn striped(dir: &Path, width: u32, height: u32) -> std::path::PathBuf {
    let image = RgbaImage::from_fn(width, height, |x, _| {
        if x == width - 3 {
            Rgba([240, 240, 240, 255])
        } else {
            Rgba([30, 30, 30, 255])
        }
    });
    let path = dir.join("striped.png");
    image.save(&path).unwrap();
    path
}

#[test]
fn narrows_to_requested_width() {
    let dir = TempDir::new().unwrap();
    let input = striped(dir.path(), 12, 8);
    let output = dir.path().join("out.png");

    Command::cargo_bin("seamshrink")
        .unwrap()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("-w")
        .arg("9")
        .assert()
        .success();

    let carved = image::open(&output).unwrap().to_rgba8();
    assert_eq!(carved.dimensions(), (9, 8));
    let stripe = (0..9)
        .filter(|&x| carved.get_pixel(x, 0)[0] == 240)
        .count();
    assert_eq!(stripe, 1);
}

#[test]
fn defaults_to_eighty_percent() {
    let dir = TempDir::new().unwrap();
    let input = striped(dir.path(), 10, 4);
    let output = dir.path().join("out.png");

    Command::cargo_bin("seamshrink")
        .unwrap()
        .arg(&input)
        .arg("--output")
        .arg(&output)
        .arg("--strategy")
        .arg("trim")
        .assert()
        .success();

    assert_eq!(image::open(&output).unwrap().to_rgba8().dimensions(), (8, 4));
}

#[test]
fn writes_energy_map_and_frames() {
    let dir = TempDir::new().unwrap();
    let input = striped(dir.path(), 10, 5);
    let output = dir.path().join("out.png");
    let energy = dir.path().join("energy.png");
    let frames = dir.path().join("frames");

    Command::cargo_bin("seamshrink")
        .unwrap()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("-p")
        .arg("70")
        .arg("--energy")
        .arg(&energy)
        .arg("--frames")
        .arg(&frames)
        .assert()
        .success();

    let map = image::open(&energy).unwrap().to_luma8();
    assert_eq!(map.dimensions(), (10, 5));
    assert!(map.pixels().any(|p| p[0] == 255));
    for n in 1..=3 {
        let frame = frames.join(format!("frame-{:04}.png", n));
        let frame = image::open(&frame).unwrap().to_rgba8();
        assert_eq!(frame.width(), 10 - n);
    }
    assert!(!frames.join("frame-0004.png").exists());
}

#[test]
fn zero_width_is_refused() {
    let dir = TempDir::new().unwrap();
    let input = striped(dir.path(), 6, 3);
    let output = dir.path().join("out.png");

    Command::cargo_bin("seamshrink")
        .unwrap()
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .arg("-w")
        .arg("0")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot carve from width 6 to width 0"));

    assert!(!output.exists());
}

#[test]
fn missing_input_fails() {
    let dir = TempDir::new().unwrap();
    Command::cargo_bin("seamshrink")
        .unwrap()
        .arg(dir.path().join("nope.png"))
        .arg("-o")
        .arg(dir.path().join("out.png"))
        .assert()
        .failure();
}
