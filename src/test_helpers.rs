//! Shared test utilities for the kaleidogif test suite.
//!
//! Writes small real photographs to disk so the decoding backend and the
//! full pipeline can be exercised without checked-in fixtures.

use image::{ImageFormat, Rgb, RgbImage};
use std::path::Path;
use tempfile::TempDir;

/// Write a `width x height` JPEG with a smooth gradient to `path`.
pub fn write_test_jpeg(path: &Path, width: u32, height: u32) {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    });
    img.save_with_format(path, ImageFormat::Jpeg).unwrap();
}

/// Write a single-color JPEG to `path`.
pub fn write_solid_jpeg(path: &Path, width: u32, height: u32, rgb: [u8; 3]) {
    RgbImage::from_pixel(width, height, Rgb(rgb))
        .save_with_format(path, ImageFormat::Jpeg)
        .unwrap();
}

/// Temp directory holding one solid JPEG per `(name, color)`, all the same size.
pub fn solid_frames_dir(width: u32, height: u32, frames: &[(&str, [u8; 3])]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (name, rgb) in frames {
        write_solid_jpeg(&tmp.path().join(name), width, height, *rgb);
    }
    tmp
}

#[test]
fn solid_frames_dir_writes_every_frame() {
    let tmp = solid_frames_dir(8, 6, &[("a.jpg", [1, 2, 3]), ("b.jpg", [4, 5, 6])]);
    assert!(tmp.path().join("a.jpg").is_file());
    assert!(tmp.path().join("b.jpg").is_file());
}
