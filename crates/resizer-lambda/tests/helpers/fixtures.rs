//! Test fixtures: encoded images and corrupt blobs.

use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

/// PNG with an alpha channel of the given dimensions.
pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 128, 200])
    });
    encode(DynamicImage::ImageRgba8(img), ImageFormat::Png)
}

/// Baseline JPEG of the given dimensions.
pub fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([10, 120, 230]));
    encode(DynamicImage::ImageRgb8(img), ImageFormat::Jpeg)
}

/// Bytes that start like a PNG but cannot be decoded.
pub fn create_corrupt_png() -> Vec<u8> {
    let mut data = create_test_png(16, 16);
    data.truncate(40);
    data
}

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)
        .expect("Failed to encode fixture image");
    buffer
}
