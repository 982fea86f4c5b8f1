use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};

/// Largest width or height a baseline JPEG can encode.
pub const MAX_JPEG_DIMENSION: u32 = u16::MAX as u32;

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Target dimensions for a fixed width: height follows the aspect ratio
    /// and never drops below one pixel.
    pub fn calculate_dimensions(orig_width: u32, orig_height: u32, width: u32) -> (u32, u32) {
        let aspect_ratio = orig_height as f64 / orig_width as f64;
        let height = (width as f64 * aspect_ratio).round() as u32;
        (width, height.max(1))
    }

    /// Select appropriate filter type based on resize ratio
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            FilterType::Triangle
        } else if max_ratio > 1.5 {
            FilterType::CatmullRom
        } else {
            FilterType::Lanczos3
        }
    }

    /// Resize an image to `width`, upscaling smaller images as well.
    pub fn resize_to_width(img: &DynamicImage, width: u32) -> DynamicImage {
        let (orig_width, orig_height) = img.dimensions();
        let (width, height) = Self::calculate_dimensions(orig_width, orig_height, width);

        if (width, height) == (orig_width, orig_height) {
            return img.clone();
        }

        let filter = Self::select_filter(orig_width, orig_height, width, height);
        img.resize_exact(width, height, filter)
    }
}
