//! JPEG resizer - decode, scale to width, re-encode as JPEG

use crate::error::ProcessingError;
use crate::resize::{ImageResize, MAX_JPEG_DIMENSION};
use crate::traits::{ImageResizer, ResizedImage};
use async_trait::async_trait;
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{GenericImageView, ImageError};
use resizer_core::constants::JPEG_QUALITY;
use std::io::Cursor;

/// Resizes any decodable image to a fixed width and encodes the result as JPEG.
#[derive(Debug, Clone, Copy)]
pub struct JpegResizer {
    quality: u8,
}

impl JpegResizer {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Synchronous resize. CPU-bound; call from a blocking context.
    pub fn resize_blocking(
        &self,
        data: &[u8],
        target_width: u32,
    ) -> Result<ResizedImage, ProcessingError> {
        if target_width == 0 {
            return Err(ProcessingError::InvalidTarget(
                "target width must be greater than 0".to_string(),
            ));
        }

        let img = image::ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ProcessingError::Decode(ImageError::IoError(e)))?
            .decode()
            .map_err(ProcessingError::Decode)?;

        let (orig_width, orig_height) = img.dimensions();

        // Reject before allocating the resized buffer: a thin strip scales to
        // a height the JPEG encoder cannot represent.
        let (target_width, target_height) =
            ImageResize::calculate_dimensions(orig_width, orig_height, target_width);
        if target_width > MAX_JPEG_DIMENSION || target_height > MAX_JPEG_DIMENSION {
            return Err(ProcessingError::InvalidTarget(format!(
                "{}x{} resized to {}x{} exceeds the JPEG limit of {} pixels per side",
                orig_width, orig_height, target_width, target_height, MAX_JPEG_DIMENSION
            )));
        }

        let resized = ImageResize::resize_to_width(&img, target_width);

        // JPEG has no alpha channel
        let rgb = resized.to_rgb8();
        let (width, height) = rgb.dimensions();

        let mut buffer = Vec::with_capacity(width as usize * height as usize / 4);
        let encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);
        rgb.write_with_encoder(encoder)
            .map_err(ProcessingError::Encode)?;

        tracing::debug!(
            orig_width = orig_width,
            orig_height = orig_height,
            width = width,
            height = height,
            input_bytes = data.len(),
            output_bytes = buffer.len(),
            quality = self.quality,
            "Image resized"
        );

        Ok(ResizedImage {
            data: Bytes::from(buffer),
            width,
            height,
        })
    }
}

impl Default for JpegResizer {
    fn default() -> Self {
        Self::new(JPEG_QUALITY)
    }
}

#[async_trait]
impl ImageResizer for JpegResizer {
    async fn resize(&self, data: Bytes, target_width: u32) -> Result<ResizedImage, ProcessingError> {
        let resizer = *self;
        tokio::task::spawn_blocking(move || resizer.resize_blocking(&data, target_width))
            .await
            .map_err(|e| ProcessingError::Task(e.to_string()))?
    }
}
