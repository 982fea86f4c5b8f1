//! Core traits for image processing

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::ProcessingError;

/// Output of a resize: the encoded bytes and the dimensions they decode to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizedImage {
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
}

/// Resize primitive - encoded bytes in, encoded JPEG bytes out
#[async_trait]
pub trait ImageResizer: Send + Sync {
    /// Resize `data` to `target_width`, scaling height to preserve the aspect ratio.
    async fn resize(&self, data: Bytes, target_width: u32) -> Result<ResizedImage, ProcessingError>;
}
