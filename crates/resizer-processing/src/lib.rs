//! Resizer Image Processing Library
//!
//! This crate provides the resize primitive used by the pipeline: decode an
//! image, scale it to a target width with proportional height and re-encode
//! it as JPEG.

pub mod error;
pub mod resize;
pub mod traits;
pub mod transformer;

// Re-export commonly used types
pub use error::ProcessingError;
pub use resize::ImageResize;
pub use traits::{ImageResizer, ResizedImage};
pub use transformer::JpegResizer;
