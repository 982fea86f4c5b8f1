/// Image processing errors
#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Failed to decode image: {0}")]
    Decode(#[source] image::ImageError),

    #[error("Failed to encode image: {0}")]
    Encode(#[source] image::ImageError),

    #[error("Invalid resize target: {0}")]
    InvalidTarget(String),

    #[error("Resize task failed: {0}")]
    Task(String),
}
