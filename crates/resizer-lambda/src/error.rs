//! Pipeline and handler error types

use resizer_core::RouteError;
use resizer_processing::ProcessingError;
use resizer_storage::StorageError;

use crate::pipeline::{PipelineState, Stage};

/// Cause of a stage failure
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Failed to fetch source object: {0}")]
    Fetch(#[source] StorageError),

    #[error("Failed to transform image: {0}")]
    Transform(#[source] ProcessingError),

    #[error("No destination bucket configured for category '{category}'")]
    MissingDestinationBucket { category: String },

    #[error("Failed to write resized image: {0}")]
    StoreWrite(#[source] StorageError),

    #[error("Failed to delete source object: {0}")]
    StoreDelete(#[source] StorageError),
}

impl PipelineError {
    /// Stage this error belongs to
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Fetch(_) => Stage::Download,
            PipelineError::Transform(_) => Stage::Transform,
            PipelineError::MissingDestinationBucket { .. } | PipelineError::StoreWrite(_) => {
                Stage::Upload
            }
            PipelineError::StoreDelete(_) => Stage::Cleanup,
        }
    }

    /// Machine-readable error code (e.g., "FETCH_ERROR")
    pub fn error_code(&self) -> &'static str {
        match self {
            PipelineError::Fetch(_) => "FETCH_ERROR",
            PipelineError::Transform(_) => "TRANSFORM_ERROR",
            PipelineError::MissingDestinationBucket { .. } => "MISSING_DESTINATION_BUCKET",
            PipelineError::StoreWrite(_) => "STORE_WRITE_ERROR",
            PipelineError::StoreDelete(_) => "STORE_DELETE_ERROR",
        }
    }
}

/// Terminal `Failed` state of a pipeline run: the stage that failed and why.
#[derive(Debug, thiserror::Error)]
#[error("Unable to resize {source_location} and upload to {destination_location}: {stage} stage failed: {error}")]
pub struct PipelineFailure {
    pub stage: Stage,
    /// Terminal state of the run, always `Failed(stage)`
    pub state: PipelineState,
    pub source_location: String,
    pub destination_location: String,
    #[source]
    pub error: PipelineError,
}

/// Errors surfaced to the invoker
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error(transparent)]
    Route(#[from] RouteError),

    #[error(transparent)]
    Pipeline(#[from] PipelineFailure),
}

impl HandlerError {
    pub fn error_code(&self) -> &'static str {
        match self {
            HandlerError::Route(e) => e.error_code(),
            HandlerError::Pipeline(f) => f.error.error_code(),
        }
    }
}
