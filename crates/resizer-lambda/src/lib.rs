//! Resizer Lambda
//!
//! Handles one S3 `ObjectCreated` notification per invocation: the object is
//! downloaded, resized to a fixed width, written to the bucket mapped to its
//! category and finally deleted from the source bucket.

pub mod error;
pub mod event;
pub mod handler;
pub mod pipeline;
pub mod telemetry;

// Re-export commonly used types
pub use error::{HandlerError, PipelineError, PipelineFailure};
pub use event::S3Event;
pub use handler::ResizeHandler;
pub use pipeline::{Pipeline, PipelineReport, PipelineState, Stage};
