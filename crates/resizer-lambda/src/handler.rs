//! Invocation handler
//!
//! Turns one notification into a routing decision, runs the pipeline and maps
//! the outcome onto the completion signal selected by [`ReportMode`].

use std::sync::Arc;

use resizer_core::{CategoryTable, Config, ReportMode, RoutingDecision};
use resizer_processing::ImageResizer;
use resizer_storage::Storage;
use serde_json::{json, Value};

use crate::error::HandlerError;
use crate::event::S3Event;
use crate::pipeline::{Pipeline, PipelineReport};

/// Shared across invocations; holds no per-event state.
#[derive(Clone)]
pub struct ResizeHandler {
    pipeline: Pipeline,
    categories: CategoryTable,
    report_mode: ReportMode,
}

impl ResizeHandler {
    pub fn new(
        config: &Config,
        storage: Arc<dyn Storage>,
        resizer: Arc<dyn ImageResizer>,
    ) -> Self {
        Self {
            pipeline: Pipeline::new(storage, resizer, config.target_width),
            categories: config.categories.clone(),
            report_mode: config.report_mode,
        }
    }

    pub fn report_mode(&self) -> ReportMode {
        self.report_mode
    }

    /// Route and process the first record of `event`.
    pub async fn process(&self, event: &S3Event) -> Result<PipelineReport, HandlerError> {
        let (source_bucket, raw_key) = event.first_object()?;
        let decision = RoutingDecision::parse(source_bucket, raw_key, &self.categories)?;
        Ok(self.pipeline.run(&decision).await?)
    }

    /// Process `event` and produce the invocation result.
    ///
    /// In [`ReportMode::Strict`] every failure is returned as an error. In
    /// [`ReportMode::Legacy`] routing failures are still errors, but stage
    /// failures are reported as a successful invocation with
    /// `"status": "error"`; the failure is only visible in the logs and in
    /// the response body.
    pub async fn handle(&self, event: S3Event) -> Result<Value, HandlerError> {
        tracing::debug!(event = ?event, "Reading options from event");

        match (self.process(&event).await, self.report_mode) {
            (Ok(report), _) => Ok(json!({
                "status": "success",
                "report": report,
            })),
            (Err(HandlerError::Pipeline(failure)), ReportMode::Legacy) => {
                tracing::warn!(
                    stage = %failure.stage,
                    "Reporting successful completion despite stage failure (legacy report mode)"
                );
                Ok(json!({
                    "status": "error",
                    "stage": failure.stage,
                    "error_code": failure.error.error_code(),
                    "message": failure.to_string(),
                }))
            }
            (Err(error), _) => {
                if let HandlerError::Route(route_error) = &error {
                    tracing::error!(
                        error = %route_error,
                        error_code = route_error.error_code(),
                        "Rejected event before processing"
                    );
                }
                Err(error)
            }
        }
    }
}
