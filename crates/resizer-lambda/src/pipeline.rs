//! Resize pipeline
//!
//! Four stages run strictly in order: download the source object, resize it,
//! upload the result, delete the source. The first failing stage ends the run;
//! later stages never execute. Nothing is retried.
//!
//! ```text
//! Start -> Downloaded -> Transformed -> Uploaded -> CleanedUp -> Done
//!   \__________\______________\____________\_______> Failed { stage, cause }
//! ```

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::Arc;
use std::time::Instant;

use resizer_core::RoutingDecision;
use resizer_processing::ImageResizer;
use resizer_storage::Storage;
use serde::Serialize;

use crate::error::{PipelineError, PipelineFailure};

/// One of the four pipeline steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Download,
    Transform,
    Upload,
    Cleanup,
}

impl Display for Stage {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Stage::Download => write!(f, "download"),
            Stage::Transform => write!(f, "transform"),
            Stage::Upload => write!(f, "upload"),
            Stage::Cleanup => write!(f, "cleanup"),
        }
    }
}

/// Progress of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Start,
    Downloaded,
    Transformed,
    Uploaded,
    CleanedUp,
    Done,
    Failed(Stage),
}

impl PipelineState {
    /// Stage that runs next from this state, if any
    pub fn next_stage(&self) -> Option<Stage> {
        match self {
            PipelineState::Start => Some(Stage::Download),
            PipelineState::Downloaded => Some(Stage::Transform),
            PipelineState::Transformed => Some(Stage::Upload),
            PipelineState::Uploaded => Some(Stage::Cleanup),
            PipelineState::CleanedUp | PipelineState::Done | PipelineState::Failed(_) => None,
        }
    }

    /// State after the next stage completed successfully
    pub fn advance(self) -> Self {
        match self {
            PipelineState::Start => PipelineState::Downloaded,
            PipelineState::Downloaded => PipelineState::Transformed,
            PipelineState::Transformed => PipelineState::Uploaded,
            PipelineState::Uploaded => PipelineState::CleanedUp,
            PipelineState::CleanedUp => PipelineState::Done,
            terminal => terminal,
        }
    }

    /// State after the next stage failed. Terminal states absorb.
    pub fn fail(self) -> Self {
        match self.next_stage() {
            Some(stage) => PipelineState::Failed(stage),
            None => self,
        }
    }

    /// Stage recorded by a `Failed` state
    pub fn failed_stage(&self) -> Option<Stage> {
        match self {
            PipelineState::Failed(stage) => Some(*stage),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PipelineState::Done | PipelineState::Failed(_))
    }
}

/// Summary of a successful run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineReport {
    pub source_bucket: String,
    pub source_key: String,
    pub destination_bucket: String,
    pub destination_key: String,
    pub content_type: Option<String>,
    pub input_bytes: usize,
    pub output_bytes: usize,
    pub width: u32,
    pub height: u32,
    pub duration_ms: f64,
}

/// Runs the four stages against an injected store and resizer.
#[derive(Clone)]
pub struct Pipeline {
    storage: Arc<dyn Storage>,
    resizer: Arc<dyn ImageResizer>,
    target_width: u32,
}

impl Pipeline {
    pub fn new(
        storage: Arc<dyn Storage>,
        resizer: Arc<dyn ImageResizer>,
        target_width: u32,
    ) -> Self {
        Self {
            storage,
            resizer,
            target_width,
        }
    }

    pub fn target_width(&self) -> u32 {
        self.target_width
    }

    /// Run all stages for one routing decision and log the outcome once.
    pub async fn run(&self, decision: &RoutingDecision) -> Result<PipelineReport, PipelineFailure> {
        let start = Instant::now();
        let mut state = PipelineState::Start;

        match self.run_stages(decision, &mut state, start).await {
            Ok(report) => {
                tracing::info!(
                    source = %decision.source_location(),
                    destination = %decision.destination_location(),
                    width = report.width,
                    height = report.height,
                    output_bytes = report.output_bytes,
                    duration_ms = report.duration_ms,
                    "Successfully resized image and uploaded to destination"
                );
                Ok(report)
            }
            Err(error) => {
                // The state machine is authoritative for where the run stopped
                let stage = state.failed_stage().unwrap_or_else(|| error.stage());
                tracing::error!(
                    source = %decision.source_location(),
                    destination = %decision.destination_location(),
                    stage = %stage,
                    error = %error,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Unable to resize image and upload to destination"
                );
                Err(PipelineFailure {
                    stage,
                    state,
                    source_location: decision.source_location(),
                    destination_location: decision.destination_location(),
                    error,
                })
            }
        }
    }

    async fn run_stages(
        &self,
        decision: &RoutingDecision,
        state: &mut PipelineState,
        start: Instant,
    ) -> Result<PipelineReport, PipelineError> {
        // Download
        let object = self
            .storage
            .download(&decision.source_bucket, &decision.source_key)
            .await
            .map_err(|e| Self::fail(state, PipelineError::Fetch(e)))?;
        Self::advance(state);
        let input_bytes = object.len();

        // Transform
        let resized = self
            .resizer
            .resize(object.data, self.target_width)
            .await
            .map_err(|e| Self::fail(state, PipelineError::Transform(e)))?;
        Self::advance(state);
        let output_bytes = resized.data.len();

        // Upload, carrying the content type read in the download stage
        let destination_bucket = decision.destination_bucket.as_deref().ok_or_else(|| {
            Self::fail(
                state,
                PipelineError::MissingDestinationBucket {
                    category: decision.category.clone(),
                },
            )
        })?;
        self.storage
            .upload_with_key(
                destination_bucket,
                &decision.destination_key,
                resized.data,
                object.content_type.as_deref(),
            )
            .await
            .map_err(|e| Self::fail(state, PipelineError::StoreWrite(e)))?;
        Self::advance(state);

        // Cleanup
        self.storage
            .delete(&decision.source_bucket, &decision.source_key)
            .await
            .map_err(|e| Self::fail(state, PipelineError::StoreDelete(e)))?;
        Self::advance(state);

        // CleanedUp -> Done
        Self::advance(state);

        Ok(PipelineReport {
            source_bucket: decision.source_bucket.clone(),
            source_key: decision.source_key.clone(),
            destination_bucket: destination_bucket.to_string(),
            destination_key: decision.destination_key.clone(),
            content_type: object.content_type,
            input_bytes,
            output_bytes,
            width: resized.width,
            height: resized.height,
            duration_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }

    fn advance(state: &mut PipelineState) {
        let next = state.advance();
        tracing::debug!(from = ?state, to = ?next, "Pipeline state transition");
        *state = next;
    }

    fn fail(state: &mut PipelineState, error: PipelineError) -> PipelineError {
        *state = state.fail();
        tracing::debug!(state = ?state, error_code = error.error_code(), "Pipeline stage failed");
        error
    }
}
