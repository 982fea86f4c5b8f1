//! Test helpers: build a handler around in-memory or on-disk storage.
//!
//! Run from workspace root: `cargo test -p resizer-lambda`.

#![allow(dead_code)]

pub mod fixtures;

use std::sync::Arc;

use resizer_core::{Config, ReportMode};
use resizer_lambda::{Pipeline, ResizeHandler};
use resizer_processing::JpegResizer;
use resizer_storage::{MemoryStorage, Storage};

pub const SOURCE_BUCKET: &str = "uploads";
pub const PROFILE_BUCKET: &str = "outfix-profile-images";
pub const COLLAGE_BUCKET: &str = "outfix-outfit-collage-images";

/// Test application: a handler and the memory store behind it.
pub struct TestApp {
    pub storage: MemoryStorage,
    pub handler: ResizeHandler,
    pub pipeline: Pipeline,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_report_mode(ReportMode::Strict)
    }

    pub fn with_report_mode(report_mode: ReportMode) -> Self {
        let storage = MemoryStorage::new();
        let config = Config {
            report_mode,
            ..Config::default()
        };
        let shared: Arc<dyn Storage> = Arc::new(storage.clone());
        let resizer = Arc::new(JpegResizer::default());
        Self {
            handler: ResizeHandler::new(&config, Arc::clone(&shared), resizer.clone()),
            pipeline: Pipeline::new(shared, resizer, config.target_width),
            storage,
        }
    }

    /// Seed the source bucket with an object
    pub fn upload_source(&self, key: &str, data: Vec<u8>, content_type: &str) {
        self.storage
            .put_object(SOURCE_BUCKET, key, data, Some(content_type));
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}
