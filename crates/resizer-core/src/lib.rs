//! Resizer Core Library
//!
//! This crate provides the routing rules, configuration and error types shared
//! by the storage, processing and Lambda crates.
//!
//! # Object key format
//!
//! Source objects are stored as `{environment}/{category}/{filename}`. The
//! category selects the destination bucket and the resized output is always
//! written as `{environment}/{category}/{item_id}.jpg`.

pub mod config;
pub mod constants;
pub mod error;
pub mod routing;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, ReportMode};
pub use error::RouteError;
pub use routing::{CategoryTable, ImageType, RoutingDecision};
pub use storage_types::StorageBackend;
