//! Resizer Storage Library
//!
//! This crate provides the blob-store abstraction used by the resize pipeline
//! and its implementations for S3, the local filesystem and memory.
//!
//! # Addressing
//!
//! Unlike a single-bucket media store, every operation names its bucket: the
//! pipeline reads from the bucket the notification came from and writes to a
//! bucket chosen by category. Keys must not contain `..` or a leading `/`;
//! validation is centralized in the `keys` module.

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
pub mod memory;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
pub use memory::MemoryStorage;
pub use resizer_core::StorageBackend;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult, StoredObject};
