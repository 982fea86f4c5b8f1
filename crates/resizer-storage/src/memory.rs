//! In-memory storage
//!
//! Keeps objects in a map keyed by `(bucket, key)` and records every call so
//! tests can assert which operations ran and in what order. Individual
//! operations can be made to fail to exercise error paths.

use crate::traits::{Storage, StorageError, StorageResult, StoredObject};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

/// Kind of storage call, used for failure injection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageOpKind {
    Download,
    Upload,
    Delete,
    Exists,
}

/// A storage call as recorded by [`MemoryStorage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageOp {
    pub kind: StorageOpKind,
    pub bucket: String,
    pub key: String,
}

#[derive(Default)]
struct Inner {
    objects: BTreeMap<(String, String), StoredObject>,
    operations: Vec<StorageOp>,
    failing: HashSet<StorageOpKind>,
}

/// Storage implementation that keeps objects in memory
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<Inner>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        // A panicking test thread must not hide the recorded state from others
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Seed an object without recording an operation
    pub fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: impl Into<Bytes>,
        content_type: Option<&str>,
    ) {
        self.lock().objects.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject::new(data, content_type.map(String::from)),
        );
    }

    /// Get an object without recording an operation (for test assertions)
    pub fn get_object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.lock()
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn has_object(&self, bucket: &str, key: &str) -> bool {
        self.get_object(bucket, key).is_some()
    }

    pub fn object_count(&self) -> usize {
        self.lock().objects.len()
    }

    /// Every call made so far, in order
    pub fn operations(&self) -> Vec<StorageOp> {
        self.lock().operations.clone()
    }

    /// Kinds of the calls made so far, in order
    pub fn operation_kinds(&self) -> Vec<StorageOpKind> {
        self.lock().operations.iter().map(|op| op.kind).collect()
    }

    /// Make every subsequent call of `kind` fail with a backend error
    pub fn fail_on(&self, kind: StorageOpKind) {
        self.lock().failing.insert(kind);
    }

    fn record(&self, kind: StorageOpKind, bucket: &str, key: &str) -> MutexGuard<'_, Inner> {
        let mut inner = self.lock();
        inner.operations.push(StorageOp {
            kind,
            bucket: bucket.to_string(),
            key: key.to_string(),
        });
        inner
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn download(&self, bucket: &str, storage_key: &str) -> StorageResult<StoredObject> {
        let inner = self.record(StorageOpKind::Download, bucket, storage_key);
        if inner.failing.contains(&StorageOpKind::Download) {
            return Err(StorageError::DownloadFailed(
                "injected download failure".to_string(),
            ));
        }
        inner
            .objects
            .get(&(bucket.to_string(), storage_key.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("{}/{}", bucket, storage_key)))
    }

    async fn upload_with_key(
        &self,
        bucket: &str,
        storage_key: &str,
        data: Bytes,
        content_type: Option<&str>,
    ) -> StorageResult<()> {
        let mut inner = self.record(StorageOpKind::Upload, bucket, storage_key);
        if inner.failing.contains(&StorageOpKind::Upload) {
            return Err(StorageError::UploadFailed(
                "injected upload failure".to_string(),
            ));
        }
        inner.objects.insert(
            (bucket.to_string(), storage_key.to_string()),
            StoredObject::new(data, content_type.map(String::from)),
        );
        Ok(())
    }

    async fn delete(&self, bucket: &str, storage_key: &str) -> StorageResult<()> {
        let mut inner = self.record(StorageOpKind::Delete, bucket, storage_key);
        if inner.failing.contains(&StorageOpKind::Delete) {
            return Err(StorageError::DeleteFailed(
                "injected delete failure".to_string(),
            ));
        }
        inner
            .objects
            .remove(&(bucket.to_string(), storage_key.to_string()));
        Ok(())
    }

    async fn exists(&self, bucket: &str, storage_key: &str) -> StorageResult<bool> {
        let inner = self.record(StorageOpKind::Exists, bucket, storage_key);
        if inner.failing.contains(&StorageOpKind::Exists) {
            return Err(StorageError::BackendError(
                "injected exists failure".to_string(),
            ));
        }
        Ok(inner
            .objects
            .contains_key(&(bucket.to_string(), storage_key.to_string())))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
