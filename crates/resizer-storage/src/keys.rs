//! Shared bucket and key validation for storage backends.

use crate::traits::{StorageError, StorageResult};

/// Reject bucket names that could address outside a backend's namespace.
pub fn validate_bucket(bucket: &str) -> StorageResult<()> {
    if bucket.is_empty() || bucket.contains('/') || bucket.contains("..") {
        return Err(StorageError::InvalidKey(format!(
            "Invalid bucket name: '{}'",
            bucket
        )));
    }
    Ok(())
}

/// Reject keys that are empty, absolute or contain path traversal sequences.
pub fn validate_key(storage_key: &str) -> StorageResult<()> {
    if storage_key.is_empty() || storage_key.starts_with('/') || storage_key.contains("..") {
        return Err(StorageError::InvalidKey(format!(
            "Storage key contains invalid characters: '{}'",
            storage_key
        )));
    }
    Ok(())
}

/// Content type implied by a key's extension, for backends that do not
/// persist object metadata.
pub fn content_type_from_key(storage_key: &str) -> Option<String> {
    let (_, ext) = storage_key.rsplit_once('.')?;
    let content_type = match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => return None,
    };
    Some(content_type.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("prod/profile/abc.png").is_ok());
        assert!(validate_key("prod/profile/my photo.png").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("/etc/passwd").is_err());
        assert!(validate_key("prod/../secret").is_err());
    }

    #[test]
    fn test_validate_bucket() {
        assert!(validate_bucket("uploads").is_ok());
        assert!(validate_bucket("").is_err());
        assert!(validate_bucket("a/b").is_err());
        assert!(validate_bucket("..").is_err());
    }

    #[test]
    fn test_content_type_from_key() {
        assert_eq!(content_type_from_key("a/b.JPG").as_deref(), Some("image/jpeg"));
        assert_eq!(content_type_from_key("a/b.png").as_deref(), Some("image/png"));
        assert_eq!(content_type_from_key("a/b.bin"), None);
        assert_eq!(content_type_from_key("a/b"), None);
    }
}
