//! S3 notification payload
//!
//! Only the fields the resizer reads are required; everything else in the
//! notification is ignored.

use resizer_core::RouteError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct S3Event {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct S3EventRecord {
    #[serde(rename = "eventName", default, skip_serializing_if = "Option::is_none")]
    pub event_name: Option<String>,
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3Object,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct S3Object {
    /// Object key as delivered: URL-encoded, spaces as `+`
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl S3Event {
    /// Build a single-record event, as S3 would deliver for one upload.
    pub fn single(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        S3Event {
            records: vec![S3EventRecord {
                event_name: Some("ObjectCreated:Put".to_string()),
                s3: S3Entity {
                    bucket: S3Bucket {
                        name: bucket.into(),
                    },
                    object: S3Object {
                        key: key.into(),
                        size: None,
                    },
                },
            }],
        }
    }

    /// Source bucket and raw key of the first record. Further records are
    /// not processed.
    pub fn first_object(&self) -> Result<(&str, &str), RouteError> {
        let record = self
            .records
            .first()
            .ok_or_else(|| RouteError::MalformedEvent("event contains no records".to_string()))?;

        if self.records.len() > 1 {
            tracing::warn!(
                record_count = self.records.len(),
                "Event contains multiple records; only the first is processed"
            );
        }

        let bucket = record.s3.bucket.name.as_str();
        if bucket.is_empty() {
            return Err(RouteError::MalformedEvent(
                "record has an empty bucket name".to_string(),
            ));
        }

        Ok((bucket, record.s3.object.key.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOTIFICATION: &str = r#"{
        "Records": [
            {
                "eventVersion": "2.1",
                "eventSource": "aws:s3",
                "awsRegion": "us-east-1",
                "eventTime": "2024-01-01T00:00:00.000Z",
                "eventName": "ObjectCreated:Put",
                "s3": {
                    "s3SchemaVersion": "1.0",
                    "bucket": { "name": "uploads", "arn": "arn:aws:s3:::uploads" },
                    "object": { "key": "prod/profile/my+photo.png", "size": 1024, "eTag": "abc" }
                }
            }
        ]
    }"#;

    #[test]
    fn test_deserialize_notification() {
        let event: S3Event = serde_json::from_str(NOTIFICATION).unwrap();

        assert_eq!(event.records.len(), 1);
        let record = &event.records[0];
        assert_eq!(record.event_name.as_deref(), Some("ObjectCreated:Put"));
        assert_eq!(record.s3.bucket.name, "uploads");
        assert_eq!(record.s3.object.key, "prod/profile/my+photo.png");
        assert_eq!(record.s3.object.size, Some(1024));
    }

    #[test]
    fn test_first_object() {
        let event: S3Event = serde_json::from_str(NOTIFICATION).unwrap();
        assert_eq!(
            event.first_object().unwrap(),
            ("uploads", "prod/profile/my+photo.png")
        );
    }

    #[test]
    fn test_first_object_uses_first_record_only() {
        let mut event = S3Event::single("a", "prod/profile/1.png");
        event
            .records
            .extend(S3Event::single("b", "prod/profile/2.png").records);

        assert_eq!(event.first_object().unwrap(), ("a", "prod/profile/1.png"));
    }

    #[test]
    fn test_empty_event() {
        let event: S3Event = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            event.first_object(),
            Err(RouteError::MalformedEvent(_))
        ));
    }

    #[test]
    fn test_empty_bucket_name() {
        let event = S3Event::single("", "prod/profile/1.png");
        assert!(matches!(
            event.first_object(),
            Err(RouteError::MalformedEvent(_))
        ));
    }

    #[test]
    fn test_minimal_record() {
        let event: S3Event = serde_json::from_str(
            r#"{"Records":[{"s3":{"bucket":{"name":"b"},"object":{"key":"k"}}}]}"#,
        )
        .unwrap();
        assert_eq!(event.first_object().unwrap(), ("b", "k"));
        assert_eq!(event.records[0].event_name, None);
    }
}
