//! Event routing and object key parsing
//!
//! A notification carries a source bucket and a raw object key shaped like
//! `{environment}/{category}/{filename}`. [`RoutingDecision::parse`] turns
//! that pair into everything the pipeline needs: the decoded source key, the
//! destination bucket selected by category and the normalized destination key.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter, Result as FmtResult};

use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::constants::{
    COLLAGE_BUCKET, COLLAGE_CATEGORY, OUTPUT_EXTENSION, PROFILE_BUCKET, PROFILE_CATEGORY,
};
use crate::error::RouteError;

/// Source image types accepted by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    Jpg,
    Png,
}

impl ImageType {
    /// Infer the image type from the trailing `.{ext}` of a decoded key.
    pub fn infer(source_key: &str) -> Result<Self, RouteError> {
        let (_, ext) = source_key
            .rsplit_once('.')
            .ok_or_else(|| RouteError::UnrecognizedType(source_key.to_string()))?;

        match ext.to_lowercase().as_str() {
            "jpg" => Ok(ImageType::Jpg),
            "png" => Ok(ImageType::Png),
            other => Err(RouteError::UnsupportedType(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageType::Jpg => "jpg",
            ImageType::Png => "png",
        }
    }
}

impl Display for ImageType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Category → destination bucket lookup table.
///
/// Defaults to the `profile` and `collage` buckets. Deployments can replace
/// or extend the mapping through configuration (see [`CategoryTable::parse`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    buckets: BTreeMap<String, String>,
}

impl CategoryTable {
    /// Create an empty table. Every category is unrecognized.
    pub fn empty() -> Self {
        Self {
            buckets: BTreeMap::new(),
        }
    }

    /// Parse a `category=bucket` list separated by commas,
    /// e.g. `profile=outfix-profile-images,collage=outfix-outfit-collage-images`.
    pub fn parse(mapping: &str) -> Result<Self, anyhow::Error> {
        let mut table = Self::empty();
        for entry in mapping.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (category, bucket) = entry
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("Invalid category mapping '{}': expected category=bucket", entry))?;
            let (category, bucket) = (category.trim(), bucket.trim());
            if category.is_empty() || bucket.is_empty() {
                return Err(anyhow::anyhow!(
                    "Invalid category mapping '{}': category and bucket must be non-empty",
                    entry
                ));
            }
            table.insert(category, bucket);
        }
        Ok(table)
    }

    /// Add or replace the bucket for a category.
    pub fn insert(&mut self, category: impl Into<String>, bucket: impl Into<String>) {
        self.buckets.insert(category.into(), bucket.into());
    }

    /// Destination bucket for a category, if it is recognized.
    pub fn bucket_for(&self, category: &str) -> Option<&str> {
        self.buckets.get(category).map(String::as_str)
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.buckets.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        let mut table = Self::empty();
        table.insert(PROFILE_CATEGORY, PROFILE_BUCKET);
        table.insert(COLLAGE_CATEGORY, COLLAGE_BUCKET);
        table
    }
}

/// Everything derived from one notification record. Computed once per
/// invocation and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoutingDecision {
    pub source_bucket: String,
    /// URL-decoded source key (`+` already turned into spaces)
    pub source_key: String,
    pub environment: String,
    pub category: String,
    pub item_id: String,
    /// `None` when the category has no entry in the [`CategoryTable`]
    pub destination_bucket: Option<String>,
    pub destination_key: String,
    pub image_type: ImageType,
}

impl RoutingDecision {
    /// Derive a routing decision from a source bucket and a raw (still
    /// URL-encoded) object key.
    ///
    /// Environment, category and item identifier come from the raw key; the
    /// source key used for store access is the decoded one. Unknown categories
    /// are not rejected here: they yield `destination_bucket == None`.
    pub fn parse(
        source_bucket: &str,
        raw_key: &str,
        categories: &CategoryTable,
    ) -> Result<Self, RouteError> {
        let mut segments = raw_key.split('/');
        let (environment, category, filename) =
            match (segments.next(), segments.next(), segments.next()) {
                (Some(environment), Some(category), Some(filename)) => {
                    (environment, category, filename)
                }
                _ => {
                    return Err(RouteError::malformed_key(
                        raw_key,
                        "expected {environment}/{category}/{filename}",
                    ))
                }
            };

        if environment.is_empty() || category.is_empty() {
            return Err(RouteError::malformed_key(
                raw_key,
                "environment and category must be non-empty",
            ));
        }

        let item_id = filename.split('.').next().unwrap_or_default();
        if item_id.is_empty() {
            return Err(RouteError::malformed_key(raw_key, "missing item identifier"));
        }

        let source_key = decode_key(raw_key)?;
        let image_type = ImageType::infer(&source_key)?;

        let destination_bucket = categories.bucket_for(category).map(String::from);
        let destination_key = format!(
            "{}/{}/{}.{}",
            environment, category, item_id, OUTPUT_EXTENSION
        );

        tracing::info!(
            environment = %environment,
            category = %category,
            item_id = %item_id,
            source_bucket = %source_bucket,
            source_key = %source_key,
            destination_bucket = destination_bucket.as_deref().unwrap_or("<unmapped>"),
            destination_key = %destination_key,
            image_type = %image_type,
            "Parsed variables from object key"
        );

        Ok(RoutingDecision {
            source_bucket: source_bucket.to_string(),
            source_key,
            environment: environment.to_string(),
            category: category.to_string(),
            item_id: item_id.to_string(),
            destination_bucket,
            destination_key,
            image_type,
        })
    }

    /// `{bucket}/{key}` of the original object.
    pub fn source_location(&self) -> String {
        format!("{}/{}", self.source_bucket, self.source_key)
    }

    /// `{bucket}/{key}` of the resized object, with a placeholder bucket when
    /// the category is unmapped.
    pub fn destination_location(&self) -> String {
        format!(
            "{}/{}",
            self.destination_bucket.as_deref().unwrap_or("<unmapped>"),
            self.destination_key
        )
    }
}

/// Notification keys encode spaces as `+` and everything else as `%XX`.
fn decode_key(raw_key: &str) -> Result<String, RouteError> {
    let spaced = raw_key.replace('+', " ");
    percent_decode_str(&spaced)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| RouteError::malformed_key(raw_key, format!("invalid UTF-8 after decoding: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(key: &str) -> Result<RoutingDecision, RouteError> {
        RoutingDecision::parse("uploads", key, &CategoryTable::default())
    }

    #[test]
    fn test_parse_profile_png() {
        let decision = parse("prod/profile/abc123.png").unwrap();

        assert_eq!(decision.source_bucket, "uploads");
        assert_eq!(decision.source_key, "prod/profile/abc123.png");
        assert_eq!(decision.environment, "prod");
        assert_eq!(decision.category, "profile");
        assert_eq!(decision.item_id, "abc123");
        assert_eq!(decision.destination_bucket.as_deref(), Some("outfix-profile-images"));
        assert_eq!(decision.destination_key, "prod/profile/abc123.jpg");
        assert_eq!(decision.image_type, ImageType::Png);
    }

    #[test]
    fn test_parse_collage_jpg() {
        let decision = parse("staging/collage/outfit-9.jpg").unwrap();

        assert_eq!(
            decision.destination_bucket.as_deref(),
            Some("outfix-outfit-collage-images")
        );
        assert_eq!(decision.destination_key, "staging/collage/outfit-9.jpg");
        assert_eq!(decision.image_type, ImageType::Jpg);
    }

    #[test]
    fn test_destination_key_for_every_supported_combination() {
        for category in ["profile", "collage"] {
            for ext in ["jpg", "png"] {
                let key = format!("dev/{}/item.{}", category, ext);
                let decision = parse(&key).unwrap();
                assert_eq!(decision.destination_key, format!("dev/{}/item.jpg", category));
                assert_eq!(
                    decision.destination_bucket.as_deref(),
                    CategoryTable::default().bucket_for(category)
                );
            }
        }
    }

    #[test]
    fn test_uppercase_extension_is_accepted() {
        let decision = parse("prod/profile/abc.PNG").unwrap();
        assert_eq!(decision.image_type, ImageType::Png);
        assert_eq!(decision.destination_key, "prod/profile/abc.jpg");
    }

    #[test]
    fn test_unsupported_extension() {
        assert_eq!(
            parse("prod/profile/abc.gif").unwrap_err(),
            RouteError::UnsupportedType("gif".to_string())
        );
        assert_eq!(
            parse("prod/profile/abc.jpeg").unwrap_err(),
            RouteError::UnsupportedType("jpeg".to_string())
        );
    }

    #[test]
    fn test_missing_extension() {
        let err = parse("prod/profile/abc").unwrap_err();
        assert!(matches!(err, RouteError::UnrecognizedType(_)));
    }

    #[test]
    fn test_too_few_segments() {
        for key in ["abc.png", "prod/abc.png", ""] {
            let err = parse(key).unwrap_err();
            assert!(matches!(err, RouteError::MalformedKey { .. }), "key {:?}", key);
        }
    }

    #[test]
    fn test_empty_segments_are_malformed() {
        for key in ["/profile/abc.png", "prod//abc.png", "prod/profile/.png"] {
            let err = parse(key).unwrap_err();
            assert!(matches!(err, RouteError::MalformedKey { .. }), "key {:?}", key);
        }
    }

    #[test]
    fn test_extra_segments_are_ignored() {
        let decision = parse("prod/profile/abc/nested.png").unwrap();
        assert_eq!(decision.item_id, "abc");
        assert_eq!(decision.destination_key, "prod/profile/abc.jpg");
        assert_eq!(decision.source_key, "prod/profile/abc/nested.png");
    }

    #[test]
    fn test_item_id_stops_at_first_dot() {
        let decision = parse("prod/profile/abc.thumb.png").unwrap();
        assert_eq!(decision.item_id, "abc");
        assert_eq!(decision.image_type, ImageType::Png);
    }

    #[test]
    fn test_source_key_is_url_decoded() {
        let decision = parse("prod/profile/my+photo%C3%A9.jpg").unwrap();
        assert_eq!(decision.source_key, "prod/profile/my photoé.jpg");
        // Identifiers come from the raw key
        assert_eq!(decision.item_id, "my+photo%C3%A9");
    }

    #[test]
    fn test_encoded_plus_is_not_a_space() {
        let decision = parse("prod/profile/a%2Bb.png").unwrap();
        assert_eq!(decision.source_key, "prod/profile/a+b.png");
    }

    #[test]
    fn test_invalid_utf8_after_decoding() {
        let err = parse("prod/profile/bad%FF.png").unwrap_err();
        assert!(matches!(err, RouteError::MalformedKey { .. }));
    }

    #[test]
    fn test_unrecognized_category_has_no_bucket() {
        let decision = parse("prod/banner/abc123.jpg").unwrap();
        assert_eq!(decision.destination_bucket, None);
        assert_eq!(decision.destination_key, "prod/banner/abc123.jpg");
        assert_eq!(decision.destination_location(), "<unmapped>/prod/banner/abc123.jpg");
    }

    #[test]
    fn test_locations() {
        let decision = parse("prod/profile/abc123.png").unwrap();
        assert_eq!(decision.source_location(), "uploads/prod/profile/abc123.png");
        assert_eq!(
            decision.destination_location(),
            "outfix-profile-images/prod/profile/abc123.jpg"
        );
    }

    #[test]
    fn test_category_table_parse() {
        let table = CategoryTable::parse("profile=a, banner = b,").unwrap();
        assert_eq!(table.bucket_for("profile"), Some("a"));
        assert_eq!(table.bucket_for("banner"), Some("b"));
        assert_eq!(table.bucket_for("collage"), None);
        assert_eq!(table.categories().collect::<Vec<_>>(), vec!["banner", "profile"]);
    }

    #[test]
    fn test_category_table_parse_rejects_bad_entries() {
        assert!(CategoryTable::parse("profile").is_err());
        assert!(CategoryTable::parse("=bucket").is_err());
        assert!(CategoryTable::parse("profile=").is_err());
    }

    #[test]
    fn test_custom_table_routes_new_category() {
        let mut table = CategoryTable::default();
        table.insert("banner", "outfix-banner-images");
        let decision = RoutingDecision::parse("uploads", "prod/banner/x.jpg", &table).unwrap();
        assert_eq!(decision.destination_bucket.as_deref(), Some("outfix-banner-images"));
    }
}
