//! Configuration module
//!
//! Settings are read from the environment (optionally seeded from a `.env`
//! file). Every setting has a default so a bare Lambda deployment only needs
//! the AWS region the runtime already provides.

use std::env;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;
use std::str::FromStr;

use crate::constants::{JPEG_QUALITY, TARGET_WIDTH};
use crate::routing::CategoryTable;
use crate::storage_types::StorageBackend;

const S3_MAX_ATTEMPTS: u32 = 1;

/// How a failed invocation is reported to the invoker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    /// Routing and stage failures are returned as invocation errors.
    #[default]
    Strict,
    /// Every invocation reports success; failures are only visible in the
    /// logs and in the `status` field of the response.
    Legacy,
}

impl FromStr for ReportMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(ReportMode::Strict),
            "legacy" => Ok(ReportMode::Legacy),
            _ => Err(anyhow::anyhow!("Invalid report mode: {}", s)),
        }
    }
}

impl Display for ReportMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            ReportMode::Strict => write!(f, "strict"),
            ReportMode::Legacy => write!(f, "legacy"),
        }
    }
}

/// Resizer configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub environment: String,
    pub target_width: u32,
    pub jpeg_quality: u8,
    pub categories: CategoryTable,
    pub report_mode: ReportMode,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, LocalStack, etc.)
    pub s3_max_attempts: u32,
    pub local_storage_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            target_width: TARGET_WIDTH,
            jpeg_quality: JPEG_QUALITY,
            categories: CategoryTable::default(),
            report_mode: ReportMode::default(),
            storage_backend: StorageBackend::S3,
            s3_region: None,
            s3_endpoint: None,
            s3_max_attempts: S3_MAX_ATTEMPTS,
            local_storage_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("RESIZER_ENVIRONMENT")
            .or_else(|_| env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "development".to_string());

        let target_width = env::var("RESIZER_TARGET_WIDTH")
            .unwrap_or_else(|_| TARGET_WIDTH.to_string())
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("RESIZER_TARGET_WIDTH must be a positive integer"))?;

        let jpeg_quality = env::var("RESIZER_JPEG_QUALITY")
            .unwrap_or_else(|_| JPEG_QUALITY.to_string())
            .parse::<u8>()
            .map_err(|_| anyhow::anyhow!("RESIZER_JPEG_QUALITY must be between 1 and 100"))?;

        let categories = match env::var("RESIZER_CATEGORY_BUCKETS") {
            Ok(spec) => CategoryTable::parse(&spec)?,
            Err(_) => CategoryTable::default(),
        };

        let report_mode = env::var("RESIZER_REPORT_MODE")
            .ok()
            .map(|s| s.parse::<ReportMode>())
            .transpose()?
            .unwrap_or_default();

        let storage_backend = env::var("STORAGE_BACKEND")
            .ok()
            .map(|s| s.parse::<StorageBackend>())
            .transpose()?
            .unwrap_or(StorageBackend::S3);

        let config = Config {
            environment,
            target_width,
            jpeg_quality,
            categories,
            report_mode,
            storage_backend,
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            s3_max_attempts: parse_max_attempts(env::var("S3_MAX_ATTEMPTS").ok().as_deref())?,
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok().map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.target_width == 0 {
            return Err(anyhow::anyhow!("RESIZER_TARGET_WIDTH must be greater than 0"));
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(anyhow::anyhow!(
                "RESIZER_JPEG_QUALITY must be between 1 and 100, got {}",
                self.jpeg_quality
            ));
        }

        if self.categories.is_empty() {
            return Err(anyhow::anyhow!(
                "RESIZER_CATEGORY_BUCKETS must map at least one category"
            ));
        }

        if self.s3_max_attempts == 0 {
            return Err(anyhow::anyhow!("S3_MAX_ATTEMPTS must be at least 1"));
        }

        if self.storage_backend == StorageBackend::Local && self.local_storage_path.is_none() {
            return Err(anyhow::anyhow!(
                "LOCAL_STORAGE_PATH must be set when STORAGE_BACKEND=local"
            ));
        }

        Ok(())
    }
}

fn parse_max_attempts(value: Option<&str>) -> Result<u32, anyhow::Error> {
    match value {
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| anyhow::anyhow!("S3_MAX_ATTEMPTS must be a positive integer, got '{}'", raw)),
        None => Ok(S3_MAX_ATTEMPTS),
    }
}
