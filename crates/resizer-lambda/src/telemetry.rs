//! Tracing initialization
//!
//! Lambda captures stdout into CloudWatch, so events go to stdout without ANSI
//! colors. `RESIZER_LOG_FORMAT=json` switches to one JSON object per line.

use std::env;
use std::str::FromStr;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

// `bootstrap` is the binary target; library crates log under `resizer_*`
const DEFAULT_FILTER: &str = "bootstrap=info,resizer=info,aws_config=warn";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(anyhow::anyhow!("Invalid log format: {}", s)),
        }
    }
}

impl LogFormat {
    /// Read `RESIZER_LOG_FORMAT`. Absent means text; an unknown value is an error.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Self::from_setting(env::var("RESIZER_LOG_FORMAT").ok().as_deref())
    }

    fn from_setting(value: Option<&str>) -> Result<Self, anyhow::Error> {
        value
            .map(|s| {
                s.parse::<LogFormat>()
                    .map_err(|_| anyhow::anyhow!("RESIZER_LOG_FORMAT must be text or json, got '{}'", s))
            })
            .transpose()
            .map(Option::unwrap_or_default)
    }
}

/// Initialize tracing for the process. Call once, before the runtime loop.
pub fn init_telemetry(format: LogFormat) -> Result<(), anyhow::Error> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .without_time(),
            )
            .try_init()?,
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_current_span(false)
                    .without_time(),
            )
            .try_init()?,
    }

    tracing::debug!(format = ?format, "Telemetry initialized");
    Ok(())
}
