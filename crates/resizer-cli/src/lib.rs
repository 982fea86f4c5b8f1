use std::path::Path;

use anyhow::Context;
use resizer_lambda::S3Event;

/// Build the notification to replay: read it from `event_file` when given,
/// otherwise synthesize a single-record event for `bucket`/`key`.
pub fn load_event(
    event_file: Option<&Path>,
    bucket: Option<&str>,
    key: Option<&str>,
) -> anyhow::Result<S3Event> {
    if let Some(path) = event_file {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read event file {}", path.display()))?;
        return serde_json::from_str(&raw)
            .with_context(|| format!("Invalid S3 event in {}", path.display()));
    }

    match (bucket, key) {
        (Some(bucket), Some(key)) => Ok(S3Event::single(bucket, key)),
        _ => Err(anyhow::anyhow!(
            "Either --event or both --bucket and --key are required"
        )),
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
