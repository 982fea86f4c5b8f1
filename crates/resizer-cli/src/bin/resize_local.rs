use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use resizer_cli::{init_tracing, load_event};
use resizer_core::Config;
use resizer_lambda::ResizeHandler;
use resizer_processing::JpegResizer;
use resizer_storage::create_storage;

#[derive(Parser, Debug)]
#[command(name = "resize_local")]
#[command(about = "Run one resize invocation outside Lambda")]
struct Args {
    /// Path to an S3 notification JSON file
    #[arg(long, value_name = "FILE", conflicts_with_all = ["bucket", "key"])]
    event: Option<PathBuf>,

    /// Source bucket (used with --key)
    #[arg(long, requires = "key")]
    bucket: Option<String>,

    /// Raw object key as it appears in a notification (used with --bucket)
    #[arg(long, requires = "bucket")]
    key: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let args = Args::parse();
    let event = load_event(
        args.event.as_deref(),
        args.bucket.as_deref(),
        args.key.as_deref(),
    )?;

    // STORAGE_BACKEND=local with LOCAL_STORAGE_PATH works without AWS credentials
    let config = Config::from_env()?;
    let storage = create_storage(&config).await?;
    let handler = ResizeHandler::new(
        &config,
        storage,
        Arc::new(JpegResizer::new(config.jpeg_quality)),
    );

    let outcome = handler.handle(event).await?;
    println!("{}", serde_json::to_string_pretty(&outcome)?);

    Ok(())
}
