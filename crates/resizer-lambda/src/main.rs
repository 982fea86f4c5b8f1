use std::sync::Arc;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use resizer_core::Config;
use resizer_lambda::telemetry::{init_telemetry, LogFormat};
use resizer_lambda::{ResizeHandler, S3Event};
use resizer_processing::JpegResizer;
use resizer_storage::create_storage;
use serde_json::Value;
use tracing::Instrument;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_telemetry(LogFormat::from_env()?)?;

    let config = Config::from_env()?;

    // Built once per container and shared by every invocation
    let storage = create_storage(&config).await?;
    let resizer = Arc::new(JpegResizer::new(config.jpeg_quality));
    let handler = Arc::new(ResizeHandler::new(&config, storage, resizer));

    tracing::info!(
        environment = %config.environment,
        target_width = config.target_width,
        report_mode = %config.report_mode,
        storage_backend = %config.storage_backend,
        categories = ?config.categories.categories().collect::<Vec<_>>(),
        "Resizer Lambda starting"
    );

    lambda_runtime::run(service_fn(move |event: LambdaEvent<S3Event>| {
        let handler = Arc::clone(&handler);
        async move { function_handler(&handler, event).await }
    }))
    .await
}

async fn function_handler(
    handler: &ResizeHandler,
    event: LambdaEvent<S3Event>,
) -> Result<Value, Error> {
    let span = tracing::info_span!("invocation", request_id = %event.context.request_id);

    handler
        .handle(event.payload)
        .instrument(span)
        .await
        .map_err(Error::from)
}
