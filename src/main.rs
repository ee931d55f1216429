use std::path::Path;

use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use micscraper::pipeline;
use micscraper::publish::S3Store;
use micscraper::settings::Settings;

/// Nobody consumes this; outcomes are reported through the logs.
#[derive(Serialize)]
struct HandlerResponse {
    status: &'static str,
}

/// Entry point for one scheduled invocation. Event and context are opaque
/// and ignored; the invocation always completes cleanly, whatever the
/// pipeline ran into.
async fn handle_request(_event: LambdaEvent<serde_json::Value>) -> Result<HandlerResponse, Error> {
    let settings = Settings::resolve();
    info!(
        url = %settings.file_url,
        sheet = %settings.xls_sheet_name,
        bucket = %settings.s3_bucket,
        region = %settings.s3_region,
        "starting run"
    );

    let store = S3Store::new(&settings.s3_bucket, &settings.s3_region).await;
    pipeline::run(&settings, Path::new(pipeline::STAGING_DIR), &store).await;

    Ok(HandlerResponse { status: "done" })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    lambda_runtime::run(service_fn(handle_request)).await
}
