use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

use news_headlines::adapters::aws::{load_sdk_config, LambdaInvoker, S3Store};
use news_headlines::config::ExtractConfig;
use news_headlines::events::S3Event;
use news_headlines::handlers::extract::handle_extract_event;
use news_headlines::models::HandlerResponse;
use news_headlines::telemetry;

async fn handle_request(
    event: LambdaEvent<Value>,
    store: &S3Store,
    invoker: &LambdaInvoker,
    config: &ExtractConfig,
) -> Result<HandlerResponse, Error> {
    let event: S3Event = serde_json::from_value(event.payload)
        .map_err(|error| Error::from(format!("invalid S3 event: {error}")))?;

    handle_extract_event(&event, store, invoker, config)
        .await
        .map_err(Error::from)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();

    let config = ExtractConfig::from_env()?;
    let sdk_config = load_sdk_config().await;
    let store = S3Store::new(&sdk_config);
    let invoker = LambdaInvoker::new(&sdk_config);
    info!(next = %config.next_function_name, "extract_headlines ready");

    let (store, invoker, config) = (&store, &invoker, &config);
    lambda_runtime::run(service_fn(move |event| async move {
        handle_request(event, store, invoker, config).await
    }))
    .await
}
