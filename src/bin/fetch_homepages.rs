use chrono::Utc;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

use news_headlines::adapters::aws::{load_sdk_config, S3Store};
use news_headlines::config::FetchConfig;
use news_headlines::handlers::fetch::handle_fetch;
use news_headlines::models::HandlerResponse;
use news_headlines::scrapers::HttpFetcher;
use news_headlines::telemetry;

async fn handle_request(
    _event: LambdaEvent<Value>,
    fetcher: &HttpFetcher,
    store: &S3Store,
    config: &FetchConfig,
) -> Result<HandlerResponse, Error> {
    handle_fetch(fetcher, store, &config.bucket, Utc::now())
        .await
        .map_err(Error::from)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();

    let config = FetchConfig::from_env()?;
    let fetcher = HttpFetcher::new(config.http_timeout())?;
    let store = S3Store::new(&load_sdk_config().await);
    info!(bucket = %config.bucket, "fetch_homepages ready");

    let (fetcher, store, config) = (&fetcher, &store, &config);
    lambda_runtime::run(service_fn(move |event| async move {
        handle_request(event, fetcher, store, config).await
    }))
    .await
}
