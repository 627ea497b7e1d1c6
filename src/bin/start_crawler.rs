use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::info;

use news_headlines::adapters::aws::{load_sdk_config, GlueCrawler};
use news_headlines::config::CrawlerConfig;
use news_headlines::events::S3Event;
use news_headlines::handlers::crawl::handle_crawl_event;
use news_headlines::models::HandlerResponse;
use news_headlines::telemetry;

async fn handle_request(
    event: LambdaEvent<Value>,
    crawler: &GlueCrawler,
    config: &CrawlerConfig,
) -> Result<HandlerResponse, Error> {
    let event: S3Event = serde_json::from_value(event.payload)
        .map_err(|error| Error::from(format!("invalid S3 event: {error}")))?;

    Ok(handle_crawl_event(&event, crawler, config).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    telemetry::init();

    let config = CrawlerConfig::from_env()?;
    let crawler = GlueCrawler::new(&load_sdk_config().await);
    info!(crawler = %config.crawler_name, "start_crawler ready");

    let (crawler, config) = (&crawler, &config);
    lambda_runtime::run(service_fn(move |event| async move {
        handle_request(event, crawler, config).await
    }))
    .await
}
