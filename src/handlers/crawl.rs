//! Catalog crawl trigger.
//!
//! Starts the crawler once for every record that is a headline table under
//! `final/`. A crawler that is already running, or that fails to start, never
//! fails the invocation: the next table write will trigger it again.

use tracing::{error, info, instrument, warn};

use crate::adapters::{CrawlStart, CrawlerStarter};
use crate::config::CrawlerConfig;
use crate::events::S3Event;
use crate::models::HandlerResponse;
use crate::storage_keys::is_headlines_csv;

pub const PROCESSED_BODY: &str = "Event processed.";

#[instrument(level = "info", skip_all, fields(records = event.records.len(), crawler = %config.crawler_name))]
pub async fn handle_crawl_event<C>(
    event: &S3Event,
    crawler: &C,
    config: &CrawlerConfig,
) -> HandlerResponse
where
    C: CrawlerStarter,
{
    for record in &event.records {
        let key = match record.decoded_key() {
            Ok(key) => key,
            Err(e) => {
                warn!(raw_key = %record.s3.object.key, error = %e, "Skipping undecodable key");
                continue;
            }
        };
        if !is_headlines_csv(&key) {
            info!(%key, "Ignored: not a headline table");
            continue;
        }

        match crawler.start_crawler(&config.crawler_name).await {
            Ok(CrawlStart::Started) => info!(%key, "Crawler started"),
            Ok(CrawlStart::AlreadyRunning) => info!(%key, "Crawler is already running"),
            Err(e) => error!(%key, error = %e, "Failed to start crawler"),
        }
    }

    HandlerResponse::ok(PROCESSED_BODY)
}
