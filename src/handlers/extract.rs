//! Headline extraction function.
//!
//! Triggered by a raw homepage landing in the bucket. Parses the page with
//! the publisher's rules, writes the headline table next to it under
//! `final/`, then hands off to the next function in the chain.
//!
//! # Failure modes
//!
//! Objects that are not `.html` are acknowledged and ignored. An object whose
//! key names no known publisher or carries no date, or a page that yields no
//! headlines, fails the invocation so it surfaces in the function's error
//! metrics.

use tokio::time::sleep;
use tracing::{debug, info, instrument, warn};

use crate::adapters::{FunctionInvoker, ObjectStore};
use crate::config::ExtractConfig;
use crate::error::{PipelineError, Result};
use crate::events::S3Event;
use crate::models::{HandlerResponse, Publisher};
use crate::outputs::csv::{headlines_to_csv, CONTENT_TYPE};
use crate::scrapers;
use crate::storage_keys::{date_from_key, headlines_object_key, is_raw_html};
use crate::utils::truncate_for_log;

/// Payload sent to the next function.
const NEXT_FUNCTION_PAYLOAD: &[u8] = b"{}";

#[instrument(level = "info", skip_all, fields(records = event.records.len()))]
pub async fn handle_extract_event<S, I>(
    event: &S3Event,
    store: &S,
    invoker: &I,
    config: &ExtractConfig,
) -> Result<HandlerResponse>
where
    S: ObjectStore,
    I: FunctionInvoker,
{
    let record = event.records.first().ok_or(PipelineError::EmptyEvent)?;
    if event.records.len() > 1 {
        warn!(
            ignored = event.records.len() - 1,
            "Event carries several records; only the first is processed"
        );
    }
    let bucket = record.bucket();
    let key = record.decoded_key()?;

    if !is_raw_html(&key) {
        info!(%key, "Ignored: object is not HTML");
        return Ok(HandlerResponse::ok(format!("Ignored file: {key}")));
    }

    let publisher =
        Publisher::from_key(&key).ok_or_else(|| PipelineError::UnknownPublisher(key.clone()))?;
    let date = date_from_key(&key)?;
    info!(%bucket, %key, %publisher, %date, "Processing homepage snapshot");

    let body = store.get_object(bucket, &key).await?;
    let html = String::from_utf8_lossy(&body);
    debug!(preview = %truncate_for_log(&html, 200), "Downloaded homepage");

    let headlines = scrapers::extract_headlines(publisher, &html);
    if headlines.is_empty() {
        return Err(PipelineError::NoHeadlines(key));
    }

    let output_key = headlines_object_key(publisher, date);
    let table = headlines_to_csv(&headlines)?;
    store
        .put_object(bucket, &output_key, table, CONTENT_TYPE)
        .await?;
    info!(%output_key, rows = headlines.len(), "Wrote headline table");

    // Give the table time to settle before the next function reads the bucket
    let delay = config.invoke_delay();
    if !delay.is_zero() {
        debug!(?delay, "Waiting before invoking the next function");
        sleep(delay).await;
    }
    invoker
        .invoke_async(&config.next_function_name, NEXT_FUNCTION_PAYLOAD)
        .await?;
    info!(function = %config.next_function_name, "Invoked next function");

    Ok(HandlerResponse::ok(format!(
        "Processed file saved to {output_key}"
    )))
}
