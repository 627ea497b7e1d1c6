//! Homepage snapshot function.
//!
//! Downloads every publisher's homepage and stores the raw HTML under
//! `raw/`, which in turn triggers headline extraction. A publisher that
//! cannot be fetched is logged and skipped; the others are still stored.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::adapters::{ObjectStore, PageFetcher};
use crate::error::Result;
use crate::models::{HandlerResponse, Publisher};
use crate::storage_keys::raw_object_key;

const HTML_CONTENT_TYPE: &str = "text/html";

/// What happened to each publisher in one run.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct FetchSummary {
    pub uploaded: Vec<String>,
    pub failed: Vec<Publisher>,
}

#[instrument(level = "info", skip(fetcher, store))]
pub async fn handle_fetch<F, S>(
    fetcher: &F,
    store: &S,
    bucket: &str,
    fetched_at: DateTime<Utc>,
) -> Result<HandlerResponse>
where
    F: PageFetcher,
    S: ObjectStore,
{
    let outcomes = join_all(Publisher::ALL.into_iter().map(|publisher| async move {
        (publisher, fetch_one(fetcher, store, bucket, publisher, fetched_at).await)
    }))
    .await;

    let mut summary = FetchSummary::default();
    for (publisher, outcome) in outcomes {
        match outcome {
            Some(key) => summary.uploaded.push(key),
            None => summary.failed.push(publisher),
        }
    }

    info!(
        uploaded = summary.uploaded.len(),
        failed = summary.failed.len(),
        "Homepage snapshot complete"
    );
    Ok(HandlerResponse::ok(serde_json::to_string(&summary)?))
}

/// Fetch and store one homepage, returning the stored key.
async fn fetch_one<F, S>(
    fetcher: &F,
    store: &S,
    bucket: &str,
    publisher: Publisher,
    fetched_at: DateTime<Utc>,
) -> Option<String>
where
    F: PageFetcher,
    S: ObjectStore,
{
    let url = publisher.homepage();
    let page = match fetcher.fetch(url).await {
        Ok(page) => page,
        Err(e) => {
            error!(%publisher, %url, error = %e, "Failed to download homepage");
            return None;
        }
    };
    if page.status != 200 {
        error!(%publisher, %url, status = page.status, "Homepage returned a non-200 status");
        return None;
    }

    let key = raw_object_key(publisher, fetched_at);
    match store
        .put_object(bucket, &key, page.body, HTML_CONTENT_TYPE)
        .await
    {
        Ok(()) => {
            info!(%publisher, location = %format!("s3://{bucket}/{key}"), "Uploaded homepage");
            Some(key)
        }
        Err(e) => {
            error!(%publisher, %key, error = %e, "Failed to store homepage");
            None
        }
    }
}
