//! Homepage fetching and per-publisher headline extraction.
//!
//! Each publisher module exports a pure `extract_headlines(html)` that turns
//! a homepage snapshot into a flat list of [`Headline`]s. Fetching is kept
//! separate so the snapshot can be stored before it is parsed.
//!
//! # Supported Sources
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | El Tiempo | [`eltiempo`] | Link heuristics, story containers, JSON-LD |
//! | Publimetro | [`publimetro`] | Component classes (`c-heading`, `c-link`, `c-overline`) |

pub mod eltiempo;
pub mod publimetro;

use std::time::Duration;

use tracing::{debug, instrument};

use crate::adapters::{FetchedPage, PageFetcher};
use crate::error::Result;
use crate::models::{Headline, Publisher};

/// Run the extractor that matches `publisher`.
pub fn extract_headlines(publisher: Publisher, html: &str) -> Vec<Headline> {
    match publisher {
        Publisher::ElTiempo => eltiempo::extract_headlines(html),
        Publisher::Publimetro => publimetro::extract_headlines(html),
    }
}

/// Plain HTTP GET over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        debug!(status, bytes = body.len(), "Fetched page");
        Ok(FetchedPage { status, body })
    }
}
