//! Object key naming conventions.
//!
//! The functions are chained purely by key layout: the fetcher writes under
//! `raw/`, the extractor reacts to `.html` objects and writes under `final/`,
//! and the crawler trigger reacts to `.csv` objects under `final/`.
//!
//! ```text
//! raw/contenido-eltiempo-2025-05-28-10-30.html
//! final/periodico=eltiempo/year=2025/month=05/day=28/titulares.csv
//! ```

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{PipelineError, Result};
use crate::models::Publisher;

pub const RAW_PREFIX: &str = "raw/";
pub const FINAL_PREFIX: &str = "final/";
pub const HEADLINES_FILE_NAME: &str = "titulares.csv";

/// Minute-resolution UTC timestamp embedded in raw keys.
pub const RAW_TIMESTAMP_FORMAT: &str = "%Y-%m-%d-%H-%M";

static KEY_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4}-\d{2}-\d{2})").expect("valid regex"));

pub fn raw_object_key(publisher: Publisher, fetched_at: DateTime<Utc>) -> String {
    format!(
        "{RAW_PREFIX}contenido-{}-{}.html",
        publisher.slug(),
        fetched_at.format(RAW_TIMESTAMP_FORMAT)
    )
}

pub fn is_raw_html(key: &str) -> bool {
    key.ends_with(".html")
}

/// Last path segment of a key with the `.html` extension removed.
pub fn file_stem(key: &str) -> &str {
    let name = key.rsplit('/').next().unwrap_or(key);
    name.strip_suffix(".html").unwrap_or(name)
}

/// Calendar date a raw page was captured on, read from its file name.
///
/// The first `YYYY-MM-DD` run in the file name is used; it must be a real
/// calendar date.
pub fn date_from_key(key: &str) -> Result<NaiveDate> {
    let stem = file_stem(key);
    let found = KEY_DATE
        .captures(stem)
        .and_then(|caps| caps.get(1))
        .ok_or_else(|| PipelineError::MissingDate(stem.to_string()))?;
    NaiveDate::parse_from_str(found.as_str(), "%Y-%m-%d")
        .map_err(|_| PipelineError::MissingDate(stem.to_string()))
}

/// Partitioned location of the headline table for one publisher and day.
pub fn headlines_object_key(publisher: Publisher, date: NaiveDate) -> String {
    format!(
        "{FINAL_PREFIX}periodico={}/year={}/month={:02}/day={:02}/{HEADLINES_FILE_NAME}",
        publisher.slug(),
        date.year(),
        date.month(),
        date.day()
    )
}

pub fn is_headlines_csv(key: &str) -> bool {
    key.starts_with(FINAL_PREFIX) && key.ends_with(".csv")
}
