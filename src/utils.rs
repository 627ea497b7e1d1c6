//! Utility functions for text clean-up, key decoding and file system checks.
//!
//! This module provides helper functions used throughout the crate:
//! - Whitespace normalisation and title-casing for extracted headlines
//! - Headline normalisation for de-duplication
//! - Decoding of S3 notification keys
//! - String truncation for logging
//! - File system validation for the local object store

use once_cell::sync::Lazy;
use regex::Regex;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

use crate::error::{PipelineError, Result};

static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));
static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

/// Trim a string and collapse every whitespace run into a single space.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_text("  Nueva \n\t ley  "), "Nueva ley");
/// ```
pub fn clean_text(s: &str) -> String {
    WHITESPACE_RUN.replace_all(s.trim(), " ").into_owned()
}

/// Title-case a string the way section slugs are displayed.
///
/// Every letter that follows a non-letter is upper-cased and every letter that
/// follows a letter is lower-cased, so `"mundo eeuu"` becomes `"Mundo Eeuu"`
/// and `"top10news"` becomes `"Top10News"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Turn a URL path segment into a display category: dashes become spaces and
/// the result is title-cased.
pub fn category_from_segment(segment: &str) -> String {
    title_case(&segment.replace('-', " "))
}

/// Key used to detect the same headline written with different casing or
/// punctuation.
pub fn normalize_headline(headline: &str) -> String {
    PUNCTUATION
        .replace_all(&headline.to_lowercase(), "")
        .into_owned()
}

/// Decode an object key as delivered in an S3 event notification.
///
/// Keys are form-encoded: `+` stands for a space and everything else is
/// percent-encoded.
pub fn decode_object_key(raw: &str) -> Result<String> {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|decoded| decoded.into_owned())
        .map_err(|e| PipelineError::KeyDecode(format!("{raw}: {e}")))
}

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes (on a character
/// boundary) with an ellipsis and byte count indicator appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<()> {
    fs::create_dir_all(path).await?;
    // A small sync write using std fs has the simpler error surface
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}
