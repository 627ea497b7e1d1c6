//! El Tiempo homepage headline extraction.
//!
//! The homepage has no stable markup for stories, so candidates are gathered
//! from three overlapping sources and then filtered:
//!
//! 1. Every relative link that looks like an article path
//! 2. Links inside containers whose class suggests a story card
//! 3. `NewsArticle` entries in JSON-LD blocks
//!
//! # URL Pattern
//!
//! Article paths have at least two segments, e.g.
//! `/politica/congreso/nueva-ley-aprobada`. The first segment is the section
//! and becomes the category.

use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::models::{Headline, Publisher};
use crate::utils::{category_from_segment, clean_text, normalize_headline};

/// Path fragments that mark static assets rather than stories.
const ASSET_MARKERS: [&str; 7] = ["/images/", "/assets/", "/css/", "/js/", ".jpg", ".png", ".gif"];

const STORY_CONTAINER_SELECTORS: [&str; 6] = [
    "article a[href]",
    ".noticia a[href]",
    ".articulo a[href]",
    "[class*=\"headline\"] a[href]",
    "[class*=\"title\"] a[href]",
    "[class*=\"news\"] a[href]",
];

const JSON_LD_ARTICLE_TYPES: [&str; 2] = ["NewsArticle", "ReportageNewsArticle"];

/// Anchor text must be longer than this to be considered a headline at all.
const MIN_CANDIDATE_CHARS: usize = 10;
/// Final headlines must be longer than this.
const MIN_HEADLINE_CHARS: usize = 15;

static ANCHORS: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").expect("valid selector"));
static STORY_CONTAINERS: Lazy<Vec<Selector>> = Lazy::new(|| {
    STORY_CONTAINER_SELECTORS
        .iter()
        .map(|s| Selector::parse(s).expect("valid selector"))
        .collect()
});
static JSON_LD: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"script[type="application/ld+json"]"#).expect("valid selector")
});

/// Extract headlines from an El Tiempo homepage snapshot.
///
/// Returns an empty list for a page with no recognisable stories.
#[instrument(level = "info", skip_all, fields(bytes = html.len()))]
pub fn extract_headlines(html: &str) -> Vec<Headline> {
    let document = Html::parse_document(html);
    let mut candidates: Vec<Headline> = Vec::new();

    for anchor in document.select(&ANCHORS) {
        let href = anchor.value().attr("href").unwrap_or_default();
        if !is_article_path(href) || ASSET_MARKERS.iter().any(|m| href.contains(m)) {
            continue;
        }
        if let Some(headline) = headline_from_anchor(anchor, href) {
            push_unique(&mut candidates, headline);
        }
    }
    debug!(count = candidates.len(), "Candidates after link scan");

    for selector in STORY_CONTAINERS.iter() {
        for anchor in document.select(selector) {
            let href = anchor.value().attr("href").unwrap_or_default();
            if !is_article_path(href) {
                continue;
            }
            if let Some(headline) = headline_from_anchor(anchor, href) {
                push_unique(&mut candidates, headline);
            }
        }
    }
    debug!(count = candidates.len(), "Candidates after container scan");

    for script in document.select(&JSON_LD) {
        let raw = script.text().collect::<String>();
        let Ok(data) = serde_json::from_str::<Value>(&raw) else {
            debug!("Skipping unparseable JSON-LD block");
            continue;
        };
        let items = match data {
            Value::Array(items) => items,
            item @ Value::Object(_) => vec![item],
            _ => continue,
        };
        for item in &items {
            if let Some(headline) = headline_from_json_ld(item) {
                push_unique(&mut candidates, headline);
            }
        }
    }

    let headlines = candidates
        .into_iter()
        .filter(|h| h.headline.chars().count() > MIN_HEADLINE_CHARS)
        .unique_by(|h| normalize_headline(&h.headline))
        .collect::<Vec<_>>();

    info!(count = headlines.len(), "Extracted El Tiempo headlines");
    headlines
}

/// A site-relative path with at least two segments after the root.
fn is_article_path(href: &str) -> bool {
    href.starts_with('/') && href.split('/').count() >= 3
}

fn headline_from_anchor(anchor: ElementRef<'_>, href: &str) -> Option<Headline> {
    let text = anchor.text().collect::<String>();
    let text = text.trim();
    if text.chars().count() <= MIN_CANDIDATE_CHARS {
        return None;
    }
    let section = href.trim_matches('/').split('/').next().unwrap_or_default();
    Some(Headline {
        category: category_from_segment(section),
        headline: clean_text(text),
        link: format!("{}{}", Publisher::ElTiempo.base_url(), href),
    })
}

fn headline_from_json_ld(item: &Value) -> Option<Headline> {
    let kind = item.get("@type").and_then(Value::as_str)?;
    if !JSON_LD_ARTICLE_TYPES.contains(&kind) {
        return None;
    }
    let headline = item
        .get("headline")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())?;
    let url = item
        .get("mainEntityOfPage")
        .and_then(|page| page.get("@id"))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())?;

    let prefix = format!("{}/", Publisher::ElTiempo.base_url());
    let section = url.replace(&prefix, "");
    let section = section.split('/').next().unwrap_or_default();
    Some(Headline {
        category: category_from_segment(section),
        headline: headline.to_string(),
        link: url.to_string(),
    })
}

fn push_unique(headlines: &mut Vec<Headline>, headline: Headline) {
    if !headlines.contains(&headline) {
        headlines.push(headline);
    }
}
