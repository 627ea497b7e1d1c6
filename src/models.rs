//! Data models shared by the scraping, extraction and trigger functions.
//!
//! - [`Publisher`]: the closed set of news sites the pipeline snapshots
//! - [`Headline`]: one extracted row of the headline table
//! - [`HandlerResponse`]: the `{statusCode, body}` shape every function returns

use serde::{Deserialize, Serialize};

/// A news site whose homepage is scraped.
///
/// The slug doubles as the naming-convention token: it appears in the raw
/// object key (`raw/contenido-{slug}-...`) and as the `periodico=` partition of
/// the headline table, and it is how the extractor recognises which parser to
/// run for an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Publisher {
    #[value(name = "eltiempo")]
    ElTiempo,
    #[value(name = "publimetro")]
    Publimetro,
}

impl Publisher {
    /// Every publisher, in the order they are fetched.
    pub const ALL: [Publisher; 2] = [Publisher::ElTiempo, Publisher::Publimetro];

    pub fn slug(&self) -> &'static str {
        match self {
            Publisher::ElTiempo => "eltiempo",
            Publisher::Publimetro => "publimetro",
        }
    }

    /// The homepage URL that is snapshotted.
    pub fn homepage(&self) -> &'static str {
        match self {
            Publisher::ElTiempo => "https://www.eltiempo.com",
            Publisher::Publimetro => "https://www.publimetro.co/",
        }
    }

    /// Origin used to absolutise relative article links.
    pub fn base_url(&self) -> &'static str {
        match self {
            Publisher::ElTiempo => "https://www.eltiempo.com",
            Publisher::Publimetro => "https://www.publimetro.co",
        }
    }

    /// Identify the publisher an object belongs to by its key.
    ///
    /// Matches on the slug appearing anywhere in the key; `eltiempo` wins when
    /// both appear.
    pub fn from_key(key: &str) -> Option<Publisher> {
        Publisher::ALL
            .into_iter()
            .find(|publisher| key.contains(publisher.slug()))
    }
}

impl std::fmt::Display for Publisher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// One row of the headline table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headline {
    /// Section the story is filed under (e.g. "Deportes").
    pub category: String,
    /// Headline text with whitespace normalised.
    pub headline: String,
    /// Absolute URL of the story.
    pub link: String,
}

/// Response returned to the Lambda runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

impl HandlerResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }

    pub fn status(status_code: u16, body: impl Into<String>) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }
}
