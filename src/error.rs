//! Error type shared by every handler and adapter.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Event contains no records")]
    EmptyEvent,

    #[error("Object key could not be decoded: {0}")]
    KeyDecode(String),

    #[error("Could not determine the publisher for object key {0}")]
    UnknownPublisher(String),

    #[error("No valid date found in file name {0}")]
    MissingDate(String),

    #[error("No headlines extracted from {0}")]
    NoHeadlines(String),

    #[error("{service} call failed: {message}")]
    Service {
        service: &'static str,
        message: String,
    },
}

impl PipelineError {
    /// Wrap a failure reported by one of the managed services.
    pub fn service(service: &'static str, error: impl std::fmt::Display) -> Self {
        Self::Service {
            service,
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
