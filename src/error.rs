//! Error types for the harvest.
//!
//! [`Error`] covers the fatal paths: archive and issue listing, configuration,
//! and store IO. Anything that goes wrong while extracting a single paper is an
//! [`ExtractionFailure`] instead, which is logged, recorded in the crawl report
//! and never aborts the run.

use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Reqwest Error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("GET {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Io Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Json Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Yaml Error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Why a single paper produced no record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionFailure {
    #[error("'article_en' not found")]
    ArticleNotFound,

    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("timed out after {0}s")]
    Timeout(u64),
}

impl From<Error> for ExtractionFailure {
    fn from(value: Error) -> Self {
        ExtractionFailure::Fetch(value.to_string())
    }
}
