//! Page fetching.
//!
//! Every stage of the crawl needs the same thing from the network: the body of
//! a page as text. That is captured by the [`PageSource`] trait so the stages
//! and the pipeline can be driven by a fixture in tests, with [`HttpFetcher`]
//! as the real implementation.
//!
//! A failed GET is reported to the caller once, without retry; the caller
//! decides whether it is fatal.

use crate::error::{Error, Result};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Something that can return the HTML of a URL.
pub trait PageSource {
    /// Fetch `url` and return its body as text.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// [`PageSource`] backed by a shared `reqwest::Client`.
///
/// Requests are plain GETs with no custom headers. Each request is bounded by
/// the client timeout, and any non-2xx status is turned into
/// [`Error::Status`].
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }
}

impl fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl PageSource for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<String> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            warn!(
                elapsed_ms = t0.elapsed().as_millis() as u64,
                status = status.as_u16(),
                "GET returned non-success status"
            );
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response.text().await?;
        debug!(
            elapsed_ms = t0.elapsed().as_millis() as u64,
            bytes = body.len(),
            "Fetched page"
        );
        Ok(body)
    }
}
