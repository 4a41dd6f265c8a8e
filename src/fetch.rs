//! HTTP fetching with bounded timeouts and a fixed identity header.
//!
//! The module uses a trait-based design so that everything above the
//! transport is testable without a network:
//!
//! - [`Fetch`]: core trait for retrieving bytes and probing existence
//! - [`HttpFetcher`]: the `reqwest`-backed production implementation
//!
//! There is deliberately no retry logic at this layer; a failed fetch is
//! final for its source on this run.

use crate::error::FetchError;
use std::time::Duration;
use tracing::{debug, instrument};

/// Identity header sent with every request. Some outlets reject clients
/// that do not present a browser-like User-Agent.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Timeout for content fetches.
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Shorter timeout for lightweight existence probes during feed discovery.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Trait for retrieving remote documents.
///
/// Implementors fetch raw bytes for a URL or answer a cheap existence
/// check. The aggregator and discoverer are generic over this trait, which
/// keeps them testable with canned responses.
pub trait Fetch {
    /// Fetch the document at `url`, returning its raw bytes.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;

    /// Lightweight existence check (HEAD-equivalent): does `url` answer
    /// with a success status? Any transport failure counts as "no".
    async fn probe(&self, url: &str) -> bool;
}

/// Production fetcher backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with the default content timeout.
    pub fn new() -> Self {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    /// Build a fetcher with a custom content timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .expect("reqwest client construction");
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        let bytes = response.bytes().await.map_err(FetchError::from_reqwest)?;
        debug!(bytes = bytes.len(), "Fetched document");
        Ok(bytes.to_vec())
    }

    #[instrument(level = "debug", skip_all, fields(%url))]
    async fn probe(&self, url: &str) -> bool {
        match self
            .client
            .head(url)
            .timeout(PROBE_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!(error = %e, "Probe failed");
                false
            }
        }
    }
}
