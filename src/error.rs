//! Error types for the scraping pipeline.
//!
//! Each layer owns a small error enum so that failure isolation is visible
//! in signatures instead of being buried in catch-all boxes:
//!
//! - [`FetchError`]: HTTP transport failures
//! - [`ParseError`]: syndication feed failures
//! - [`ExtractionError`]: heuristic HTML extraction failures
//! - [`ScrapeError`]: the per-source umbrella the aggregator catches
//!
//! All of these are recoverable at the [`crate::aggregator`] boundary: a
//! failing source is logged and contributes zero articles, and the run
//! continues with the remaining sources.

use thiserror::Error;

/// Failure while fetching a URL over HTTP.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    /// The request exceeded its deadline.
    #[error("request timed out")]
    Timeout,
    /// DNS, TLS, or socket-level failure before a status line was read.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    /// The server answered with a non-success status code.
    #[error("unexpected HTTP status {0}")]
    HttpStatus(u16),
}

impl FetchError {
    /// Classify a `reqwest` error into the transport taxonomy.
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Timeout
        } else {
            Self::ConnectionFailed(e.to_string())
        }
    }
}

/// Failure while parsing a syndication document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The document is not recognizable RSS or Atom.
    #[error("malformed feed document: {0}")]
    MalformedDocument(#[from] feed_rs::parser::ParseFeedError),
    /// The document parsed but declared zero entries.
    #[error("feed contains no entries")]
    NoEntries,
}

/// Failure while heuristically extracting articles from raw HTML.
#[derive(Debug, Error)]
pub enum ExtractionError {
    /// No element in the document matched any container pattern.
    #[error("no article containers matched any known pattern")]
    NoContainersFound,
    /// A container produced no title candidate passing the length gate.
    #[error("container yielded no qualifying title")]
    NoQualifyingTitle,
    /// A manually configured selector string failed to parse.
    #[error("invalid selector override: {0}")]
    InvalidSelector(String),
}

/// Everything that can go wrong while scraping a single source.
///
/// The aggregator matches on this to decide between a warning (expected,
/// e.g. an empty feed) and an error log (transport or parse trouble).
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}
