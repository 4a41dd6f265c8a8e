//! # newsharvest
//!
//! Collects recent news articles from a configured set of web sources and
//! normalizes them into uniform [`Article`](models::Article) records, using
//! either a source-provided RSS/Atom feed or, when none exists, heuristic
//! extraction from raw HTML.
//!
//! ## Features
//!
//! - Feed auto-discovery from page markup hints and conventional paths
//! - RSS and Atom parsing with a recency window and optimistic inclusion
//!   of undated entries
//! - Selector-free heuristic article extraction with ranked pattern
//!   chains, plus per-source manual selector overrides
//! - Per-source failure isolation: one broken source never aborts a run
//!
//! ## Architecture
//!
//! The pipeline is a pure transformation from HTTP responses to an
//! in-memory article list:
//!
//! 1. **Dispatch**: [`aggregator::SourceAggregator`] resolves each source
//!    to feed or heuristic mode (running [`scrapers::discovery`] when no
//!    feed URL is configured)
//! 2. **Extraction**: [`scrapers::feed`] or [`scrapers::heuristic`]
//!    produces normalized articles
//! 3. **Filtering**: articles older than the recency cutoff are dropped;
//!    undated articles are kept ([`models::INCLUDE_UNDATED`])
//!
//! Ranking, summarization, and rendering are downstream collaborators that
//! consume the `Vec<Article>` this crate produces.

pub mod aggregator;
pub mod cli;
pub mod config;
pub mod dates;
pub mod error;
pub mod fetch;
pub mod models;
pub mod scrapers;
pub mod utils;

pub use aggregator::SourceAggregator;
pub use config::{SelectorOverrides, SourceConfig};
pub use error::{ExtractionError, FetchError, ParseError, ScrapeError};
pub use fetch::{Fetch, HttpFetcher};
pub use models::Article;
