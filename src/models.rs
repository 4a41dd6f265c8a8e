//! Core data model for normalized news articles.
//!
//! Every source, whether scraped from a syndication feed or heuristically
//! extracted from raw HTML, produces the same [`Article`] record. Articles
//! are constructed once per run and never mutated afterwards; downstream
//! consumers (ranking, rendering) receive them by value.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Recency policy for articles without a parseable publication date.
///
/// Some feeds omit per-item dates and most listing pages carry no machine
/// readable timestamp at all. Dropping those entries would starve the
/// pipeline, so an unknown date is treated as "recent" and the article is
/// kept. This is a deliberate policy, not a fallthrough; see [`is_recent`].
pub const INCLUDE_UNDATED: bool = true;

/// A normalized news article.
///
/// # Invariants
///
/// * `title` and `source` are non-empty; extraction discards records that
///   cannot satisfy this.
/// * `link` is absolute when it could be resolved against the source's base
///   URL, and may be empty when no link was found.
/// * `fetched_at` is always set and is monotonically non-decreasing across
///   the articles of a single aggregation run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Article {
    /// The article headline.
    pub title: String,
    /// Absolute URL of the article, or empty if unresolved.
    pub link: String,
    /// Human-readable name of the configured source, copied verbatim.
    pub source: String,
    /// Publication timestamp, when one could be parsed.
    pub published_at: Option<DateTime<Utc>>,
    /// Plain-text summary with markup stripped; empty if unavailable.
    pub description: String,
    /// Wall-clock time at which this record was extracted.
    pub fetched_at: DateTime<Utc>,
}

/// Decide whether an article dated `published_at` survives the recency
/// cutoff.
///
/// Articles strictly older than `cutoff` are excluded; articles with no
/// parseable date follow [`INCLUDE_UNDATED`]. Both the feed parser and the
/// aggregator's heuristic-mode filter route through this single policy
/// point.
pub fn is_recent(published_at: Option<DateTime<Utc>>, cutoff: DateTime<Utc>) -> bool {
    match published_at {
        Some(ts) => ts >= cutoff,
        None => INCLUDE_UNDATED,
    }
}
