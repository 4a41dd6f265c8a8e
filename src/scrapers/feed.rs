//! Syndication feed parsing with recency filtering.
//!
//! Turns an RSS or Atom document into normalized [`Article`] records. The
//! `feed-rs` parser handles both formats uniformly, so there is a single
//! code path regardless of what discovery or configuration handed us.
//!
//! # Inclusion policy
//!
//! An entry is excluded only when it carries a parseable timestamp that is
//! strictly older than the cutoff. Entries without any timestamp are kept:
//! some feeds omit per-item dates, and silently dropping them would starve
//! the pipeline (see [`crate::models::INCLUDE_UNDATED`]).

use crate::config::SourceConfig;
use crate::error::ParseError;
use crate::models::{is_recent, Article};
use crate::utils::{resolve_link, strip_html, truncate_for_log};
use chrono::{DateTime, Utc};
use feed_rs::parser;
use tracing::{debug, instrument, warn};
use url::Url;

/// Parse a feed document into articles newer than `cutoff`.
///
/// # Errors
///
/// * [`ParseError::MalformedDocument`] when the bytes are not recognizable
///   RSS or Atom.
/// * [`ParseError::NoEntries`] when the feed parsed but declared zero
///   entries.
///
/// Both are recoverable: the aggregator logs them and moves on to the next
/// source.
#[instrument(level = "debug", skip_all, fields(source = %source.name))]
pub fn parse(
    bytes: &[u8],
    source: &SourceConfig,
    cutoff: DateTime<Utc>,
) -> Result<Vec<Article>, ParseError> {
    let feed = match parser::parse(bytes) {
        Ok(feed) => feed,
        Err(e) => {
            warn!(
                source = %source.name,
                preview = %truncate_for_log(&String::from_utf8_lossy(bytes), 200),
                "Document is not a parseable feed"
            );
            return Err(e.into());
        }
    };

    let total = feed.entries.len();
    if total == 0 {
        return Err(ParseError::NoEntries);
    }

    let base = Url::parse(&source.base_url).ok();
    let mut articles = Vec::new();
    let mut filtered = 0usize;

    for entry in feed.entries {
        // Prefer the explicit publication timestamp over the last-updated one.
        let published_at = entry.published.or(entry.updated);
        if !is_recent(published_at, cutoff) {
            filtered += 1;
            continue;
        }

        let title = entry
            .title
            .map(|t| t.content.trim().to_string())
            .unwrap_or_default();
        if title.is_empty() {
            debug!(source = %source.name, "Discarding feed entry without a title");
            continue;
        }

        let link = entry
            .links
            .first()
            .map(|l| resolve_link(&l.href, base.as_ref()))
            .unwrap_or_default();

        let description = entry
            .summary
            .map(|t| strip_html(&t.content))
            .unwrap_or_default();

        articles.push(Article {
            title,
            link,
            source: source.name.clone(),
            published_at,
            description,
            fetched_at: Utc::now(),
        });
    }

    debug!(
        source = %source.name,
        total,
        filtered,
        kept = articles.len(),
        "Parsed feed"
    );

    if filtered > 0 && articles.is_empty() {
        warn!(
            source = %source.name,
            total,
            "Every feed entry is older than the cutoff; consider widening the time window"
        );
    }

    Ok(articles)
}
