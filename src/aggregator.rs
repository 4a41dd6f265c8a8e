//! Per-source orchestration with failure isolation.
//!
//! [`SourceAggregator`] walks the configured sources one at a time,
//! resolves each one to feed or heuristic mode, runs the matching
//! extraction, and concatenates the results. A failure in one source —
//! transport, parse, or extraction — is logged with the source's identity
//! and contributes zero articles; it never aborts the remaining sources.
//!
//! The only condition callers should treat as fatal is an empty aggregate
//! across *all* sources, and that decision belongs to the caller, not to
//! this module.

use crate::config::SourceConfig;
use crate::error::{ParseError, ScrapeError};
use crate::fetch::Fetch;
use crate::models::{is_recent, Article};
use crate::scrapers::{discovery, feed, heuristic};
use chrono::{DateTime, Duration, Utc};
use tracing::{error, info, instrument, warn};

/// Iterates configured sources and aggregates their articles.
pub struct SourceAggregator<F> {
    fetcher: F,
}

impl<F: Fetch> SourceAggregator<F> {
    /// Build an aggregator around a fetcher.
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Scrape every source, keeping articles from the last `window_hours`.
    ///
    /// Sources are processed sequentially and independently; per-source
    /// failures are converted to zero articles for that source. The
    /// returned list preserves source order, then document order within a
    /// source.
    #[instrument(level = "info", skip_all, fields(sources = sources.len(), window_hours))]
    pub async fn scrape_all(&self, sources: &[SourceConfig], window_hours: i64) -> Vec<Article> {
        let cutoff = Utc::now() - Duration::hours(window_hours);
        let mut all_articles = Vec::new();

        for source in sources {
            info!(source = %source.name, "Scraping source");
            match self.scrape_source(source, cutoff).await {
                Ok(articles) => {
                    info!(source = %source.name, count = articles.len(), "Source done");
                    all_articles.extend(articles);
                }
                Err(ScrapeError::Parse(ParseError::NoEntries)) => {
                    warn!(source = %source.name, "Feed reported zero entries; skipping source");
                }
                Err(e) => {
                    error!(
                        source = %source.name,
                        error = %e,
                        "Scrape failed; continuing with remaining sources"
                    );
                }
            }
        }

        info!(total = all_articles.len(), "Aggregation complete");
        all_articles
    }

    /// Resolve one source to feed or heuristic mode and run it.
    async fn scrape_source(
        &self,
        source: &SourceConfig,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Article>, ScrapeError> {
        if let Some(feed_url) = &source.feed_url {
            return self.scrape_feed(source, feed_url, cutoff).await;
        }

        if let Some(found) = discovery::discover(&self.fetcher, &source.base_url).await {
            info!(source = %source.name, feed = %found, "Auto-discovered feed");
            return self.scrape_feed(source, found.as_str(), cutoff).await;
        }

        self.scrape_html(source, cutoff).await
    }

    async fn scrape_feed(
        &self,
        source: &SourceConfig,
        feed_url: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Article>, ScrapeError> {
        let bytes = self.fetcher.fetch(feed_url).await?;
        let articles = feed::parse(&bytes, source, cutoff)?;
        Ok(articles)
    }

    async fn scrape_html(
        &self,
        source: &SourceConfig,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Article>, ScrapeError> {
        let bytes = self.fetcher.fetch(&source.base_url).await?;
        let html = String::from_utf8_lossy(&bytes);
        let extracted = heuristic::extract(&html, source)?;

        // The extractor leaves dates best-effort; the recency gate for
        // heuristic articles lives here, with undated articles kept.
        let before = extracted.len();
        let articles: Vec<Article> = extracted
            .into_iter()
            .filter(|article| is_recent(article.published_at, cutoff))
            .collect();
        if articles.len() < before {
            info!(
                source = %source.name,
                filtered = before - articles.len(),
                "Dropped heuristic articles older than the cutoff"
            );
        }
        Ok(articles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fetch::testing::StubFetcher;

    fn feed_source(name: &str, feed_url: &str) -> SourceConfig {
        SourceConfig {
            name: name.to_string(),
            base_url: "https://site.example/".to_string(),
            feed_url: Some(feed_url.to_string()),
            selectors: None,
        }
    }

    fn html_source(name: &str, base_url: &str) -> SourceConfig {
        SourceConfig {
            name: name.to_string(),
            base_url: base_url.to_string(),
            feed_url: None,
            selectors: None,
        }
    }

    fn rss_with_titles(titles: &[&str]) -> Vec<u8> {
        let now = Utc::now().to_rfc2822();
        let mut doc = String::from(
            r#"<?xml version="1.0"?><rss version="2.0"><channel><title>t</title>"#,
        );
        for title in titles {
            doc.push_str(&format!(
                "<item><title>{title}</title><pubDate>{now}</pubDate></item>"
            ));
        }
        doc.push_str("</channel></rss>");
        doc.into_bytes()
    }

    #[tokio::test]
    async fn test_source_failure_is_isolated() {
        // Source 2's fetch fails at the transport level; 1 and 3 still land.
        let fetcher = StubFetcher::new()
            .with_body(
                "https://one.example/feed.xml",
                rss_with_titles(&["First source headline story"]),
            )
            .with_error(
                "https://two.example/feed.xml",
                FetchError::ConnectionFailed("refused".into()),
            )
            .with_body(
                "https://three.example/feed.xml",
                rss_with_titles(&["Third source headline story"]),
            );

        let aggregator = SourceAggregator::new(fetcher);
        let sources = vec![
            feed_source("One", "https://one.example/feed.xml"),
            feed_source("Two", "https://two.example/feed.xml"),
            feed_source("Three", "https://three.example/feed.xml"),
        ];

        let articles = aggregator.scrape_all(&sources, 24).await;
        let sources_seen: Vec<&str> = articles.iter().map(|a| a.source.as_str()).collect();
        assert_eq!(sources_seen, vec!["One", "Three"]);
    }

    #[tokio::test]
    async fn test_explicit_feed_url_skips_discovery() {
        // Only the feed URL is stubbed; touching the base page would fail.
        let fetcher = StubFetcher::new().with_body(
            "https://one.example/feed.xml",
            rss_with_titles(&["A headline from the feed"]),
        );

        let aggregator = SourceAggregator::new(fetcher);
        let sources = vec![feed_source("One", "https://one.example/feed.xml")];

        let articles = aggregator.scrape_all(&sources, 24).await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "A headline from the feed");
    }

    #[tokio::test]
    async fn test_discovered_feed_preferred_over_heuristics() {
        let html = r#"<html><head>
            <link rel="alternate" type="application/rss+xml" href="/discovered.xml">
        </head><body>
            <article><h2>This heuristic headline should not appear</h2></article>
        </body></html>"#;
        let fetcher = StubFetcher::new()
            .with_body("https://site.example/", html.as_bytes().to_vec())
            .with_body(
                "https://site.example/discovered.xml",
                rss_with_titles(&["Headline from the discovered feed"]),
            );

        let aggregator = SourceAggregator::new(fetcher);
        let sources = vec![html_source("Gazette", "https://site.example/")];

        let articles = aggregator.scrape_all(&sources, 24).await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Headline from the discovered feed");
    }

    #[tokio::test]
    async fn test_heuristic_fallback_when_no_feed() {
        let html = r#"<html><body>
            <article>
                <h2>Heuristic headline about the harbor</h2>
                <a href="/harbor">read</a>
            </article>
        </body></html>"#;
        let fetcher =
            StubFetcher::new().with_body("https://site.example/", html.as_bytes().to_vec());

        let aggregator = SourceAggregator::new(fetcher);
        let sources = vec![html_source("Gazette", "https://site.example/")];

        let articles = aggregator.scrape_all(&sources, 24).await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Heuristic headline about the harbor");
        assert_eq!(articles[0].link, "https://site.example/harbor");
    }

    #[tokio::test]
    async fn test_heuristic_recency_filter_with_optimistic_inclusion() {
        let stale = (Utc::now() - Duration::hours(48)).to_rfc3339();
        let html = format!(
            r#"<html><body>
            <article>
                <h2>Stale dated heuristic headline</h2>
                <time datetime="{stale}">long ago</time>
            </article>
            <article>
                <h2>Undated heuristic headline kept</h2>
            </article>
        </body></html>"#
        );
        let fetcher =
            StubFetcher::new().with_body("https://site.example/", html.as_bytes().to_vec());

        let aggregator = SourceAggregator::new(fetcher);
        let sources = vec![html_source("Gazette", "https://site.example/")];

        let articles = aggregator.scrape_all(&sources, 24).await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "Undated heuristic headline kept");
    }

    #[tokio::test]
    async fn test_empty_feed_counts_as_zero_articles() {
        let fetcher = StubFetcher::new()
            .with_body("https://one.example/feed.xml", rss_with_titles(&[]))
            .with_body(
                "https://three.example/feed.xml",
                rss_with_titles(&["Surviving source headline"]),
            );

        let aggregator = SourceAggregator::new(fetcher);
        let sources = vec![
            feed_source("Empty", "https://one.example/feed.xml"),
            feed_source("Full", "https://three.example/feed.xml"),
        ];

        let articles = aggregator.scrape_all(&sources, 24).await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].source, "Full");
    }

    #[tokio::test]
    async fn test_fetched_at_monotonic_within_run() {
        let fetcher = StubFetcher::new()
            .with_body(
                "https://one.example/feed.xml",
                rss_with_titles(&["First headline long enough", "Second headline long enough"]),
            )
            .with_body(
                "https://three.example/feed.xml",
                rss_with_titles(&["Third headline long enough"]),
            );

        let aggregator = SourceAggregator::new(fetcher);
        let sources = vec![
            feed_source("One", "https://one.example/feed.xml"),
            feed_source("Two", "https://three.example/feed.xml"),
        ];

        let articles = aggregator.scrape_all(&sources, 24).await;
        assert_eq!(articles.len(), 3);
        for pair in articles.windows(2) {
            assert!(pair[0].fetched_at <= pair[1].fetched_at);
        }
    }

    #[tokio::test]
    async fn test_all_sources_failing_yields_empty_aggregate() {
        let fetcher = StubFetcher::new();
        let aggregator = SourceAggregator::new(fetcher);
        let sources = vec![
            feed_source("One", "https://one.example/feed.xml"),
            html_source("Two", "https://two.example/"),
        ];

        let articles = aggregator.scrape_all(&sources, 24).await;
        assert!(articles.is_empty());
    }
}
