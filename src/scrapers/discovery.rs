//! Syndication feed auto-discovery.
//!
//! Given a site's base URL, find its RSS or Atom feed without any
//! source-specific configuration. Markup hints are checked first (the
//! `<link type="application/rss+xml">` convention), then a fixed list of
//! conventional feed paths is probed with a short-timeout existence check.
//!
//! Absence of a feed is an expected outcome, not an error: the caller
//! falls back to heuristic HTML extraction when this module returns `None`.

use crate::fetch::Fetch;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::{debug, instrument};
use url::Url;

static RSS_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"link[type="application/rss+xml"]"#).unwrap());
static ATOM_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"link[type="application/atom+xml"]"#).unwrap());

/// Attempt to locate a feed for `base_url`.
///
/// Order, first match wins:
/// 1. an RSS `<link>` hint in the page markup,
/// 2. an Atom `<link>` hint,
/// 3. conventional paths (`/rss`, `/feed`, `/rss.xml`, `/feed.xml` under the
///    page, then `/rss` and `/feed` under the origin) probed with a
///    HEAD-equivalent check.
///
/// Returns `None` when the initial page fetch fails or every candidate
/// comes up empty.
#[instrument(level = "debug", skip_all, fields(%base_url))]
pub async fn discover<F: Fetch>(fetcher: &F, base_url: &str) -> Option<Url> {
    let base = Url::parse(base_url).ok()?;

    let body = match fetcher.fetch(base_url).await {
        Ok(body) => body,
        Err(e) => {
            debug!(error = %e, "Discovery fetch failed");
            return None;
        }
    };

    // Markup hints. The document must be dropped before any await point.
    {
        let html = String::from_utf8_lossy(&body);
        let document = Html::parse_document(&html);
        for selector in [&*RSS_LINK, &*ATOM_LINK] {
            let href = document
                .select(selector)
                .next()
                .and_then(|link| link.value().attr("href"));
            if let Some(href) = href {
                if let Ok(found) = base.join(href) {
                    debug!(feed = %found, "Feed advertised in markup");
                    return Some(found);
                }
            }
        }
    }

    // Conventional paths under the page, then under the origin.
    let page = base_url.trim_end_matches('/');
    let origin = base.origin().ascii_serialization();
    let candidates = [
        format!("{page}/rss"),
        format!("{page}/feed"),
        format!("{page}/rss.xml"),
        format!("{page}/feed.xml"),
        format!("{origin}/rss"),
        format!("{origin}/feed"),
    ];

    for candidate in &candidates {
        if fetcher.probe(candidate).await {
            debug!(feed = %candidate, "Feed found at conventional path");
            return Url::parse(candidate).ok();
        }
    }

    debug!("No feed discovered");
    None
}
