//! Heuristic article extraction from arbitrary HTML.
//!
//! Used when a source has no syndication feed: guess which elements wrap
//! individual articles, then guess each article's fields, using ranked
//! selector chains tried in priority order with early exit.
//!
//! # Two-stage heuristic
//!
//! 1. **Container discovery** — structural and class-name patterns
//!    (`article`, `[class*="story"]`, ...) tried in order; the first
//!    pattern with at least one match wins, capped at the first
//!    [`MAX_CONTAINERS`] elements.
//! 2. **Per-container field extraction** — title, link, date, and
//!    description are each located by their own chain. A container that
//!    yields no qualifying title is discarded whole; every other field is
//!    optional.
//!
//! Length gates keep icon-only headings and boilerplate snippets out:
//! titles must exceed [`MIN_TITLE_LEN`] characters, descriptions
//! [`MIN_DESCRIPTION_LEN`].
//!
//! Manual mode ([`SelectorOverrides`]) collapses each chain to a single
//! fixed selector while keeping the identical gates, caps, and inclusion
//! logic.

use crate::config::{SelectorOverrides, SourceConfig};
use crate::dates::parse_loose;
use crate::error::ExtractionError;
use crate::models::Article;
use crate::utils::{normalize_ws, resolve_link};
use chrono::Utc;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument, warn};
use url::Url;

/// Upper bound on containers processed per page; listing pages with
/// hundreds of matches would otherwise dominate a run.
pub const MAX_CONTAINERS: usize = 30;

/// A title candidate must exceed this many characters after trimming.
pub const MIN_TITLE_LEN: usize = 10;

/// A description candidate must exceed this many characters after trimming.
pub const MIN_DESCRIPTION_LEN: usize = 20;

static CONTAINER_CHAIN: Lazy<Vec<Selector>> = Lazy::new(|| {
    parse_chain(&[
        "article",
        r#"[class*="article"]"#,
        r#"[class*="story"]"#,
        r#"[class*="post"]"#,
        r#"[class*="card"]"#,
        r#"[class*="item"]"#,
    ])
});

static TITLE_CHAIN: Lazy<Vec<Selector>> = Lazy::new(|| {
    parse_chain(&["h1", "h2", "h3", r#"[class*="title"]"#, r#"[class*="headline"]"#])
});

static DESCRIPTION_CHAIN: Lazy<Vec<Selector>> = Lazy::new(|| {
    parse_chain(&[
        "p",
        r#"[class*="description"]"#,
        r#"[class*="summary"]"#,
        r#"[class*="excerpt"]"#,
    ])
});

static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a[href]").unwrap());
static DATE_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("time").unwrap());

fn parse_chain(patterns: &[&str]) -> Vec<Selector> {
    patterns
        .iter()
        .map(|p| Selector::parse(p).unwrap())
        .collect()
}

/// The resolved selector plan for one source: either the built-in ranked
/// chains or single fixed selectors from configuration.
struct Plan {
    containers: Vec<Selector>,
    titles: Vec<Selector>,
    link: Selector,
    date: Selector,
    descriptions: Vec<Selector>,
}

impl Plan {
    fn auto() -> Self {
        Self {
            containers: CONTAINER_CHAIN.clone(),
            titles: TITLE_CHAIN.clone(),
            link: LINK_SELECTOR.clone(),
            date: DATE_SELECTOR.clone(),
            descriptions: DESCRIPTION_CHAIN.clone(),
        }
    }

    fn manual(overrides: &SelectorOverrides) -> Result<Self, ExtractionError> {
        let parse = |pattern: &str| {
            Selector::parse(pattern)
                .map_err(|_| ExtractionError::InvalidSelector(pattern.to_string()))
        };
        Ok(Self {
            containers: vec![parse(overrides.container_selector())?],
            titles: vec![parse(overrides.title_selector())?],
            link: parse(overrides.link_selector())?,
            date: parse(overrides.date_selector())?,
            descriptions: match overrides.description_selector() {
                Some(pattern) => vec![parse(pattern)?],
                None => Vec::new(),
            },
        })
    }
}

/// Extract articles from a raw HTML page.
///
/// Returns an empty list (not an error) when no container pattern matches
/// anything; a page without recognizable article markup is an expected
/// outcome. The recency cutoff is applied by the caller, which also owns
/// the best-effort date policy for heuristic articles.
///
/// # Errors
///
/// [`ExtractionError::InvalidSelector`] when a configured manual selector
/// does not parse as CSS.
#[instrument(level = "debug", skip_all, fields(source = %source.name))]
pub fn extract(html: &str, source: &SourceConfig) -> Result<Vec<Article>, ExtractionError> {
    let plan = match &source.selectors {
        Some(overrides) => Plan::manual(overrides)?,
        None => Plan::auto(),
    };

    let document = Html::parse_document(html);
    let containers = match find_containers(&document, &plan.containers) {
        Ok(containers) => containers,
        Err(ExtractionError::NoContainersFound) => {
            warn!(source = %source.name, "No article containers matched any pattern");
            return Ok(Vec::new());
        }
        Err(e) => return Err(e),
    };

    let base = Url::parse(&source.base_url).ok();
    let mut articles = Vec::new();
    for container in &containers {
        match extract_one(*container, &plan, &source.name, base.as_ref()) {
            Ok(article) => articles.push(article),
            Err(e) => debug!(source = %source.name, error = %e, "Skipping container"),
        }
    }

    debug!(
        source = %source.name,
        containers = containers.len(),
        articles = articles.len(),
        "Heuristic extraction finished"
    );
    Ok(articles)
}

/// First container pattern with at least one match wins; matches are capped
/// at [`MAX_CONTAINERS`].
fn find_containers<'a>(
    document: &'a Html,
    chain: &[Selector],
) -> Result<Vec<ElementRef<'a>>, ExtractionError> {
    for selector in chain {
        let matches: Vec<ElementRef<'a>> = document.select(selector).take(MAX_CONTAINERS).collect();
        if !matches.is_empty() {
            return Ok(matches);
        }
    }
    Err(ExtractionError::NoContainersFound)
}

fn extract_one(
    container: ElementRef<'_>,
    plan: &Plan,
    source_name: &str,
    base: Option<&Url>,
) -> Result<Article, ExtractionError> {
    let title = first_qualifying(container, &plan.titles, MIN_TITLE_LEN)
        .ok_or(ExtractionError::NoQualifyingTitle)?;

    let link = container
        .select(&plan.link)
        .next()
        .and_then(|anchor| anchor.value().attr("href"))
        .map(|href| resolve_link(href, base))
        .unwrap_or_default();

    // Machine-readable attribute preferred over the visible text.
    let raw_date = container.select(&plan.date).next().map(|el| {
        el.value()
            .attr("datetime")
            .map(str::to_string)
            .unwrap_or_else(|| element_text(el))
    });
    let published_at = raw_date.as_deref().and_then(parse_loose);

    let description =
        first_qualifying(container, &plan.descriptions, MIN_DESCRIPTION_LEN).unwrap_or_default();

    Ok(Article {
        title,
        link,
        source: source_name.to_string(),
        published_at,
        description,
        fetched_at: Utc::now(),
    })
}

/// Walk a selector chain, taking each selector's first match as its
/// candidate, and return the first candidate that clears the length gate.
fn first_qualifying(
    container: ElementRef<'_>,
    chain: &[Selector],
    min_len: usize,
) -> Option<String> {
    for selector in chain {
        if let Some(element) = container.select(selector).next() {
            let text = element_text(element);
            if text.chars().count() > min_len {
                return Some(text);
            }
        }
    }
    None
}

fn element_text(element: ElementRef<'_>) -> String {
    normalize_ws(&element.text().collect::<Vec<_>>().join(" "))
}
