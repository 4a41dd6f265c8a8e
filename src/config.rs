//! Source configuration: which sites to scrape and how.
//!
//! Sources are declared in a YAML file with a top-level `sources` list:
//!
//! ```yaml
//! sources:
//!   - name: Example Wire
//!     base_url: https://wire.example
//!     feed_url: https://wire.example/rss.xml
//!   - name: Example Gazette
//!     base_url: https://gazette.example/news
//!   - name: Legacy Herald
//!     base_url: https://herald.example
//!     selectors:
//!       container: div.story-row
//!       title: span.headline
//! ```
//!
//! A source with a `feed_url` is scraped in feed mode directly. Without one,
//! feed auto-discovery runs first and heuristic HTML extraction is the
//! fallback. The optional `selectors` block pins one CSS selector per field
//! for pages whose markup defeats the generic heuristics.

use serde::{Deserialize, Serialize};
use std::error::Error;
use tracing::{info, instrument};

/// A single configured news source.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SourceConfig {
    /// Human-readable name, copied verbatim onto every emitted article.
    pub name: String,
    /// Base URL of the source; also the base for resolving relative links.
    pub base_url: String,
    /// Explicit syndication feed URL. Present means feed mode, skipping
    /// discovery entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feed_url: Option<String>,
    /// Manual CSS selector overrides; presence switches heuristic
    /// extraction into fixed-selector mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selectors: Option<SelectorOverrides>,
}

/// Fixed per-field CSS selectors for manual extraction mode.
///
/// Each field falls back to the conventional selector when omitted, so a
/// config only needs to pin the fields that differ. `description` has no
/// conventional default; omitting it leaves descriptions empty.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SelectorOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SelectorOverrides {
    /// Effective container selector.
    pub fn container_selector(&self) -> &str {
        self.container.as_deref().unwrap_or("article")
    }

    /// Effective title selector.
    pub fn title_selector(&self) -> &str {
        self.title.as_deref().unwrap_or("h2")
    }

    /// Effective link selector.
    pub fn link_selector(&self) -> &str {
        self.link.as_deref().unwrap_or("a")
    }

    /// Effective date selector.
    pub fn date_selector(&self) -> &str {
        self.date.as_deref().unwrap_or("time")
    }

    /// Effective description selector, if one was configured.
    pub fn description_selector(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[derive(Debug, Deserialize)]
struct SourcesFile {
    sources: Vec<SourceConfig>,
}

/// Load the source list from a YAML file.
#[instrument(level = "info", skip_all, fields(path = %path))]
pub fn load_sources(path: &str) -> Result<Vec<SourceConfig>, Box<dyn Error>> {
    let raw = std::fs::read_to_string(path)?;
    let file: SourcesFile = serde_yaml::from_str(&raw)?;
    info!(count = file.sources.len(), "Loaded source configuration");
    Ok(file.sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_feed_source() {
        let yaml = r#"
name: Example Wire
base_url: https://wire.example
feed_url: https://wire.example/rss.xml
"#;
        let source: SourceConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(source.name, "Example Wire");
        assert_eq!(source.feed_url.as_deref(), Some("https://wire.example/rss.xml"));
        assert!(source.selectors.is_none());
    }

    #[test]
    fn test_deserialize_heuristic_source() {
        let yaml = r#"
name: Example Gazette
base_url: https://gazette.example/news
"#;
        let source: SourceConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(source.feed_url.is_none());
        assert!(source.selectors.is_none());
    }

    #[test]
    fn test_selector_overrides_defaults() {
        let overrides = SelectorOverrides::default();
        assert_eq!(overrides.container_selector(), "article");
        assert_eq!(overrides.title_selector(), "h2");
        assert_eq!(overrides.link_selector(), "a");
        assert_eq!(overrides.date_selector(), "time");
        assert!(overrides.description_selector().is_none());
    }

    #[test]
    fn test_partial_selector_overrides() {
        let yaml = r#"
name: Legacy Herald
base_url: https://herald.example
selectors:
  container: div.story-row
  title: span.headline
"#;
        let source: SourceConfig = serde_yaml::from_str(yaml).unwrap();
        let overrides = source.selectors.unwrap();
        assert_eq!(overrides.container_selector(), "div.story-row");
        assert_eq!(overrides.title_selector(), "span.headline");
        // Unpinned fields keep the conventional defaults.
        assert_eq!(overrides.link_selector(), "a");
        assert_eq!(overrides.date_selector(), "time");
    }

    #[test]
    fn test_sources_file_list() {
        let yaml = r#"
sources:
  - name: A
    base_url: https://a.example
  - name: B
    base_url: https://b.example
    feed_url: https://b.example/feed
"#;
        let file: SourcesFile = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(file.sources.len(), 2);
        assert_eq!(file.sources[1].name, "B");
    }
}
