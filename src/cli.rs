//! Command-line interface definitions.
//!
//! The binary is a thin shell over the library: it loads a source list,
//! runs one aggregation pass, and writes the article list as JSON for
//! whatever consumes it next.

use clap::Parser;

/// Command-line arguments for the newsharvest binary.
///
/// # Examples
///
/// ```sh
/// # Scrape the configured sources for the last 24 hours
/// newsharvest --sources sources.yaml --output articles.json
///
/// # Widen the window when feeds publish infrequently
/// newsharvest --sources sources.yaml --hours 72 --output articles.json
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the YAML file declaring the news sources
    #[arg(short, long, default_value = "sources.yaml")]
    pub sources: String,

    /// Only include articles published within the last N hours
    #[arg(long, env = "NEWSHARVEST_HOURS", default_value_t = 24)]
    pub hours: i64,

    /// Output path for the aggregated article list (JSON)
    #[arg(short, long, default_value = "articles.json")]
    pub output: String,
}
