//! Binary shell: load sources, run one aggregation pass, write JSON.

use clap::Parser;
use newsharvest::cli::Cli;
use newsharvest::{config, HttpFetcher, SourceAggregator};
use std::error::Error;
use tracing::{error, info};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("newsharvest starting up");

    let args = Cli::parse();
    let sources = config::load_sources(&args.sources)?;
    info!(count = sources.len(), window_hours = args.hours, "Sources loaded");

    let aggregator = SourceAggregator::new(HttpFetcher::new());
    let articles = aggregator.scrape_all(&sources, args.hours).await;

    if articles.is_empty() {
        error!("No articles found across any source; check feed URLs or widen --hours");
        return Err("no articles found".into());
    }

    let json = serde_json::to_string_pretty(&articles)?;
    tokio::fs::write(&args.output, json).await?;
    info!(path = %args.output, count = articles.len(), "Wrote article list");

    let elapsed = start_time.elapsed();
    info!(secs = elapsed.as_secs(), millis = elapsed.subsec_millis(), "Execution complete");

    Ok(())
}
