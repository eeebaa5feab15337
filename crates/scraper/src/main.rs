//! chorus-scrape entry point.
//!
//! Runs one scrape and prints newline-delimited JSON records to stdout.
//! Logging goes to stderr so stdout stays machine-readable.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chorus_client::fetch::{FetchClient, FetchConfig};
use chorus_client::scrape::{self, FixedProxy, JsonLinesSink, ScrapeParams};
use chorus_core::AppConfig;

/// Scrape Genius lyrics for a search query.
#[derive(Debug, Parser)]
#[command(name = "chorus-scrape", version, about = "Scrape Genius lyrics for a search query")]
struct Args {
    /// Free-text search query.
    #[arg(long)]
    query: String,

    /// Maximum number of candidate songs to visit.
    #[arg(long, default_value_t = 1)]
    max_songs: usize,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = AppConfig::load()?;

    tracing::info!("starting scrape: query={:?} max_songs={}", args.query, args.max_songs);

    let fetcher = FetchClient::new(FetchConfig {
        user_agent: config.user_agent.clone(),
        accept_language: config.accept_language.clone(),
        timeout: config.timeout(),
    });
    let proxy = FixedProxy::new(config.proxy_url.clone());
    let params = ScrapeParams { search_query: args.query, max_songs: args.max_songs };
    let mut sink = JsonLinesSink::new(std::io::stdout());

    scrape::run(&fetcher, &proxy, &params, &mut sink).await?;

    Ok(())
}
