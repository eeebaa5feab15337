//! chorus-pipeline entry point.
//!
//! Takes one video URL, derives the artist from its metadata, asks the model
//! for the artist's first album, fans out one lyric lookup per track, and
//! prints the aggregate report as JSON on stdout. Progress goes to stderr.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use chorus_core::AppConfig;

mod actor;
mod error;
mod llm;
mod report;
mod youtube;

use actor::{ActorClient, ActorConfig};
use llm::OllamaClient;

/// Build an album lyrics report from a video URL.
#[derive(Debug, Parser)]
#[command(name = "chorus-pipeline", version, about = "Build an album lyrics report from a video URL")]
struct Args {
    /// Video URL to derive the artist from.
    video_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    // Usage problems exit 1; --help and --version keep clap's stdout behavior.
    let args = Args::try_parse().unwrap_or_else(|e| {
        if e.use_stderr() {
            eprintln!("{e}");
            std::process::exit(1);
        }
        e.exit()
    });

    let config = AppConfig::load()?;

    tracing::info!("building album lyrics report for {}", args.video_url);

    let actor = ActorClient::new(ActorConfig {
        token: config.require_apify_token()?.to_string(),
        base_url: config.apify_base_url.clone(),
        timeout: config.actor_timeout(),
    })?;
    let llm = OllamaClient::new(config.ollama_url.clone(), config.llm_model.clone(), config.actor_timeout())?;

    let report = report::build_report(&actor, &llm, &config, &args.video_url).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
