//! Scrape orchestration: search, candidate walk, record emission.
//!
//! One logical task per invocation. Candidate pages are visited strictly
//! sequentially in source-page order; a failing candidate never aborts its
//! siblings. Search-level failures terminate the run with a single diagnostic
//! record rather than an error, so a consumer always sees at least one record
//! per invocation.

pub mod proxy;
pub mod sink;

pub use proxy::{FixedProxy, ProxyProvider};
pub use sink::{JsonLinesSink, MemorySink, RecordSink};

use chorus_core::{Error, LyricsRecord};

use crate::extract::{extract_candidates, extract_lyrics};
use crate::fetch::{FetchError, Fetcher};

/// Genius search endpoint.
const SEARCH_URL: &str = "https://genius.com/search";

/// Inputs for one scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeParams {
    /// Free-text search query.
    pub search_query: String,
    /// Upper bound on candidates visited.
    pub max_songs: usize,
}

/// Run one scrape, pushing records to `sink` as they become available.
///
/// Only sink failures and an empty query propagate as errors; every fetch
/// failure becomes a diagnostic record instead.
pub async fn run(
    fetcher: &dyn Fetcher, proxy: &dyn ProxyProvider, params: &ScrapeParams, sink: &mut dyn RecordSink,
) -> Result<(), Error> {
    if params.search_query.is_empty() {
        return Err(Error::InvalidInput("search_query is required".into()));
    }

    let search_url = search_url(&params.search_query);
    tracing::info!("search URL: {}", search_url);

    let proxy_url = match proxy.new_proxy_url().await {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!("failed to acquire proxy: {}", e);
            None
        }
    };
    match &proxy_url {
        Some(url) => tracing::info!("using proxy: {}", url),
        None => tracing::warn!("no proxy available, using direct connection"),
    }

    let search_html = match fetcher.fetch(&search_url, proxy_url.as_deref()).await {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!("failed to fetch search page: {}", e);
            sink.push(LyricsRecord::search_error(
                &params.search_query,
                &search_url,
                format!("Failed to fetch search page (status={})", status_label(&e)),
            ))
            .await?;
            return Ok(());
        }
    };

    let candidates = extract_candidates(&search_html, params.max_songs);
    tracing::info!("found {} candidates", candidates.len());

    if candidates.is_empty() {
        sink.push(LyricsRecord::search_error(
            &params.search_query,
            &search_url,
            "No candidates found on Genius search page".to_string(),
        ))
        .await?;
        return Ok(());
    }

    for candidate in &candidates {
        tracing::info!("fetching song page: {}", candidate.url);

        let record = match fetcher.fetch(&candidate.url, proxy_url.as_deref()).await {
            Ok(html) => LyricsRecord::song(
                &params.search_query,
                &candidate.song_title,
                &candidate.artist_name,
                &candidate.url,
                extract_lyrics(&html),
            ),
            Err(e) => {
                tracing::warn!("failed to fetch song page: {}", e);
                LyricsRecord::song_error(
                    &params.search_query,
                    &candidate.song_title,
                    &candidate.artist_name,
                    &candidate.url,
                    format!("Failed to fetch song page (status={})", status_label(&e)),
                )
            }
        };

        let lyrics_len = record.lyrics_text.len();
        sink.push(record).await?;
        tracing::info!(
            "pushed lyrics for {} - {} (len={})",
            candidate.artist_name,
            candidate.song_title,
            lyrics_len
        );
    }

    Ok(())
}

/// Search URL with the query form-encoded (spaces become `+`).
fn search_url(query: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(query.as_bytes()).collect();
    format!("{SEARCH_URL}?q={encoded}")
}

/// Status code as embedded in diagnostic strings; `none` when the failure
/// carried no status (timeouts, transport errors).
fn status_label(error: &FetchError) -> String {
    match error.status() {
        Some(status) => status.to_string(),
        None => "none".to_string(),
    }
}
