//! Aggregate report assembly.
//!
//! Chains the metadata lookup, the album lookup, and one scrape-actor call
//! per track. Per-track failures degrade to annotated rows; only the artist
//! and album steps are fatal.

use serde::Serialize;
use serde_json::{Value, json};

use chorus_core::AppConfig;
use chorus_core::config::ConfigError;

use crate::actor::ActorClient;
use crate::error::PipelineError;
use crate::llm::OllamaClient;
use crate::youtube;

/// Per-track lyrics row in the final report.
#[derive(Debug, Clone, Serialize)]
pub struct TrackLyrics {
    pub song_title: String,
    pub genius_url: Option<String>,
    pub lyrics_raw: String,
    pub error: Option<String>,
}

impl TrackLyrics {
    /// Row from the first dataset item of a scrape-actor run.
    ///
    /// Items are read loosely; a foreign or older actor version missing a
    /// field degrades that field rather than the whole row.
    fn from_dataset_item(song_title: &str, item: &Value) -> Self {
        Self {
            song_title: song_title.to_string(),
            genius_url: item.get("url").and_then(Value::as_str).map(str::to_string),
            lyrics_raw: item.get("lyricsText").and_then(Value::as_str).unwrap_or("").to_string(),
            error: item.get("error").and_then(Value::as_str).map(str::to_string),
        }
    }

    /// Degraded row when the actor run itself failed.
    fn degraded(song_title: &str, error: String) -> Self {
        Self { song_title: song_title.to_string(), genius_url: None, lyrics_raw: String::new(), error: Some(error) }
    }
}

/// Album summary in the final report.
#[derive(Debug, Clone, Serialize)]
pub struct AlbumSummary {
    pub artist: String,
    pub album_title: String,
    pub release_year: Option<i32>,
}

/// The aggregate output printed to stdout.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub input_video_url: String,
    pub artist: String,
    pub album: AlbumSummary,
    pub tracks: Vec<TrackLyrics>,
}

/// Build the aggregate report for one video URL.
pub async fn build_report(
    actor: &ActorClient, llm: &OllamaClient, config: &AppConfig, video_url: &str,
) -> Result<Report, PipelineError> {
    let youtube_actor_id = require_actor_id(&config.youtube_actor_id, "youtube_actor_id", "CHORUS_YOUTUBE_ACTOR_ID")?;
    let genius_actor_id = require_actor_id(&config.genius_actor_id, "genius_actor_id", "CHORUS_GENIUS_ACTOR_ID")?;

    let artist = youtube::artist_from_video(actor, youtube_actor_id, video_url).await?;
    tracing::info!("artist from video metadata: {}", artist);

    let album = llm.first_album(&artist).await?;
    tracing::info!("first album from LLM: {} ({:?})", album.album_title, album.release_year);

    let mut tracks = Vec::new();
    for track in &album.tracks {
        let title = track.trim();
        if title.is_empty() {
            continue;
        }
        tracing::info!("fetching lyrics for: {}", title);
        tracks.push(fetch_track_lyrics(actor, genius_actor_id, title, &artist).await);
    }

    Ok(Report {
        input_video_url: video_url.to_string(),
        artist,
        album: AlbumSummary { artist: album.artist, album_title: album.album_title, release_year: album.release_year },
        tracks,
    })
}

/// Look up lyrics for one track through the deployed scraper actor.
///
/// Transport failures degrade to an annotated row; they never abort the
/// remaining tracks.
async fn fetch_track_lyrics(actor: &ActorClient, actor_id: &str, song_title: &str, artist_name: &str) -> TrackLyrics {
    let search_query = format!("{song_title} {artist_name} lyrics");
    let payload = json!({
        "searchQuery": search_query,
        "maxSongs": 1,
        "start_urls": [{ "url": "https://genius.com" }],
    });

    let items = match actor.run_sync(actor_id, &payload).await {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("scrape actor call failed for {}: {}", song_title, e);
            return TrackLyrics::degraded(song_title, format!("Actor call failed: {e}"));
        }
    };

    match items.first() {
        Some(item) => TrackLyrics::from_dataset_item(song_title, item),
        None => TrackLyrics::degraded(song_title, "No items returned from lyrics actor".to_string()),
    }
}

fn require_actor_id<'a>(value: &'a str, field: &str, hint_var: &str) -> Result<&'a str, PipelineError> {
    if value.is_empty() {
        return Err(PipelineError::Config(ConfigError::Missing {
            field: field.to_string(),
            hint: format!("Set {hint_var} environment variable"),
        }));
    }
    Ok(value)
}
