//! Artist lookup through the video-metadata actor.

use serde_json::{Value, json};

use crate::actor::ActorClient;
use crate::error::PipelineError;

/// Metadata fields that may carry the channel or uploader name, in priority
/// order.
const ARTIST_FIELDS: [&str; 4] = ["channelTitle", "channelName", "uploader", "author"];

/// Derive the artist name from a video URL via the metadata actor.
///
/// Fails when the actor returns no items or no item field yields a usable
/// name; there is nothing to scrape without one.
pub async fn artist_from_video(actor: &ActorClient, actor_id: &str, video_url: &str) -> Result<String, PipelineError> {
    let payload = json!({
        "startUrls": [{ "url": video_url }],
        "maxResults": 1,
        "maxResultsShorts": 0,
        "maxResultStreams": 0,
    });

    let items = actor.run_sync(actor_id, &payload).await?;
    artist_from_items(&items)
}

/// First non-empty name field of the first item.
fn artist_from_items(items: &[Value]) -> Result<String, PipelineError> {
    let first = items.first().ok_or(PipelineError::EmptyDataset)?;

    let artist = ARTIST_FIELDS
        .iter()
        .filter_map(|field| first.get(field).and_then(Value::as_str))
        .map(str::trim)
        .find(|name| !name.is_empty())
        .ok_or(PipelineError::MissingArtist)?;

    Ok(artist.to_string())
}
