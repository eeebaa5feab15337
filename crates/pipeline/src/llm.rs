//! First-album lookup through a local Ollama model.

use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use crate::error::PipelineError;

/// Album description produced by the model.
///
/// Only `tracks` is load-bearing; the other fields pass through to the report
/// and default when a small model drops them.
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumInfo {
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album_title: String,
    #[serde(default)]
    pub release_year: Option<i32>,
    pub tracks: Vec<String>,
}

/// Client for the Ollama generate API.
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    /// Create a new client against `base_url` using `model`.
    pub fn new(base_url: String, model: String, timeout: Duration) -> Result<Self, PipelineError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url, model })
    }

    /// Run one non-streaming generation and parse the answer as JSON.
    ///
    /// Models wrap JSON in prose more often than not, so the object is carved
    /// out between the first `{` and the last `}` before parsing.
    pub async fn generate_json(&self, prompt: &str) -> Result<Value, PipelineError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "prompt": prompt,
            "stream": false,
        });

        tracing::debug!("generating with model {}", self.model);

        let response = self.http.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PipelineError::Http { status: status.as_u16() });
        }

        let data: Value = response.json().await?;
        let text = data.get("response").and_then(Value::as_str).unwrap_or("").trim().to_string();

        parse_json_object(&text)
    }

    /// First studio album and ordered track list for `artist`.
    pub async fn first_album(&self, artist: &str) -> Result<AlbumInfo, PipelineError> {
        let value = self.generate_json(&album_prompt(artist)).await?;
        album_from_value(value)
    }
}

/// Prompt asking for the artist's first studio album as bare JSON.
fn album_prompt(artist: &str) -> String {
    format!(
        r#"You are a music expert.

For the artist "{artist}", identify their FIRST official studio album
(ignore EPs, live albums, compilations, reissues). Then list all songs in
that album in correct order.

You MUST use real, known song titles for this artist. Do NOT invent
placeholders like "Song 1" or tracks from unrelated artists or albums.

Return ONLY JSON with this exact structure (no explanations, no markdown):

{{
  "artist": "Scorpions",
  "album_title": "Lovedrive",
  "release_year": 1979,
  "tracks": [
    "Loving You Sunday Morning",
    "Another Piece of Meat",
    "Always Somewhere"
  ]
}}

- artist: normalized artist name
- album_title: album title
- release_year: integer year
- tracks: array of song titles (strings), in album order"#
    )
}

/// Carve the JSON object out of `text` and parse it.
fn parse_json_object(text: &str) -> Result<Value, PipelineError> {
    let json_text = match (text.find('{'), text.rfind('}')) {
        (Some(first), Some(last)) if first < last => &text[first..=last],
        _ => text,
    };

    serde_json::from_str(json_text).map_err(|e| PipelineError::LlmJson(format!("{e}; raw: {}", excerpt(text))))
}

/// Validate the parsed object into an `AlbumInfo`; a missing or malformed
/// `tracks` list is fatal.
fn album_from_value(value: Value) -> Result<AlbumInfo, PipelineError> {
    let raw = excerpt(&value.to_string());
    serde_json::from_value(value).map_err(|e| PipelineError::LlmFormat(format!("{e}; raw: {raw}")))
}

/// First 500 characters, for error annotations.
fn excerpt(text: &str) -> String {
    text.chars().take(500).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json_object_bare() {
        let value = parse_json_object(r#"{"artist": "Queen"}"#).unwrap();
        assert_eq!(value["artist"], "Queen");
    }

    #[test]
    fn test_parse_json_object_with_surrounding_prose() {
        let text = "Sure! Here is the album you asked for:\n{\"artist\": \"Queen\", \"tracks\": []}\nHope that helps.";
        let value = parse_json_object(text).unwrap();
        assert_eq!(value["artist"], "Queen");
    }

    #[test]
    fn test_parse_json_object_no_braces_fails() {
        let result = parse_json_object("no json here");
        assert!(matches!(result, Err(PipelineError::LlmJson(_))));
    }

    #[test]
    fn test_parse_json_object_invalid_json_fails() {
        let result = parse_json_object("{not json}");
        assert!(matches!(result, Err(PipelineError::LlmJson(_))));
    }

    #[test]
    fn test_album_from_value_complete() {
        let album = album_from_value(json!({
            "artist": "Scorpions",
            "album_title": "Lonesome Crow",
            "release_year": 1972,
            "tracks": ["I'm Goin' Mad", "It All Depends"]
        }))
        .unwrap();

        assert_eq!(album.artist, "Scorpions");
        assert_eq!(album.album_title, "Lonesome Crow");
        assert_eq!(album.release_year, Some(1972));
        assert_eq!(album.tracks.len(), 2);
    }

    #[test]
    fn test_album_from_value_missing_tracks_is_fatal() {
        let result = album_from_value(json!({ "artist": "Scorpions", "album_title": "Lonesome Crow" }));
        assert!(matches!(result, Err(PipelineError::LlmFormat(_))));
    }

    #[test]
    fn test_album_from_value_tracks_not_a_list_is_fatal() {
        let result = album_from_value(json!({ "tracks": "I'm Goin' Mad" }));
        assert!(matches!(result, Err(PipelineError::LlmFormat(_))));
    }

    #[test]
    fn test_album_from_value_tolerates_missing_metadata() {
        let album = album_from_value(json!({ "tracks": ["One"] })).unwrap();
        assert_eq!(album.artist, "");
        assert!(album.release_year.is_none());
        assert_eq!(album.tracks, vec!["One"]);
    }

    #[test]
    fn test_album_prompt_names_the_artist() {
        let prompt = album_prompt("Toto");
        assert!(prompt.contains("\"Toto\""));
        assert!(prompt.contains("FIRST official studio album"));
    }
}
