//! Record types shared between the scraper and the pipeline.
//!
//! `LyricsRecord` is the dataset wire format: the scraper pushes these to its
//! output sink one at a time, and the pipeline reads the same shape back from
//! the remote actor run. Field names are camelCase on the wire.

use serde::{Deserialize, Serialize};

/// One output record per search candidate, or one diagnostic record when the
/// search itself fails.
///
/// Invariant: `error` being set implies `lyrics_text` is empty. The converse
/// does not hold; a page with no recognized lyrics markup yields an empty
/// `lyrics_text` with no error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LyricsRecord {
    /// The query the scrape was started with.
    pub search_query: String,
    /// Candidate song title; `None` on search-level diagnostic records.
    pub song_title: Option<String>,
    /// Candidate artist name; `None` on search-level diagnostic records.
    pub artist_name: Option<String>,
    /// Lyric page URL, or the search URL on diagnostic records.
    pub url: String,
    /// Extracted lyrics text; empty when the fetch failed or no layout matched.
    pub lyrics_text: String,
    /// Failure annotation, in free text.
    pub error: Option<String>,
}

impl LyricsRecord {
    /// Record for a candidate whose page was fetched; `lyrics_text` may still
    /// be empty when neither lyrics layout matched.
    pub fn song(search_query: &str, song_title: &str, artist_name: &str, url: &str, lyrics_text: String) -> Self {
        Self {
            search_query: search_query.to_string(),
            song_title: Some(song_title.to_string()),
            artist_name: Some(artist_name.to_string()),
            url: url.to_string(),
            lyrics_text,
            error: None,
        }
    }

    /// Record for a candidate whose page fetch failed.
    pub fn song_error(search_query: &str, song_title: &str, artist_name: &str, url: &str, error: String) -> Self {
        Self {
            search_query: search_query.to_string(),
            song_title: Some(song_title.to_string()),
            artist_name: Some(artist_name.to_string()),
            url: url.to_string(),
            lyrics_text: String::new(),
            error: Some(error),
        }
    }

    /// Diagnostic record for a search that produced no candidates to visit.
    pub fn search_error(search_query: &str, search_url: &str, error: String) -> Self {
        Self {
            search_query: search_query.to_string(),
            song_title: None,
            artist_name: None,
            url: search_url.to_string(),
            lyrics_text: String::new(),
            error: Some(error),
        }
    }
}
