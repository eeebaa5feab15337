//! Search-results extraction for the two known Genius layouts.
//!
//! The site has shipped at least two incompatible DOM structures over time.
//! Rather than detect a version, the extractor tries the richer mini-card
//! selector first and falls back to a bare anchor scan only when that yields
//! nothing, which keeps false positives down without giving up on older
//! markup.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Lyric-page URL shape: `https://genius.com/<slug>-lyrics`, optional trailing
/// slash.
static LYRICS_URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^https?://genius\.com/.+-lyrics/?$").expect("invalid regex"));

/// A lyric-page candidate pulled off the search results page.
///
/// Duplicate URLs are kept when the source page repeats a link; dedup is the
/// consumer's call.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SearchCandidate {
    /// Lyric page URL; always matches the lyric-page pattern.
    pub url: String,
    /// Song title; never empty.
    pub song_title: String,
    /// Artist name; empty when the layout carries none.
    pub artist_name: String,
}

/// Extract up to `max_count` lyric-page candidates from a search results page.
///
/// Parse misses yield an empty vec, never an error.
pub fn extract_candidates(html: &str, max_count: usize) -> Vec<SearchCandidate> {
    let document = Html::parse_document(html);

    // First strategy with any results wins.
    let strategies: [fn(&Html, usize) -> Vec<SearchCandidate>; 2] = [mini_card_candidates, bare_anchor_candidates];
    for strategy in strategies {
        let found = strategy(&document, max_count);
        if !found.is_empty() {
            return found;
        }
    }

    Vec::new()
}

/// Card-based search layout: anchors tagged `mini_card` with dedicated title
/// and subtitle elements.
fn mini_card_candidates(document: &Html, max_count: usize) -> Vec<SearchCandidate> {
    let card_sel = Selector::parse("a.mini_card").expect("invalid selector");
    let title_sel = Selector::parse(".mini_card-title").expect("invalid selector");
    let subtitle_sel = Selector::parse(".mini_card-subtitle").expect("invalid selector");

    let mut results = Vec::new();

    for anchor in document.select(&card_sel) {
        if results.len() >= max_count {
            break;
        }

        // Non-matching hrefs are skipped without consuming a slot.
        let Some(url) = lyric_url(anchor) else { continue };

        let mut song_title = first_text(anchor, &title_sel);
        let mut artist_name = first_text(anchor, &subtitle_sel);

        if song_title.is_empty() || artist_name.is_empty() {
            // Dedicated elements missing or empty; the flattened anchor text
            // is the next best source.
            (song_title, artist_name) = split_title_artist(&flattened_text(anchor));
        }

        if song_title.is_empty() {
            continue;
        }

        results.push(SearchCandidate { url, song_title, artist_name });
    }

    results
}

/// Structurally loose fallback: every anchor with an href, filtered by the
/// lyric-page URL shape, title/artist split out of the anchor text.
fn bare_anchor_candidates(document: &Html, max_count: usize) -> Vec<SearchCandidate> {
    let anchor_sel = Selector::parse("a[href]").expect("invalid selector");

    let mut results = Vec::new();

    for anchor in document.select(&anchor_sel) {
        if results.len() >= max_count {
            break;
        }

        let Some(url) = lyric_url(anchor) else { continue };

        let text = flattened_text(anchor);
        if text.is_empty() {
            continue;
        }

        let (song_title, artist_name) = split_title_artist(&text);
        if song_title.is_empty() {
            continue;
        }

        results.push(SearchCandidate { url, song_title, artist_name });
    }

    results
}

/// Href of the anchor when it matches the lyric-page URL shape.
fn lyric_url(anchor: ElementRef<'_>) -> Option<String> {
    let href = anchor.value().attr("href")?;
    LYRICS_URL_RE.is_match(href).then(|| href.to_string())
}

/// Flattened text of the first match under `anchor`, or empty.
fn first_text(anchor: ElementRef<'_>, selector: &Selector) -> String {
    anchor.select(selector).next().map(flattened_text).unwrap_or_default()
}

/// Text nodes trimmed, empties dropped, joined with single spaces.
fn flattened_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).filter(|t| !t.is_empty()).collect::<Vec<_>>().join(" ")
}

/// Split combined "Title – Artist" text; en dash tried first, plain hyphen
/// second, whole text as title when neither appears.
fn split_title_artist(text: &str) -> (String, String) {
    for separator in [" – ", " - "] {
        if let Some((title, artist)) = text.split_once(separator) {
            return (title.trim().to_string(), artist.trim().to_string());
        }
    }
    (text.trim().to_string(), String::new())
}
