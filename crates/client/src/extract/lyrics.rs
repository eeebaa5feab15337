//! Lyrics extraction for the two known Genius page layouts.

use scraper::{ElementRef, Html, Selector};

/// Extract lyrics text from a song page.
///
/// The modern layout splits lyrics across several containers flagged with a
/// data attribute (one per verse group); their texts are joined with a blank
/// line. Pages still on the legacy layout carry a single `.lyrics` block.
/// When neither matches the result is the empty string, never an error.
pub fn extract_lyrics(html: &str) -> String {
    let document = Html::parse_document(html);

    let container_sel = Selector::parse(r#"div[data-lyrics-container="true"]"#).expect("invalid selector");
    let blocks: Vec<String> = document
        .select(&container_sel)
        .map(block_text)
        .filter(|block| !block.is_empty())
        .collect();
    let mut text = blocks.join("\n\n");

    if text.is_empty() {
        let legacy_sel = Selector::parse(".lyrics").expect("invalid selector");
        if let Some(block) = document.select(&legacy_sel).next() {
            text = block_text(block);
        }
    }

    text.trim().to_string()
}

/// Newline-joined text of one container: text nodes trimmed, empties dropped.
fn block_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).filter(|t| !t.is_empty()).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modern_layout_single_container() {
        let html = r#"
            <div data-lyrics-container="true">First line<br>Second line</div>
        "#;

        assert_eq!(extract_lyrics(html), "First line\nSecond line");
    }

    #[test]
    fn test_modern_layout_blocks_joined_with_blank_line() {
        let html = r#"
            <div data-lyrics-container="true">Line1</div>
            <div data-lyrics-container="true">Line2</div>
        "#;

        assert_eq!(extract_lyrics(html), "Line1\n\nLine2");
    }

    #[test]
    fn test_modern_layout_empty_blocks_filtered() {
        let html = r#"
            <div data-lyrics-container="true">Verse one</div>
            <div data-lyrics-container="true">   </div>
            <div data-lyrics-container="true">Verse two</div>
        "#;

        assert_eq!(extract_lyrics(html), "Verse one\n\nVerse two");
    }

    #[test]
    fn test_modern_layout_nested_annotations() {
        // Annotation links wrap fragments of a line; their text still counts.
        let html = r#"
            <div data-lyrics-container="true"><a href="/1234"><span>Is this the real life?</span></a><br>Is this just fantasy?</div>
        "#;

        assert_eq!(extract_lyrics(html), "Is this the real life?\nIs this just fantasy?");
    }

    #[test]
    fn test_legacy_layout_fallback() {
        let html = r#"
            <div class="lyrics">
                <p>Old line one<br>Old line two</p>
            </div>
        "#;

        assert_eq!(extract_lyrics(html), "Old line one\nOld line two");
    }

    #[test]
    fn test_modern_layout_preferred_over_legacy() {
        let html = r#"
            <div data-lyrics-container="true">New layout</div>
            <div class="lyrics">Old layout</div>
        "#;

        assert_eq!(extract_lyrics(html), "New layout");
    }

    #[test]
    fn test_no_recognized_container_returns_empty() {
        let html = r#"<html><body><div class="content">Not lyrics</div></body></html>"#;
        assert_eq!(extract_lyrics(html), "");
    }

    #[test]
    fn test_empty_input_returns_empty() {
        assert_eq!(extract_lyrics(""), "");
    }
}
