//! Parsed HTML document shared by every field lookup

use scraper::{ElementRef, Html, Selector};

/// An HTML document parsed once and queried many times
///
/// Parsing dominates extraction cost, so callers parse a page once and run
/// every field lookup against the same tree.
pub struct ParsedDocument {
    html: Html,
}

impl ParsedDocument {
    /// Parse a raw HTML payload
    ///
    /// The HTML parser is error-tolerant; malformed markup still yields a tree.
    pub fn parse(raw: &str) -> Self {
        Self {
            html: Html::parse_document(raw),
        }
    }

    /// Trimmed text of the first element matching a compiled selector
    pub fn select_text(&self, selector: &Selector) -> Option<String> {
        self.html.select(selector).next().map(element_text)
    }

    /// Trimmed text of every element matching a CSS selector
    ///
    /// An invalid selector matches nothing.
    pub fn texts_of(&self, css: &str) -> Vec<String> {
        match Selector::parse(css) {
            Ok(selector) => self.html.select(&selector).map(element_text).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Trimmed text of the element whose `id` attribute equals `id`
    pub fn text_by_id(&self, id: &str) -> Option<String> {
        let selector = id_selector(id)?;
        self.select_text(&selector)
    }
}

/// Whether `css` parses as a CSS selector
pub fn is_valid_selector(css: &str) -> bool {
    Selector::parse(css).is_ok()
}

/// Build a selector matching an exact `id` attribute
pub(crate) fn id_selector(id: &str) -> Option<Selector> {
    if id.is_empty() || id.contains('"') || id.contains('\\') {
        return None;
    }
    Selector::parse(&format!("[id=\"{}\"]", id)).ok()
}

/// Concatenated text content with whitespace runs collapsed
fn element_text(el: ElementRef<'_>) -> String {
    let raw: String = el.text().collect();
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head><title>Well Details</title></head><body>
        <h2>  Well   Details </h2>
        <span id="lblOperator">
            [6137] DEVON ENERGY
        </span>
        <span id="lblNested"><b>A</b>-01<br/>23S</span>
        <span id="lblEmpty"></span>
        <span id="lblAmp">Smith &amp; Sons</span>
    </body></html>"#;

    #[test]
    fn test_text_by_id_trims() {
        let doc = ParsedDocument::parse(PAGE);
        assert_eq!(doc.text_by_id("lblOperator").as_deref(), Some("[6137] DEVON ENERGY"));
    }

    #[test]
    fn test_text_by_id_concatenates_children() {
        let doc = ParsedDocument::parse(PAGE);
        assert_eq!(doc.text_by_id("lblNested").as_deref(), Some("A-0123S"));
    }

    #[test]
    fn test_empty_element_is_present_but_empty() {
        let doc = ParsedDocument::parse(PAGE);
        assert_eq!(doc.text_by_id("lblEmpty").as_deref(), Some(""));
    }

    #[test]
    fn test_entities_are_decoded() {
        let doc = ParsedDocument::parse(PAGE);
        assert_eq!(doc.text_by_id("lblAmp").as_deref(), Some("Smith & Sons"));
    }

    #[test]
    fn test_missing_id_is_none() {
        let doc = ParsedDocument::parse(PAGE);
        assert_eq!(doc.text_by_id("lblNope"), None);
        assert_eq!(doc.text_by_id(""), None);
        assert_eq!(doc.text_by_id("bad\"id"), None);
    }

    #[test]
    fn test_texts_of_selector() {
        let doc = ParsedDocument::parse(PAGE);
        assert_eq!(doc.texts_of("h2"), vec!["Well Details".to_string()]);
        assert!(doc.texts_of("h1").is_empty());
        assert!(doc.texts_of("::not a selector").is_empty());
        assert!(is_valid_selector("div.notice > h2"));
        assert!(!is_valid_selector("::not a selector"));
    }

    #[test]
    fn test_garbage_input_does_not_panic() {
        let doc = ParsedDocument::parse("<<<>>> not html at all </span></div>");
        assert_eq!(doc.text_by_id("lblOperator"), None);
    }
}
