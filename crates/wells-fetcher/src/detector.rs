//! Rate-limit detection by content sniffing

use wells_extractor::ParsedDocument;

/// Decides whether a successfully retrieved page is the upstream's "busy" page
pub trait RateLimitDetector: Send + Sync {
    /// `true` if `body` signals throttling and the request should be retried
    fn is_rate_limited(&self, body: &str) -> bool;
}

impl<F> RateLimitDetector for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn is_rate_limited(&self, body: &str) -> bool {
        self(body)
    }
}

/// Matches pages whose heading text equals a known phrase
///
/// # Examples
///
/// ```
/// use wells_fetcher::{BusyHeadingDetector, RateLimitDetector};
///
/// let detector = BusyHeadingDetector::default();
/// assert!(detector.is_rate_limited("<html><body><h2> server too busy </h2></body></html>"));
/// assert!(!detector.is_rate_limited("<html><body><h2>Well Details</h2></body></html>"));
/// ```
#[derive(Debug, Clone)]
pub struct BusyHeadingDetector {
    selector: String,
    phrase: String,
    phrase_lower: String,
}

impl BusyHeadingDetector {
    /// Match elements selected by `selector` whose text equals `phrase`
    ///
    /// Whitespace runs in `phrase` collapse to one space, the same way element
    /// text is read from the page.
    pub fn new(selector: &str, phrase: &str) -> Self {
        let phrase = phrase.split_whitespace().collect::<Vec<_>>().join(" ");
        Self {
            selector: selector.to_string(),
            phrase_lower: phrase.to_lowercase(),
            phrase,
        }
    }

    /// Heading text this detector looks for
    pub fn phrase(&self) -> &str {
        &self.phrase
    }
}

impl Default for BusyHeadingDetector {
    fn default() -> Self {
        Self::new("h2", "Server Too Busy")
    }
}

impl RateLimitDetector for BusyHeadingDetector {
    fn is_rate_limited(&self, body: &str) -> bool {
        ParsedDocument::parse(body)
            .texts_of(&self.selector)
            .iter()
            .any(|text| text.to_lowercase() == self.phrase_lower)
    }
}
