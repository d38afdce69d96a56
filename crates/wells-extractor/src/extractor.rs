//! Field extraction by stable element id

use crate::document::{id_selector, ParsedDocument};
use scraper::Selector;
use std::collections::HashMap;
use tracing::{debug, warn};
use wells_domain::{FieldKey, FieldMap};

/// Looks up the fixed set of [`FieldKey`]s in a parsed document
///
/// Selectors for every key are compiled once on construction and reused for
/// every document.
pub struct FieldExtractor {
    selectors: HashMap<FieldKey, Selector>,
}

impl FieldExtractor {
    /// Create an extractor for every recognised key
    pub fn new() -> Self {
        let mut selectors = HashMap::with_capacity(FieldKey::ALL.len());
        for key in FieldKey::ALL {
            match id_selector(&key.element_id()) {
                Some(selector) => {
                    selectors.insert(*key, selector);
                }
                None => warn!(field = key.name(), "unusable element id, field will always be absent"),
            }
        }
        Self { selectors }
    }

    /// Text content of one field, or `None` when the document lacks it
    pub fn extract(&self, doc: &ParsedDocument, key: FieldKey) -> Option<String> {
        let selector = self.selectors.get(&key)?;
        doc.select_text(selector)
    }

    /// Extract every recognised key into a [`FieldMap`]
    pub fn extract_all(&self, doc: &ParsedDocument) -> FieldMap {
        let fields: FieldMap = FieldKey::ALL
            .iter()
            .filter_map(|key| self.extract(doc, *key).map(|value| (*key, value)))
            .collect();

        debug!(found = fields.len(), total = FieldKey::ALL.len(), "extracted fields");
        fields
    }

    /// Parse a raw page and extract every key
    ///
    /// The parsed tree is dropped before returning, so the result can be
    /// carried across `.await` points freely.
    pub fn extract_raw(&self, raw: &str) -> FieldMap {
        let doc = ParsedDocument::parse(raw);
        self.extract_all(&doc)
    }
}

impl Default for FieldExtractor {
    fn default() -> Self {
        Self::new()
    }
}
