//! Wells Extractor
//!
//! Turns a well details page into a [`WellRecord`](wells_domain::WellRecord).
//!
//! # Architecture
//!
//! ```text
//! raw HTML → ParsedDocument (parsed once) → FieldExtractor × N keys → FieldMap → normalize → WellRecord
//! ```
//!
//! Extraction never fails: a field that cannot be found is simply absent from
//! the [`FieldMap`](wells_domain::FieldMap), and normalization replaces absent
//! or malformed values with defaults.
//!
//! # Example Usage
//!
//! ```
//! use wells_domain::{ApiNumber, FieldKey};
//! use wells_extractor::{normalize, FieldExtractor, ParsedDocument};
//!
//! let html = r#"<html><body>
//!   <span id="ctl00_ctl00__main_main_ucGeneralWellInformation_lblOperator"> ACME OIL </span>
//! </body></html>"#;
//!
//! let doc = ParsedDocument::parse(html);
//! let extractor = FieldExtractor::new();
//! assert_eq!(extractor.extract(&doc, FieldKey::Operator).as_deref(), Some("ACME OIL"));
//!
//! let fields = extractor.extract_all(&doc);
//! let record = normalize(&ApiNumber::parse("30-015-1").unwrap(), &fields);
//! assert_eq!(record.operator, "ACME OIL");
//! assert_eq!(record.gl_elevation, 0.0);
//! ```

#![warn(missing_docs)]

mod document;
mod extractor;
pub mod normalizer;

pub use document::{is_valid_selector, ParsedDocument};
pub use extractor::FieldExtractor;
pub use normalizer::normalize;
