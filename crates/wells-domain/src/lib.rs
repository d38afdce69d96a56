//! Wells Domain Layer
//!
//! Core types and trait interfaces for the well-records ingestion system.
//! Infrastructure (HTTP, SQLite, HTML parsing) lives in other crates; this
//! crate only defines the vocabulary they share.
//!
//! ## Key Concepts
//!
//! - **ApiNumber**: the natural identifier of a well, used as the idempotency key
//! - **WellRecord**: the normalized, persisted entity
//! - **FieldKey / FieldMap**: the fixed set of fields scraped from a well page
//! - **Polygon**: planar containment test used by polygon search
//! - **WellStore**: the data-access boundary implemented by storage backends

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod api_number;
pub mod field;
pub mod geo;
pub mod record;
pub mod traits;

// Re-exports for convenience
pub use api_number::ApiNumber;
pub use field::{FieldKey, FieldMap};
pub use geo::{Coordinate, GeoError, Polygon};
pub use record::WellRecord;
pub use traits::WellStore;
