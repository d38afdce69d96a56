//! Trait definitions for external interactions
//!
//! Infrastructure implementations live in other crates.

use crate::{ApiNumber, WellRecord};

/// Key-addressable storage for well records
///
/// Implemented by the infrastructure layer (wells-store). Ingestion depends
/// only on [`exists`](WellStore::exists) and [`insert`](WellStore::insert);
/// the lookup methods serve the HTTP surface.
pub trait WellStore {
    /// Error type for store operations
    type Error;

    /// Whether a record with this API number is already stored
    fn exists(&self, api_number: &ApiNumber) -> Result<bool, Self::Error>;

    /// Insert a record unless its API number is already present
    ///
    /// Returns `false` (and leaves the stored record untouched) when the API
    /// number already exists.
    fn insert(&mut self, record: &WellRecord) -> Result<bool, Self::Error>;

    /// Fetch one record by API number
    fn find_by_api_number(&self, api_number: &ApiNumber) -> Result<Option<WellRecord>, Self::Error>;

    /// Every record whose coordinates are not both zero
    fn list_with_coordinates(&self) -> Result<Vec<WellRecord>, Self::Error>;
}
