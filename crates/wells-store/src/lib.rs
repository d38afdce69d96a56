//! Wells Storage Layer
//!
//! Implements the `WellStore` trait on SQLite.
//!
//! Records are keyed by API number; inserting a number that already exists is
//! a no-op, which is what makes ingestion idempotent and resumable.
//!
//! # Examples
//!
//! ```no_run
//! use wells_store::SqliteStore;
//!
//! let store = SqliteStore::new(":memory:").unwrap();
//! // Store is now ready for record operations
//! ```

#![warn(missing_docs)]

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use wells_domain::{ApiNumber, WellRecord, WellStore};

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Invalid data format
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

const SELECT_COLUMNS: &str = "api_number, operator, status, well_type, work_type, directional_status,
     multi_lateral, mineral_owner, surface_owner, surface_location, gl_elevation, kb_elevation,
     df_elevation, single_multiple_completion, potash_waiver, spud_date, last_inspection, tvd,
     latitude, longitude, crs";

/// SQLite-based implementation of WellStore
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Share a store across tasks behind
/// a mutex, or give each thread its own instance.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at the given path
    ///
    /// Use `:memory:` for an in-memory database (useful for testing).
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.initialize_schema()?;
        Ok(store)
    }

    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql");
        self.conn.execute_batch(schema)?;
        Ok(())
    }

    /// Total number of stored records
    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM wells", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn encode_date(date: &DateTime<Utc>) -> String {
        date.to_rfc3339()
    }

    fn decode_date(idx: usize, text: &str) -> rusqlite::Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(text)
            .map(|d| d.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    idx,
                    rusqlite::types::Type::Text,
                    Box::new(StoreError::InvalidData(format!("bad date '{}': {}", text, e))),
                )
            })
    }

    fn row_to_record(row: &Row<'_>) -> rusqlite::Result<WellRecord> {
        let api: String = row.get(0)?;
        let api_number = ApiNumber::parse(&api).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                Box::new(StoreError::InvalidData(e)),
            )
        })?;

        let spud: String = row.get(15)?;
        let inspected: String = row.get(16)?;

        Ok(WellRecord {
            api_number,
            operator: row.get(1)?,
            status: row.get(2)?,
            well_type: row.get(3)?,
            work_type: row.get(4)?,
            directional_status: row.get(5)?,
            multi_lateral: row.get(6)?,
            mineral_owner: row.get(7)?,
            surface_owner: row.get(8)?,
            surface_location: row.get(9)?,
            gl_elevation: row.get(10)?,
            kb_elevation: row.get(11)?,
            df_elevation: row.get(12)?,
            single_multiple_completion: row.get(13)?,
            potash_waiver: row.get(14)?,
            spud_date: Self::decode_date(15, &spud)?,
            last_inspection: Self::decode_date(16, &inspected)?,
            tvd: row.get(17)?,
            latitude: row.get(18)?,
            longitude: row.get(19)?,
            crs: row.get(20)?,
        })
    }
}

impl WellStore for SqliteStore {
    type Error = StoreError;

    fn exists(&self, api_number: &ApiNumber) -> Result<bool, Self::Error> {
        let exists = self
            .conn
            .query_row(
                "SELECT 1 FROM wells WHERE api_number = ?1",
                params![api_number.as_str()],
                |_| Ok(true),
            )
            .optional()?
            .unwrap_or(false);
        Ok(exists)
    }

    fn insert(&mut self, record: &WellRecord) -> Result<bool, Self::Error> {
        let changed = self.conn.execute(
            "INSERT INTO wells (api_number, operator, status, well_type, work_type, directional_status,
                multi_lateral, mineral_owner, surface_owner, surface_location, gl_elevation, kb_elevation,
                df_elevation, single_multiple_completion, potash_waiver, spud_date, last_inspection, tvd,
                latitude, longitude, crs)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21)
             ON CONFLICT(api_number) DO NOTHING",
            params![
                record.api_number.as_str(),
                &record.operator,
                &record.status,
                &record.well_type,
                &record.work_type,
                &record.directional_status,
                &record.multi_lateral,
                &record.mineral_owner,
                &record.surface_owner,
                &record.surface_location,
                record.gl_elevation,
                record.kb_elevation,
                record.df_elevation,
                &record.single_multiple_completion,
                &record.potash_waiver,
                Self::encode_date(&record.spud_date),
                Self::encode_date(&record.last_inspection),
                record.tvd,
                record.latitude,
                record.longitude,
                &record.crs,
            ],
        )?;

        if changed == 0 {
            debug!(api = %record.api_number, "insert skipped, API number already stored");
        }

        Ok(changed > 0)
    }

    fn find_by_api_number(&self, api_number: &ApiNumber) -> Result<Option<WellRecord>, Self::Error> {
        let sql = format!("SELECT {} FROM wells WHERE api_number = ?1", SELECT_COLUMNS);
        let record = self
            .conn
            .query_row(&sql, params![api_number.as_str()], Self::row_to_record)
            .optional()?;
        Ok(record)
    }

    fn list_with_coordinates(&self) -> Result<Vec<WellRecord>, Self::Error> {
        let sql = format!(
            "SELECT {} FROM wells WHERE NOT (latitude = 0 AND longitude = 0) ORDER BY api_number",
            SELECT_COLUMNS
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map([], Self::row_to_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_empty() {
        let store = SqliteStore::new(":memory:").unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_date_encoding_round_trip_min_date() {
        let min = wells_domain::record::min_date();
        let text = SqliteStore::encode_date(&min);
        assert_eq!(SqliteStore::decode_date(0, &text).unwrap(), min);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(SqliteStore::decode_date(3, "yesterday").is_err());
    }
}
