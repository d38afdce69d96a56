//! Wells Ingest
//!
//! Resumable, idempotent ingestion of well details pages into a store.
//!
//! # Overview
//!
//! An ingestion run walks a worklist of API numbers in order. For each one it:
//! - **Checks the store**: numbers already present are skipped without a request
//! - **Fetches** the details page, backing off through upstream throttling
//! - **Extracts and normalizes** the page into a `WellRecord`
//! - **Persists** the record immediately
//!
//! Because every record is written before the next item starts and the
//! existence check is per API number, a run can be interrupted at any point
//! and simply started again with the same worklist.
//!
//! # Failure handling
//!
//! | Failure | Effect |
//! |---------|--------|
//! | Fetch exhausted or non-transient HTTP error | Recorded in the summary, run continues |
//! | Store read/write error | Run aborts with `IngestError::StoreUnavailable` |
//! | Cancellation | Current item finishes, run returns a partial summary |
//!
//! # Usage
//!
//! ```no_run
//! use tokio_util::sync::CancellationToken;
//! use wells_fetcher::{Fetcher, FetcherConfig};
//! use wells_ingest::{read_worklist, Ingestor};
//! use wells_store::SqliteStore;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let worklist = read_worklist("api_numbers.csv")?;
//!     let fetcher = Fetcher::from_config(&FetcherConfig::default())?;
//!     let mut ingestor = Ingestor::new(fetcher, SqliteStore::new("wells.db")?);
//!
//!     let summary = ingestor.run(&worklist, &CancellationToken::new()).await?;
//!     println!("{}", summary.summary());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]

mod error;
mod ingestor;
mod summary;
mod worklist;

pub use error::IngestError;
pub use ingestor::{Ingestor, ItemOutcome, ItemState};
pub use summary::{FailedItem, RunSummary};
pub use worklist::{parse_worklist, read_worklist};
