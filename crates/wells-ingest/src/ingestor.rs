//! Sequential ingestion over a worklist

use crate::{IngestError, RunSummary};
use std::fmt;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use wells_domain::{ApiNumber, WellStore};
use wells_extractor::{normalize, FieldExtractor};
use wells_fetcher::{BusyHeadingDetector, FetchError, Fetcher, RateLimitDetector, Transport};

/// Where one worklist item is in its lifecycle
///
/// ```text
/// Pending ──▶ Skipped
///    └──▶ Fetching ──▶ Normalizing ──▶ Persisted
///             └──▶ Failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    /// Not yet looked at
    Pending,
    /// Page request in flight (including backoff)
    Fetching,
    /// Extracting and converting fields
    Normalizing,
    /// Record written to the store
    Persisted,
    /// Already present in the store
    Skipped,
    /// Fetch failed; nothing written
    Failed,
}

impl fmt::Display for ItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ItemState::Pending => "pending",
            ItemState::Fetching => "fetching",
            ItemState::Normalizing => "normalizing",
            ItemState::Persisted => "persisted",
            ItemState::Skipped => "skipped",
            ItemState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Terminal result of one item
#[derive(Debug, Clone, PartialEq)]
pub enum ItemOutcome {
    /// A new record was written
    Persisted,
    /// The API number was already stored
    Skipped,
    /// The page could not be fetched
    Failed(FetchError),
}

impl ItemOutcome {
    /// Terminal state this outcome corresponds to
    pub fn state(&self) -> ItemState {
        match self {
            ItemOutcome::Persisted => ItemState::Persisted,
            ItemOutcome::Skipped => ItemState::Skipped,
            ItemOutcome::Failed(_) => ItemState::Failed,
        }
    }
}

/// Drives fetch, extract, normalize and persist for each API number in turn
///
/// Items are processed strictly one after another in worklist order. Each
/// record is persisted as soon as it is normalized, so an interrupted run
/// leaves exactly the completed prefix in the store and a rerun picks up
/// where it stopped.
///
/// # Examples
///
/// ```
/// use tokio_util::sync::CancellationToken;
/// use wells_domain::ApiNumber;
/// use wells_fetcher::{Fetcher, MockTransport, RetryPolicy};
/// use wells_ingest::Ingestor;
/// # use wells_domain::{WellRecord, WellStore};
/// # use std::collections::BTreeMap;
/// # #[derive(Default)]
/// # struct MemoryStore(BTreeMap<ApiNumber, WellRecord>);
/// # impl WellStore for MemoryStore {
/// #     type Error = String;
/// #     fn exists(&self, api: &ApiNumber) -> Result<bool, String> { Ok(self.0.contains_key(api)) }
/// #     fn insert(&mut self, r: &WellRecord) -> Result<bool, String> {
/// #         if self.0.contains_key(&r.api_number) { return Ok(false); }
/// #         self.0.insert(r.api_number.clone(), r.clone());
/// #         Ok(true)
/// #     }
/// #     fn find_by_api_number(&self, api: &ApiNumber) -> Result<Option<WellRecord>, String> { Ok(self.0.get(api).cloned()) }
/// #     fn list_with_coordinates(&self) -> Result<Vec<WellRecord>, String> { Ok(Vec::new()) }
/// # }
///
/// # #[tokio::main]
/// # async fn main() {
/// let fetcher = Fetcher::new(MockTransport::new("<html></html>"), RetryPolicy::default());
/// let mut ingestor = Ingestor::new(fetcher, MemoryStore::default());
///
/// let worklist = vec![ApiNumber::parse("30-015-20001").unwrap()];
/// let summary = ingestor.run(&worklist, &CancellationToken::new()).await.unwrap();
/// assert_eq!(summary.ingested, 1);
/// # }
/// ```
pub struct Ingestor<T, S, D = BusyHeadingDetector> {
    fetcher: Fetcher<T, D>,
    extractor: FieldExtractor,
    store: S,
}

impl<T, S, D> Ingestor<T, S, D>
where
    T: Transport,
    D: RateLimitDetector,
    S: WellStore,
    S::Error: fmt::Display,
{
    /// Create an ingestor that writes into `store`
    pub fn new(fetcher: Fetcher<T, D>, store: S) -> Self {
        Self {
            fetcher,
            extractor: FieldExtractor::new(),
            store,
        }
    }

    /// Borrow the store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back, e.g. to serve it after ingestion
    pub fn into_store(self) -> S {
        self.store
    }

    /// Process every item in `worklist`
    ///
    /// `cancel` is checked before each item; an item already in progress
    /// always finishes. Fetch failures are recorded and skipped past.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::StoreUnavailable`] as soon as the store fails;
    /// items persisted before that point stay persisted.
    pub async fn run(
        &mut self,
        worklist: &[ApiNumber],
        cancel: &CancellationToken,
    ) -> Result<RunSummary, IngestError> {
        let started = Instant::now();
        let total = worklist.len();
        let mut summary = RunSummary::new(total);
        let run_id = summary.run_id;

        info!(%run_id, items = total, "ingestion started");

        for (index, api) in worklist.iter().enumerate() {
            if cancel.is_cancelled() {
                info!(%run_id, remaining = total - index, "ingestion cancelled");
                summary.cancelled = true;
                break;
            }

            let position = index + 1;
            let outcome = self.ingest_one(api).await?;
            let state = outcome.state();
            match outcome {
                ItemOutcome::Persisted => {
                    summary.record_ingested();
                    info!("[{}/{}] {} {}", position, total, api, state);
                }
                ItemOutcome::Skipped => {
                    summary.record_skipped();
                    info!("[{}/{}] {} {} (already stored)", position, total, api, state);
                }
                ItemOutcome::Failed(e) => {
                    warn!("[{}/{}] {} {}: {}", position, total, api, state, e);
                    summary.record_failure(api, e.to_string());
                }
            }
        }

        summary.elapsed_ms = started.elapsed().as_millis() as u64;
        info!(
            %run_id,
            ingested = summary.ingested,
            skipped = summary.skipped,
            failed = summary.failed(),
            cancelled = summary.cancelled,
            "ingestion finished"
        );

        Ok(summary)
    }

    /// Take one API number from `Pending` to a terminal state
    pub async fn ingest_one(&mut self, api: &ApiNumber) -> Result<ItemOutcome, IngestError> {
        debug!(api = %api, state = %ItemState::Pending, "item state");
        let exists = self
            .store
            .exists(api)
            .map_err(|e| IngestError::StoreUnavailable(e.to_string()))?;
        if exists {
            return Ok(ItemOutcome::Skipped);
        }

        debug!(api = %api, state = %ItemState::Fetching, "item state");
        let page = match self.fetcher.fetch(api).await {
            Ok(page) => page,
            Err(e) => return Ok(ItemOutcome::Failed(e)),
        };

        debug!(api = %api, state = %ItemState::Normalizing, "item state");
        let fields = self.extractor.extract_raw(&page);
        let record = normalize(api, &fields);

        let written = self
            .store
            .insert(&record)
            .map_err(|e| IngestError::StoreUnavailable(e.to_string()))?;

        // Another writer stored it between the existence check and the insert
        if !written {
            return Ok(ItemOutcome::Skipped);
        }
        Ok(ItemOutcome::Persisted)
    }
}
