//! Run summary collected during ingestion

use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;
use wells_domain::ApiNumber;

/// One API number that could not be ingested
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FailedItem {
    /// API number from the worklist
    pub api_number: ApiNumber,
    /// Why the fetch failed
    pub reason: String,
}

/// Outcome counts of one ingestion run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Correlates this run's log lines
    pub run_id: Uuid,

    /// Items in the worklist
    pub total: usize,

    /// Records written by this run
    pub ingested: usize,

    /// Items already present in the store
    pub skipped: usize,

    /// Items whose fetch failed, in worklist order
    pub failures: Vec<FailedItem>,

    /// Whether the run stopped before reaching the end of the worklist
    pub cancelled: bool,

    /// Wall-clock duration in milliseconds
    pub elapsed_ms: u64,
}

impl RunSummary {
    /// Create an empty summary for a worklist of `total` items
    pub fn new(total: usize) -> Self {
        Self {
            run_id: Uuid::now_v7(),
            total,
            ingested: 0,
            skipped: 0,
            failures: Vec::new(),
            cancelled: false,
            elapsed_ms: 0,
        }
    }

    /// Record a persisted item
    pub fn record_ingested(&mut self) {
        self.ingested += 1;
    }

    /// Record an item that was already stored
    pub fn record_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Record a failed item
    pub fn record_failure(&mut self, api_number: &ApiNumber, reason: impl Into<String>) {
        self.failures.push(FailedItem {
            api_number: api_number.clone(),
            reason: reason.into(),
        });
    }

    /// Number of failed items
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Items that reached a terminal state
    pub fn processed(&self) -> usize {
        self.ingested + self.skipped + self.failed()
    }

    /// Wall-clock duration of the run
    pub fn elapsed(&self) -> Duration {
        Duration::from_millis(self.elapsed_ms)
    }

    /// Generate a human-readable report
    pub fn summary(&self) -> String {
        let mut lines = vec![
            "Ingestion Summary".to_string(),
            "=================".to_string(),
            format!("Run: {}", self.run_id),
            format!("Processed: {}/{}", self.processed(), self.total),
            format!("Ingested: {}", self.ingested),
            format!("Skipped: {}", self.skipped),
            format!("Failed: {}", self.failed()),
            format!("Elapsed: {:.1}s", self.elapsed().as_secs_f64()),
        ];

        if self.cancelled {
            lines.push("Run was cancelled before the worklist was finished".to_string());
        }

        if !self.failures.is_empty() {
            lines.push(String::new());
            lines.push("Failures:".to_string());
            for failure in &self.failures {
                lines.push(format!("  {}: {}", failure.api_number, failure.reason));
            }
        }

        lines.join("\n")
    }
}
