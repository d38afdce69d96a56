//! Ingest command implementation.

use crate::cli::IngestArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use wells_fetcher::Fetcher;
use wells_ingest::{read_worklist, Ingestor};
use wells_store::SqliteStore;

/// Execute the ingest command.
///
/// Ctrl+C cancels between items; the partial summary is still printed and a
/// rerun resumes from the first unstored API number. A second Ctrl+C exits
/// immediately.
pub async fn execute_ingest(args: IngestArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let worklist = read_worklist(&args.worklist)?;
    let database = config.database_path(args.database);
    let store = SqliteStore::new(&database)?;
    let fetcher = Fetcher::from_config(&config.fetcher)?;
    info!(
        worklist = %args.worklist.display(),
        database = %database.display(),
        items = worklist.len(),
        max_backoff_per_item_secs = fetcher.policy().worst_case_backoff().as_secs(),
        "starting ingestion"
    );

    let mut ingestor = Ingestor::new(fetcher, store);

    let cancel = CancellationToken::new();
    let listener = tokio::spawn(cancel_on_ctrl_c(cancel.clone()));

    let result = ingestor.run(&worklist, &cancel).await;
    listener.abort();

    let summary = result?;
    println!("{}", formatter.format_summary(&summary)?);

    Ok(())
}

/// Exit status for termination by SIGINT
const INTERRUPTED_EXIT_CODE: i32 = 130;

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    let ctrl_c = || async { tokio::signal::ctrl_c().await.is_ok() };
    cancel_on_interrupts(ctrl_c, cancel, || {
        std::process::exit(INTERRUPTED_EXIT_CODE);
    })
    .await;
}

/// First interrupt cancels the run; a second one calls `abort`
async fn cancel_on_interrupts<S, Fut, A>(mut next_interrupt: S, cancel: CancellationToken, abort: A)
where
    S: FnMut() -> Fut,
    Fut: Future<Output = bool>,
    A: FnOnce(),
{
    if !next_interrupt().await {
        return;
    }
    warn!("Interrupt received, stopping after the current item (Ctrl+C again to abort)");
    cancel.cancel();

    if next_interrupt().await {
        error!("Second interrupt received, aborting");
        abort();
    }
}
