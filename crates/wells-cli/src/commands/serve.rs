//! Serve command implementation.

use crate::cli::ServeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use tracing::info;
use wells_store::SqliteStore;

/// Execute the serve command.
pub async fn execute_serve(args: ServeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut api = config.api.clone();
    if let Some(bind) = args.bind {
        api.bind_address = bind;
    }
    if let Some(port) = args.port {
        api.bind_port = port;
    }

    let database = config.database_path(args.database);
    let store = SqliteStore::new(&database)?;

    eprintln!(
        "{}",
        formatter.info(&format!(
            "Serving {} on http://{} (Ctrl+C to stop)",
            database.display(),
            api.bind_addr()
        ))
    );

    wells_api::start_server(&api, store, shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received, stopping server");
    }
}
