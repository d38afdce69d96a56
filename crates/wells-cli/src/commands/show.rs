//! Show command implementation.

use crate::cli::ShowArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use wells_domain::{ApiNumber, WellRecord, WellStore};
use wells_store::SqliteStore;

/// Execute the show command.
pub fn execute_show(args: ShowArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let store = SqliteStore::new(config.database_path(args.database))?;
    let record = lookup(&store, &args.api)?;
    println!("{}", formatter.format_record(&record)?);
    Ok(())
}

fn lookup(store: &SqliteStore, api: &str) -> Result<WellRecord> {
    let api_number = ApiNumber::parse(api).map_err(CliError::InvalidInput)?;
    store
        .find_by_api_number(&api_number)?
        .ok_or_else(|| CliError::NotFound(format!("Well with API {} not found.", api_number)))
}
