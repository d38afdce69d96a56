//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wells - Ingest and serve oil and gas well records.
#[derive(Debug, Parser)]
#[command(name = "wells")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.wells/config.toml)
    #[arg(short, long, global = true, env = "WELLS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch every API number in a worklist into the database
    Ingest(IngestArgs),

    /// Serve the HTTP API over the database
    Serve(ServeArgs),

    /// Print one stored well record
    Show(ShowArgs),
}

/// Arguments for the ingest command.
#[derive(Debug, Parser)]
pub struct IngestArgs {
    /// CSV file whose first column holds API numbers (first line is a header)
    #[arg(short, long)]
    pub worklist: PathBuf,

    /// SQLite database path
    #[arg(short, long)]
    pub database: Option<PathBuf>,
}

/// Arguments for the serve command.
#[derive(Debug, Parser)]
pub struct ServeArgs {
    /// SQLite database path
    #[arg(short, long)]
    pub database: Option<PathBuf>,

    /// Address to bind (overrides config)
    #[arg(long)]
    pub bind: Option<String>,

    /// Port to bind (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,
}

/// Arguments for the show command.
#[derive(Debug, Parser)]
pub struct ShowArgs {
    /// API number of the well
    pub api: String,

    /// SQLite database path
    #[arg(short, long)]
    pub database: Option<PathBuf>,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_ingest() {
        let cli = Cli::try_parse_from([
            "wells", "ingest", "--worklist", "apis.csv", "--database", "w.db", "--format", "json",
        ])
        .unwrap();

        assert!(matches!(cli.format, Some(CliFormat::Json)));
        match cli.command {
            Command::Ingest(args) => {
                assert_eq!(args.worklist, PathBuf::from("apis.csv"));
                assert_eq!(args.database, Some(PathBuf::from("w.db")));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_show_with_global_config() {
        let cli = Cli::try_parse_from(["wells", "--config", "/tmp/w.toml", "show", "30-015-20001"])
            .unwrap();

        assert_eq!(cli.config, Some(PathBuf::from("/tmp/w.toml")));
        match cli.command {
            Command::Show(args) => assert_eq!(args.api, "30-015-20001"),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_ingest_requires_worklist() {
        assert!(Cli::try_parse_from(["wells", "ingest"]).is_err());
    }
}
