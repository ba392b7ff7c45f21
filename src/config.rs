use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::db::connection::{database_path, parse_connection_string};
use crate::output::Format;

/// Disappointment and surprise percentages per team for one regular season
#[derive(Parser, Debug, Clone)]
#[command(name = "upset-report", version, about)]
pub struct Config {
    #[command(flatten)]
    pub source: SourceArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Where the league store lives
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// SQLite database path (takes precedence over the connection string)
    #[arg(long, global = true, env = "DATABASE_PATH")]
    pub database_path: Option<String>,

    /// Connection string in `key=value;key=value` form; the `database`
    /// (or `data source` / `host`) key names the database
    #[arg(long, global = true, env = "CONNECTION_STRING", hide_env_values = true)]
    pub connection_string: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compute the report for one season and write it to a file
    Report(ReportArgs),
    /// Load teams and games from CSV exports into the database
    Import(ImportArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ReportArgs {
    /// Season to report on (0-indexed, as stored)
    #[arg(long, env = "SEASON", default_value = "6")]
    pub season: i64,

    /// Output file
    #[arg(long, env = "OUTPUT_PATH", default_value = "percentages.csv")]
    pub output: PathBuf,

    /// Output format
    #[arg(long, env = "OUTPUT_FORMAT", value_enum, default_value = "csv")]
    pub format: Format,
}

#[derive(Args, Debug, Clone)]
pub struct ImportArgs {
    /// Teams CSV export (needs `team_id` and `nickname` columns)
    #[arg(long)]
    pub teams: Option<PathBuf>,

    /// Games CSV export
    #[arg(long)]
    pub games: Option<PathBuf>,
}

impl SourceArgs {
    /// Database path from `--database-path`, else from the connection string
    pub fn resolve_database_path(&self) -> anyhow::Result<String> {
        if let Some(path) = self.database_path.as_deref().filter(|p| !p.is_empty()) {
            return Ok(path.to_string());
        }
        match self.connection_string.as_deref() {
            Some(s) => Ok(database_path(&parse_connection_string(s)?)?),
            None => anyhow::bail!(
                "No database configured. Set DATABASE_PATH or CONNECTION_STRING (or pass --database-path)."
            ),
        }
    }
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        self.source.resolve_database_path()?;
        match &self.command {
            Command::Report(args) => {
                if args.season < 0 {
                    anyhow::bail!("season must be non-negative");
                }
                if args.output.as_os_str().is_empty() {
                    anyhow::bail!("output path must not be empty");
                }
            }
            Command::Import(args) => {
                if args.teams.is_none() && args.games.is_none() {
                    anyhow::bail!("import needs --teams and/or --games");
                }
            }
        }
        Ok(())
    }
}
