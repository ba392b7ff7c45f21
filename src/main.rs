use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use upset_report::config::{Command, Config, ImportArgs, ReportArgs};
use upset_report::db::import::{load_games, load_teams};
use upset_report::db::Database;
use upset_report::metrics::generate_report;
use upset_report::output;

fn main() -> Result<()> {
    // Initialise tracing / logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();
    config.validate()?;
    let database_path = config.source.resolve_database_path()?;

    match &config.command {
        Command::Report(args) => run_report(&database_path, args),
        Command::Import(args) => run_import(&database_path, args),
    }
}

fn run_report(database_path: &str, args: &ReportArgs) -> Result<()> {
    let db = Database::open_read_only(database_path)?;
    info!("Database opened read-only: {}", database_path);

    // Compute everything before touching the output file so a failed run
    // leaves no report behind.
    let rows = generate_report(&db, args.season)?;

    output::write_report(&args.output, args.format, &rows)?;
    info!(
        "Wrote {} team rows to {} ({:?})",
        rows.len(),
        args.output.display(),
        args.format
    );
    Ok(())
}

fn run_import(database_path: &str, args: &ImportArgs) -> Result<()> {
    let teams = match &args.teams {
        Some(path) => load_teams(path)?,
        None => Vec::new(),
    };
    let games = match &args.games {
        Some(path) => load_games(path)?,
        None => Vec::new(),
    };

    let mut db = Database::open(database_path)?;
    db.import(&teams, &games)
        .with_context(|| format!("Import into {} failed", database_path))?;
    info!(
        "Imported {} teams and {} games into {}",
        teams.len(),
        games.len(),
        database_path
    );
    Ok(())
}
