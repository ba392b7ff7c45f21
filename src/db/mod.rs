use anyhow::{Context, Result};
use rusqlite::{params, Connection, OpenFlags};

pub mod connection;
pub mod import;
pub mod models;
pub mod source;

use models::*;
pub use source::GameSource;

/// SQLite-backed league store
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open an existing database without creating or modifying anything
    pub fn open_read_only(path: &str) -> Result<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open database {} read-only", path))?;
        Ok(Database { conn })
    }

    /// Open (or create) the database at the given path and apply the schema
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database {}", path))?;
        let db = Database { conn };
        db.run_migrations()?;
        Ok(db)
    }

    /// Run schema migrations (idempotent)
    fn run_migrations(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    // ── Import ────────────────────────────────────────────────────────────────

    /// Upsert teams and games in a single transaction
    pub fn import(&mut self, teams: &[Team], games: &[Game]) -> Result<()> {
        let tx = self
            .conn
            .transaction()
            .context("Failed to begin import transaction")?;
        for team in teams {
            upsert_team(&tx, team)
                .with_context(|| format!("Failed to upsert team {}", team.team_id))?;
        }
        for game in games {
            upsert_game(&tx, game)
                .with_context(|| format!("Failed to upsert game {}", game.game_id))?;
        }
        tx.commit().context("Failed to commit import")?;
        Ok(())
    }
}

impl GameSource for Database {
    fn regular_season_games(&self, season: i64) -> Result<Vec<Game>> {
        let mut stmt = self.conn.prepare(
            "SELECT game_id, season, is_postseason, home_team, away_team,
                    home_odds, away_odds, home_score, away_score
             FROM games WHERE season = ?1 AND is_postseason = 0
             ORDER BY game_id",
        )?;
        let games = stmt
            .query_map(params![season], map_game)?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read games")?;
        Ok(games)
    }

    fn teams(&self) -> Result<Vec<Team>> {
        let mut stmt = self
            .conn
            .prepare("SELECT team_id, nickname FROM teams ORDER BY rowid")?;
        let teams = stmt
            .query_map([], |row| {
                Ok(Team {
                    team_id: row.get(0)?,
                    nickname: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("Failed to read teams")?;
        Ok(teams)
    }
}

// ── SQL helpers ────────────────────────────────────────────────────────────────

fn upsert_team(conn: &Connection, team: &Team) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT INTO teams (team_id, nickname) VALUES (?1, ?2)
         ON CONFLICT(team_id) DO UPDATE SET nickname=excluded.nickname",
        params![team.team_id, team.nickname],
    )
}

fn upsert_game(conn: &Connection, game: &Game) -> rusqlite::Result<usize> {
    conn.execute(
        "INSERT OR REPLACE INTO games (
            game_id, season, is_postseason, home_team, away_team,
            home_odds, away_odds, home_score, away_score
         ) VALUES (?1,?2,?3,?4,?5,?6,?7,?8,?9)",
        params![
            game.game_id,
            game.season,
            game.is_postseason,
            game.home_team,
            game.away_team,
            game.home_odds,
            game.away_odds,
            game.home_score,
            game.away_score,
        ],
    )
}

fn map_game(row: &rusqlite::Row) -> rusqlite::Result<Game> {
    Ok(Game {
        game_id: row.get(0)?,
        season: row.get(1)?,
        is_postseason: row.get(2)?,
        home_team: row.get(3)?,
        away_team: row.get(4)?,
        home_odds: row.get(5)?,
        away_odds: row.get(6)?,
        home_score: row.get(7)?,
        away_score: row.get(8)?,
    })
}

/// SQLite schema (idempotent CREATE IF NOT EXISTS)
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS teams (
    team_id     TEXT    PRIMARY KEY,
    nickname    TEXT    NOT NULL
);

CREATE TABLE IF NOT EXISTS games (
    game_id       TEXT    PRIMARY KEY,
    season        INTEGER NOT NULL,
    is_postseason INTEGER NOT NULL DEFAULT 0,
    home_team     TEXT    NOT NULL,
    away_team     TEXT    NOT NULL,
    home_odds     REAL    NOT NULL,
    away_odds     REAL    NOT NULL,
    home_score    INTEGER NOT NULL,
    away_score    INTEGER NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_games_season ON games(season, is_postseason);
"#;
