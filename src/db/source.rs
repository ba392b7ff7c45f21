use anyhow::Result;

use crate::db::models::{Game, Team};

/// Read-only access to the league's game and team tables.
///
/// The report is generated against this trait so it never touches
/// connection details or environment configuration itself.
pub trait GameSource {
    /// All non-postseason games of the given (0-indexed) season.
    fn regular_season_games(&self, season: i64) -> Result<Vec<Game>>;

    /// Every team, in table order.
    fn teams(&self) -> Result<Vec<Team>>;
}
