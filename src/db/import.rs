use serde::Deserialize;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::models::{Game, Team};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("failed to read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV error in {path}: {source}")]
    Csv { path: String, source: csv::Error },

    #[error("invalid is_postseason value {value:?} for game {game_id}")]
    Postseason { game_id: String, value: String },
}

/// Games export row. `is_postseason` is kept as text because exports
/// disagree on boolean spelling (`false`, `False`, `f`, `0`).
#[derive(Debug, Deserialize)]
struct RawGame {
    game_id: String,
    season: i64,
    is_postseason: String,
    home_team: String,
    away_team: String,
    home_odds: f64,
    away_odds: f64,
    home_score: i64,
    away_score: i64,
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "t" | "1" | "yes" => Some(true),
        "false" | "f" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Load teams from a CSV export. Columns other than `team_id` and
/// `nickname` are ignored.
pub fn load_teams(path: &Path) -> Result<Vec<Team>, ImportError> {
    let file = open(path)?;
    load_teams_from_reader(file).map_err(|source| ImportError::Csv {
        path: path.display().to_string(),
        source,
    })
}

/// Load games from a CSV export
pub fn load_games(path: &Path) -> Result<Vec<Game>, ImportError> {
    let file = open(path)?;
    load_games_from_reader(file, &path.display().to_string())
}

fn open(path: &Path) -> Result<File, ImportError> {
    File::open(path).map_err(|source| ImportError::Io {
        path: path.display().to_string(),
        source,
    })
}

fn load_teams_from_reader<R: Read>(rdr: R) -> Result<Vec<Team>, csv::Error> {
    let mut reader = csv::Reader::from_reader(rdr);
    reader.deserialize::<Team>().collect()
}

fn load_games_from_reader<R: Read>(rdr: R, path: &str) -> Result<Vec<Game>, ImportError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut games = Vec::new();
    for result in reader.deserialize::<RawGame>() {
        let raw = result.map_err(|source| ImportError::Csv {
            path: path.to_string(),
            source,
        })?;
        let is_postseason = parse_flag(&raw.is_postseason).ok_or_else(|| ImportError::Postseason {
            game_id: raw.game_id.clone(),
            value: raw.is_postseason.clone(),
        })?;
        games.push(Game {
            game_id: raw.game_id,
            season: raw.season,
            is_postseason,
            home_team: raw.home_team,
            away_team: raw.away_team,
            home_odds: raw.home_odds,
            away_odds: raw.away_odds,
            home_score: raw.home_score,
            away_score: raw.away_score,
        });
    }
    Ok(games)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_load_teams_ignores_extra_columns() {
        let data = "team_id,full_name,nickname\nt1,Canada Moist Talkers,Talkers\nt2,Hades Tigers,Tigers\n";
        let teams = load_teams_from_reader(data.as_bytes()).unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].team_id, "t1");
        assert_eq!(teams[0].nickname, "Talkers");
        assert_eq!(teams[1].nickname, "Tigers");
    }

    #[test]
    fn test_load_games() {
        let data = "\
game_id,season,is_postseason,home_team,away_team,home_odds,away_odds,home_score,away_score,weather
g1,6,False,t1,t2,0.55,0.45,4,2,7
g2,6,True,t2,t1,0.5,0.5,1,3,1
";
        let games = load_games_from_reader(data.as_bytes(), "games.csv").unwrap();
        assert_eq!(games.len(), 2);
        assert!(!games[0].is_postseason);
        assert!(games[1].is_postseason);
        assert_relative_eq!(games[0].home_odds, 0.55, epsilon = 1e-12);
        assert_eq!(games[0].home_score, 4);
        assert_eq!(games[1].away_team, "t1");
    }

    #[test]
    fn test_load_games_rejects_bad_flag() {
        let data = "\
game_id,season,is_postseason,home_team,away_team,home_odds,away_odds,home_score,away_score
g1,6,maybe,t1,t2,0.55,0.45,4,2
";
        let err = load_games_from_reader(data.as_bytes(), "games.csv").unwrap_err();
        assert!(matches!(err, ImportError::Postseason { ref game_id, .. } if game_id == "g1"));
    }

    #[test]
    fn test_load_games_rejects_missing_column() {
        let data = "game_id,season,home_team\ng1,6,t1\n";
        assert!(matches!(
            load_games_from_reader(data.as_bytes(), "games.csv"),
            Err(ImportError::Csv { .. })
        ));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("f"), Some(false));
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag(""), Some(false));
        assert_eq!(parse_flag("2"), None);
    }

    #[test]
    fn test_load_teams_missing_file() {
        let err = load_teams(Path::new("/nonexistent/teams.csv")).unwrap_err();
        assert!(matches!(err, ImportError::Io { .. }));
    }
}
