use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use tracing::{debug, info, warn};

use crate::db::models::{Game, Team};
use crate::db::GameSource;

use super::counts::{disappointment_counts, ratio, surprise_counts};

/// One team's row in the upset report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMetrics {
    pub team_id: String,
    pub nickname: String,
    /// Losses while favoured
    pub disappointments: usize,
    pub favored_wins: usize,
    /// `None` when the team was never favoured
    pub disappointment_percentage: Option<f64>,
    /// Wins as the underdog
    pub surprises: usize,
    pub underdog_losses: usize,
    /// `None` when the team was never the underdog
    pub surprise_percentage: Option<f64>,
}

impl TeamMetrics {
    /// Compute a team's row from the season's games
    pub fn compute(team: &Team, games: &[Game]) -> Self {
        let (disappointments, favored_wins) = disappointment_counts(&team.team_id, games);
        let (surprises, underdog_losses) = surprise_counts(&team.team_id, games);
        TeamMetrics {
            team_id: team.team_id.clone(),
            nickname: team.nickname.clone(),
            disappointments,
            favored_wins,
            disappointment_percentage: ratio(disappointments, favored_wins),
            surprises,
            underdog_losses,
            surprise_percentage: ratio(surprises, underdog_losses),
        }
    }
}

/// One row per team, in the order of `teams`. Unsorted.
pub fn build_report(teams: &[Team], games: &[Game]) -> Vec<TeamMetrics> {
    teams
        .iter()
        .map(|team| TeamMetrics::compute(team, games))
        .collect()
}

/// Stable ascending sort by disappointment percentage; undefined ratios last
pub fn sort_by_disappointment(rows: &mut [TeamMetrics]) {
    rows.sort_by(|a, b| {
        match (a.disappointment_percentage, b.disappointment_percentage) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
}

/// Team ids referenced by games but absent from the teams table, in first-seen order
pub fn unknown_teams<'a>(teams: &[Team], games: &'a [Game]) -> Vec<&'a str> {
    let known: HashSet<&str> = teams.iter().map(|t| t.team_id.as_str()).collect();
    let mut seen = HashSet::new();
    let mut unknown = Vec::new();
    for g in games {
        for id in [g.home_team.as_str(), g.away_team.as_str()] {
            if !known.contains(id) && seen.insert(id) {
                unknown.push(id);
            }
        }
    }
    unknown
}

/// Load a season from `source` and produce the sorted report
pub fn generate_report<S: GameSource + ?Sized>(
    source: &S,
    season: i64,
) -> Result<Vec<TeamMetrics>> {
    let teams = source.teams().context("Failed to load teams")?;
    let games = source
        .regular_season_games(season)
        .with_context(|| format!("Failed to load games for season {}", season))?;
    info!(
        "Loaded {} teams and {} regular-season games for season {}",
        teams.len(),
        games.len(),
        season
    );

    for id in unknown_teams(&teams, &games) {
        warn!("Games reference team {} which is not in the teams table", id);
    }

    let mut rows = build_report(&teams, &games);
    for row in &rows {
        if row.disappointment_percentage.is_none() {
            warn!(
                "{} ({}) was never favoured; disappointment percentage undefined",
                row.nickname, row.team_id
            );
        }
        if row.surprise_percentage.is_none() {
            warn!(
                "{} ({}) was never the underdog; surprise percentage undefined",
                row.nickname, row.team_id
            );
        }
        debug!(
            "{}: {} disappointments / {} favoured wins, {} surprises / {} underdog losses",
            row.nickname, row.disappointments, row.favored_wins, row.surprises, row.underdog_losses
        );
    }

    sort_by_disappointment(&mut rows);
    Ok(rows)
}
