use serde::{Deserialize, Serialize};

/// A completed game with the pre-game odds for both sides
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub game_id: String,
    /// 0-indexed season number as stored
    pub season: i64,
    pub is_postseason: bool,
    pub home_team: String,
    pub away_team: String,
    /// Implied win probability for the home side (0.0–1.0)
    pub home_odds: f64,
    /// Implied win probability for the away side (0.0–1.0)
    pub away_odds: f64,
    pub home_score: i64,
    pub away_score: i64,
}

/// A league team
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: String,
    pub nickname: String,
}
