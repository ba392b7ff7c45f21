use crate::db::models::Game;

/// Odds strictly above this line make a side the favourite, strictly below
/// the underdog. Exactly even odds are neither.
pub const EVEN_ODDS: f64 = 0.5;

/// One team's view of a game it played in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeamSide {
    pub odds: f64,
    pub score: i64,
    pub opponent_score: i64,
}

impl TeamSide {
    /// Favoured: own odds strictly above even
    pub fn is_favored(&self) -> bool {
        self.odds > EVEN_ODDS
    }

    /// Underdog: own odds strictly below even
    pub fn is_underdog(&self) -> bool {
        self.odds < EVEN_ODDS
    }

    pub fn won(&self) -> bool {
        self.score > self.opponent_score
    }

    pub fn lost(&self) -> bool {
        self.score < self.opponent_score
    }
}

/// The team's side of the game, or `None` if it did not play.
///
/// A game listing the same team as both home and away resolves to the home
/// side.
pub fn side_of(team_id: &str, game: &Game) -> Option<TeamSide> {
    if game.home_team == team_id {
        Some(TeamSide {
            odds: game.home_odds,
            score: game.home_score,
            opponent_score: game.away_score,
        })
    } else if game.away_team == team_id {
        Some(TeamSide {
            odds: game.away_odds,
            score: game.away_score,
            opponent_score: game.home_score,
        })
    } else {
        None
    }
}
