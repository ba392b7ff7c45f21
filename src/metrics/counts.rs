//! Per-team favourite/underdog outcome counts and the two upset ratios.
//!
//! A *disappointment* is a loss while favoured; a *surprise* is a win as the
//! underdog. Ties are not expected, but if one occurs it is counted as a
//! favoured win or an underdog loss, since only strict losses/wins count as
//! upsets.

use crate::db::models::Game;

use super::outcome::{side_of, TeamSide};

fn partition<F, H>(team_id: &str, games: &[Game], selected: F, hit: H) -> (usize, usize)
where
    F: Fn(&TeamSide) -> bool,
    H: Fn(&TeamSide) -> bool,
{
    let mut hits = 0;
    let mut rest = 0;
    for side in games.iter().filter_map(|g| side_of(team_id, g)) {
        if !selected(&side) {
            continue;
        }
        if hit(&side) {
            hits += 1;
        } else {
            rest += 1;
        }
    }
    (hits, rest)
}

/// `hits / (hits + rest)`, or `None` when there is nothing to divide by.
pub fn ratio(hits: usize, rest: usize) -> Option<f64> {
    let total = hits + rest;
    if total == 0 {
        None
    } else {
        Some(hits as f64 / total as f64)
    }
}

/// Returns `(disappointments, favored_wins)` over games where the team was
/// favoured.
pub fn disappointment_counts(team_id: &str, games: &[Game]) -> (usize, usize) {
    partition(team_id, games, TeamSide::is_favored, TeamSide::lost)
}

/// Returns `(surprises, underdog_losses)` over games where the team was the
/// underdog.
pub fn surprise_counts(team_id: &str, games: &[Game]) -> (usize, usize) {
    partition(team_id, games, TeamSide::is_underdog, TeamSide::won)
}

/// Share of favoured games lost. `None` if the team was never favoured.
pub fn disappointment_percentage(team_id: &str, games: &[Game]) -> Option<f64> {
    let (disappointments, favored_wins) = disappointment_counts(team_id, games);
    ratio(disappointments, favored_wins)
}

/// Share of underdog games won. `None` if the team was never the underdog.
pub fn surprise_percentage(team_id: &str, games: &[Game]) -> Option<f64> {
    let (surprises, underdog_losses) = surprise_counts(team_id, games);
    ratio(surprises, underdog_losses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::game;
    use approx::assert_relative_eq;

    #[test]
    fn test_favored_home_loss_is_disappointment() {
        let games = vec![game("g1", "A", "X", 0.7, 3, 5)];
        assert_eq!(disappointment_counts("A", &games), (1, 0));
        assert_relative_eq!(
            disappointment_percentage("A", &games).unwrap(),
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_underdog_home_win_is_surprise() {
        let games = vec![game("g1", "B", "X", 0.3, 6, 2)];
        assert_eq!(surprise_counts("B", &games), (1, 0));
        assert_relative_eq!(surprise_percentage("B", &games).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_never_favored_is_undefined_not_zero() {
        let games = vec![
            game("g1", "C", "X", 0.3, 1, 2),
            game("g2", "X", "C", 0.8, 4, 0),
        ];
        assert_eq!(disappointment_counts("C", &games), (0, 0));
        assert_eq!(disappointment_percentage("C", &games), None);
        assert_eq!(surprise_counts("C", &games), (0, 2));
        assert_eq!(surprise_percentage("C", &games), Some(0.0));
    }

    #[test]
    fn test_split_favored_record() {
        let games = vec![
            game("g1", "D", "X", 0.6, 6, 1),
            game("g2", "Y", "D", 0.35, 9, 2),
        ];
        assert_eq!(disappointment_counts("D", &games), (1, 1));
        assert_relative_eq!(
            disappointment_percentage("D", &games).unwrap(),
            0.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_away_underdog_win() {
        let games = vec![game("g1", "X", "E", 0.62, 1, 4)];
        assert_eq!(surprise_counts("E", &games), (1, 0));
        assert_eq!(disappointment_counts("X", &games), (1, 0));
    }

    #[test]
    fn test_even_odds_count_for_neither() {
        let games = vec![game("g1", "F", "X", 0.5, 3, 1), game("g2", "X", "F", 0.5, 3, 1)];
        assert_eq!(disappointment_counts("F", &games), (0, 0));
        assert_eq!(surprise_counts("F", &games), (0, 0));
        assert_eq!(disappointment_percentage("F", &games), None);
        assert_eq!(surprise_percentage("F", &games), None);
    }

    #[test]
    fn test_ties_fall_into_remainder() {
        let games = vec![game("g1", "G", "X", 0.6, 2, 2), game("g2", "G", "X", 0.4, 2, 2)];
        assert_eq!(disappointment_counts("G", &games), (0, 1));
        assert_eq!(surprise_counts("G", &games), (0, 1));
    }

    #[test]
    fn test_counts_sum_to_favored_and_underdog_games() {
        let odds = [0.1, 0.25, 0.49, 0.5, 0.51, 0.7, 0.9, 0.5, 0.33, 0.66];
        let games: Vec<Game> = odds
            .iter()
            .enumerate()
            .map(|(i, &o)| {
                let (home, away) = if i % 2 == 0 { ("H", "Z") } else { ("Z", "H") };
                let h_odds = if home == "H" { o } else { 1.0 - o };
                game(&format!("g{}", i), home, away, h_odds, (i % 3) as i64, (i % 4) as i64)
            })
            .collect();

        let favored = games
            .iter()
            .filter_map(|g| side_of("H", g))
            .filter(|s| s.odds > 0.5)
            .count();
        let underdog = games
            .iter()
            .filter_map(|g| side_of("H", g))
            .filter(|s| s.odds < 0.5)
            .count();

        let (d, w) = disappointment_counts("H", &games);
        let (s, l) = surprise_counts("H", &games);
        assert_eq!(d + w, favored);
        assert_eq!(s + l, underdog);

        for p in [
            disappointment_percentage("H", &games),
            surprise_percentage("H", &games),
        ]
        .into_iter()
        .flatten()
        {
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn test_unknown_team_has_no_games() {
        let games = vec![game("g1", "A", "B", 0.7, 3, 5)];
        assert_eq!(disappointment_counts("nobody", &games), (0, 0));
        assert_eq!(surprise_counts("nobody", &games), (0, 0));
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(0, 0), None);
        assert_eq!(ratio(0, 3), Some(0.0));
        assert_relative_eq!(ratio(1, 3).unwrap(), 0.25, epsilon = 1e-12);
    }
}
