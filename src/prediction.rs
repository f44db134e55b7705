use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::state::{MatchFormat, Player, Weather};

/// Size of a recommended lineup. Fixed; shorter candidate pools return
/// everything they have with no padding.
pub const XI_SIZE: usize = 11;

const PERFORMANCE_WEIGHT: f64 = 0.4;
const FITNESS_CEILING: f64 = 150.0;
const FITNESS_SHARE: f64 = 30.0;
const WEATHER_BONUS: f64 = 20.0;
const VENUE_SHARE: f64 = 10.0;
const NEUTRAL_VENUE_SCORE: f64 = 50.0;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamFilter {
    All,
    Only(String),
}

impl TeamFilter {
    pub fn matches(&self, team: &str) -> bool {
        match self {
            TeamFilter::All => true,
            TeamFilter::Only(wanted) => wanted == team,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TeamFilter::All => "all teams",
            TeamFilter::Only(team) => team.as_str(),
        }
    }
}

/// Criteria for a roster-wide lineup recommendation. `format` is carried for
/// display and the analytics aggregates; the score formula does not read it.
#[derive(Debug, Clone)]
pub struct PredictionCriteria {
    pub weather: Weather,
    pub venue: String,
    pub format: MatchFormat,
    pub team: TeamFilter,
}

/// Criteria for a single player's standalone score. No team field: there is
/// no pool to filter.
#[derive(Debug, Clone)]
pub struct PlayerCriteria {
    pub weather: Weather,
    pub venue: String,
    pub format: MatchFormat,
}

/// A player plus the score derived for it. Always a fresh copy; scoring
/// never writes back into the roster, so re-scoring under other criteria
/// cannot leak stale values.
#[derive(Debug, Clone)]
pub struct ScoredPlayer {
    pub player: Player,
    pub prediction_score: f64,
}

/// Filter the pool by team, score every candidate under the criteria, rank
/// descending, and keep the top eleven. Ties keep roster order (the sort is
/// stable). Total over its inputs: an empty pool or an all-filtered pool
/// yields an empty lineup, never an error.
pub fn score_roster(players: &[Player], criteria: &PredictionCriteria) -> Vec<ScoredPlayer> {
    let mut scored: Vec<ScoredPlayer> = players
        .iter()
        .filter(|p| criteria.team.matches(&p.team))
        .map(|p| ScoredPlayer {
            prediction_score: composite_score(p, criteria.weather, &criteria.venue),
            player: p.clone(),
        })
        .collect();

    scored.sort_by(|a, b| {
        b.prediction_score
            .partial_cmp(&a.prediction_score)
            .unwrap_or(Ordering::Equal)
    });
    scored.truncate(XI_SIZE);
    scored
}

/// Standalone score for one player, rounded to one decimal for display.
/// Shares the formula with `score_roster`, so the two entry points cannot
/// drift apart.
pub fn score_single_player(player: &Player, criteria: &PlayerCriteria) -> f64 {
    round1(composite_score(player, criteria.weather, &criteria.venue))
}

/// The weighted-sum heuristic. Runs, wickets and catches trade at fixed
/// exchange rates; the ratios are deliberately unclamped, so an outlier
/// career can exceed the nominal 40-point performance share.
fn composite_score(player: &Player, weather: Weather, venue: &str) -> f64 {
    let performance = (player.runs as f64 / 1000.0) * 20.0
        + (player.wickets as f64 / 10.0) * 10.0
        + (player.catches as f64 / 20.0) * 10.0;

    let mut score = performance * PERFORMANCE_WEIGHT;
    score += (player.fitness / FITNESS_CEILING) * FITNESS_SHARE;
    if player.weather_pref == weather {
        score += WEATHER_BONUS;
    }
    let venue_score = player
        .venue_performance
        .get(venue)
        .copied()
        .unwrap_or(NEUTRAL_VENUE_SCORE);
    score + (venue_score / 100.0) * VENUE_SHARE
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SportMode;

    fn benchmark_player() -> Player {
        let mut p = Player::empty(1, "Benchmark".to_string(), "Mumbai".to_string());
        p.runs = 1000;
        p.wickets = 10;
        p.catches = 20;
        p.fitness = 150.0;
        p.weather_pref = Weather::Sunny;
        p.venue_performance.insert("Lord's".to_string(), 100.0);
        p
    }

    fn criteria(weather: Weather, venue: &str) -> PredictionCriteria {
        PredictionCriteria {
            weather,
            venue: venue.to_string(),
            format: MatchFormat::Test,
            team: TeamFilter::All,
        }
    }

    #[test]
    fn benchmark_player_scores_76() {
        // performance 20+10+10 = 40, weighted 16, fitness 30, weather 20,
        // venue 10.
        let ranked = score_roster(&[benchmark_player()], &criteria(Weather::Sunny, "Lord's"));
        assert_eq!(ranked.len(), 1);
        assert!((ranked[0].prediction_score - 76.0).abs() < 1e-9);
    }

    #[test]
    fn weather_mismatch_drops_exactly_the_bonus() {
        let ranked = score_roster(&[benchmark_player()], &criteria(Weather::Rainy, "Lord's"));
        assert!((ranked[0].prediction_score - 56.0).abs() < 1e-9);

        let mut cloudy = benchmark_player();
        cloudy.weather_pref = Weather::Cloudy;
        let matched = score_roster(&[benchmark_player()], &criteria(Weather::Sunny, "Lord's"));
        let missed = score_roster(&[cloudy], &criteria(Weather::Sunny, "Lord's"));
        let delta = matched[0].prediction_score - missed[0].prediction_score;
        assert!((delta - 20.0).abs() < 1e-9);
    }

    #[test]
    fn missing_venue_defaults_to_neutral_midpoint() {
        let with_entry = score_roster(&[benchmark_player()], &criteria(Weather::Sunny, "Lord's"));
        let without_entry =
            score_roster(&[benchmark_player()], &criteria(Weather::Sunny, "Newlands"));
        // Recorded venue at 100 contributes 10; the missing entry falls back
        // to 50, contributing exactly 5.
        let delta = with_entry[0].prediction_score - without_entry[0].prediction_score;
        assert!((delta - 5.0).abs() < 1e-9);
    }

    #[test]
    fn single_player_matches_roster_score() {
        let player = benchmark_player();
        for (weather, venue) in [
            (Weather::Sunny, "Lord's"),
            (Weather::Rainy, "Lord's"),
            (Weather::Cloudy, "MCG"),
        ] {
            let standalone = score_single_player(
                &player,
                &PlayerCriteria {
                    weather,
                    venue: venue.to_string(),
                    format: MatchFormat::Odi,
                },
            );
            let ranked = score_roster(&[player.clone()], &criteria(weather, venue));
            assert_eq!(standalone, round1(ranked[0].prediction_score));
        }
    }

    #[test]
    fn performance_component_is_unclamped() {
        let mut giant = benchmark_player();
        giant.runs = 20_000;
        giant.wickets = 0;
        giant.catches = 0;
        giant.fitness = 0.0;
        giant.venue_performance.clear();
        // (20000/1000)*20 = 400, weighted 160; mismatch weather, neutral
        // venue adds 5.
        let score = score_single_player(
            &giant,
            &PlayerCriteria {
                weather: Weather::Rainy,
                venue: "Lord's".to_string(),
                format: MatchFormat::Test,
            },
        );
        assert_eq!(score, 165.0);
    }

    #[test]
    fn short_pool_returns_everyone_unpadded() {
        let players: Vec<Player> = (0..5)
            .map(|i| {
                let mut p = benchmark_player();
                p.id = i;
                p
            })
            .collect();
        let ranked = score_roster(&players, &criteria(Weather::Sunny, "Lord's"));
        assert_eq!(ranked.len(), 5);
    }

    #[test]
    fn scoring_does_not_mutate_the_roster() {
        let players = vec![benchmark_player()];
        let first = score_roster(&players, &criteria(Weather::Sunny, "Lord's"));
        let second = score_roster(&players, &criteria(Weather::Rainy, "Lord's"));
        // Two passes over the same snapshot disagree only by the criteria,
        // proving no derived value leaked into the shared records.
        assert!((first[0].prediction_score - 76.0).abs() < 1e-9);
        assert!((second[0].prediction_score - 56.0).abs() < 1e-9);
        assert_eq!(players[0].runs, 1000);
    }

    #[test]
    fn zeroed_counters_still_score() {
        // A football row carries none of the cricket counters; everything
        // defaults to zero and the score is fitness + weather + venue only.
        let mut p = Player::empty(9, "Keeper".to_string(), "Arsenal".to_string());
        p.fitness = 75.0;
        p.weather_pref = Weather::Rainy;
        let score = score_single_player(
            &p,
            &PlayerCriteria {
                weather: Weather::Rainy,
                venue: crate::conditions::venues_for(SportMode::Football)[0].to_string(),
                format: MatchFormat::Test,
            },
        );
        // fitness 15, weather 20, neutral venue 5.
        assert_eq!(score, 40.0);
    }
}
