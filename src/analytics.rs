use crate::prediction::PredictionCriteria;
use crate::state::{MatchFormat, Player, Weather};

/// One bar of an aggregate chart: a label, the mean heuristic value for the
/// group, and up to three player names from it.
#[derive(Debug, Clone)]
pub struct ChartBucket {
    pub label: String,
    pub value: f64,
    pub leaders: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct TeamBucket {
    pub team: String,
    pub score: f64,
    pub players: usize,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RosterTotals {
    pub players: usize,
    pub total_runs: u64,
    pub teams: usize,
    pub avg_fitness: f64,
}

#[derive(Debug, Clone)]
pub struct VenueInsight {
    pub venue: String,
    pub avg_performance: f64,
    pub recorded: usize,
    pub leaders: Vec<(String, f64)>,
}

// The chart values are display heuristics carried over from the analytics
// view, distinct from the lineup formula: each group mixes venue form with
// flat bonuses for matching the selected weather or format.

pub fn format_breakdown(players: &[Player], criteria: &PredictionCriteria) -> Vec<ChartBucket> {
    MatchFormat::ALL
        .iter()
        .map(|format| {
            let group: Vec<&Player> = players
                .iter()
                .filter(|p| p.format == Some(*format))
                .collect();
            ChartBucket {
                label: format.label().to_string(),
                value: mean_over(&group, |p| {
                    venue_form(p, &criteria.venue) * 50.0 + weather_bonus(p, criteria, 30.0)
                }),
                leaders: leader_names(&group),
            }
        })
        .collect()
}

pub fn weather_breakdown(players: &[Player], criteria: &PredictionCriteria) -> Vec<ChartBucket> {
    Weather::ALL
        .iter()
        .map(|weather| {
            let group: Vec<&Player> = players
                .iter()
                .filter(|p| p.weather_pref == *weather)
                .collect();
            ChartBucket {
                label: capitalize(weather.label()),
                value: mean_over(&group, |p| {
                    venue_form(p, &criteria.venue) * 50.0 + format_bonus(p, criteria, 20.0)
                }),
                leaders: leader_names(&group),
            }
        })
        .collect()
}

pub fn venue_breakdown(
    players: &[Player],
    criteria: &PredictionCriteria,
    venues: &[&str],
) -> Vec<ChartBucket> {
    let group: Vec<&Player> = players.iter().collect();
    venues
        .iter()
        .take(5)
        .map(|venue| ChartBucket {
            label: venue
                .split_whitespace()
                .next()
                .unwrap_or(venue)
                .to_string(),
            value: mean_over(&group, |p| {
                venue_form(p, venue) * 50.0
                    + weather_bonus(p, criteria, 20.0)
                    + format_bonus(p, criteria, 30.0)
            }),
            leaders: Vec::new(),
        })
        .collect()
}

/// Top five teams by the comparison heuristic, descending.
pub fn team_comparison(
    players: &[Player],
    criteria: &PredictionCriteria,
    teams: &[String],
) -> Vec<TeamBucket> {
    let mut buckets: Vec<TeamBucket> = teams
        .iter()
        .map(|team| {
            let group: Vec<&Player> = players.iter().filter(|p| &p.team == team).collect();
            TeamBucket {
                team: team.clone(),
                score: mean_over(&group, |p| {
                    venue_form(p, &criteria.venue) * 40.0
                        + weather_bonus(p, criteria, 30.0)
                        + format_bonus(p, criteria, 30.0)
                }),
                players: group.len(),
            }
        })
        .collect();
    buckets.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    buckets.truncate(5);
    buckets
}

pub fn roster_totals(players: &[Player], teams: usize) -> RosterTotals {
    let total_runs = players.iter().map(|p| p.runs as u64).sum();
    let avg_fitness = if players.is_empty() {
        0.0
    } else {
        players.iter().map(|p| p.fitness).sum::<f64>() / players.len() as f64
    };
    RosterTotals {
        players: players.len(),
        total_runs,
        teams,
        avg_fitness,
    }
}

/// Players under the fitness threshold, worst first.
pub fn fitness_alerts(players: &[Player], threshold: f64) -> Vec<&Player> {
    let mut flagged: Vec<&Player> = players.iter().filter(|p| p.fitness < threshold).collect();
    flagged.sort_by(|a, b| {
        a.fitness
            .partial_cmp(&b.fitness)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    flagged
}

pub fn venue_insight(players: &[Player], venue: &str) -> VenueInsight {
    let mut recorded = 0usize;
    let mut sum = 0.0;
    let mut leaders: Vec<(String, f64)> = Vec::new();
    for player in players {
        if let Some(value) = player.venue_performance.get(venue).copied() {
            recorded += 1;
            sum += value;
            leaders.push((player.name.clone(), value));
        }
    }
    leaders.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    leaders.truncate(3);
    VenueInsight {
        venue: venue.to_string(),
        avg_performance: if recorded == 0 {
            0.0
        } else {
            sum / recorded as f64
        },
        recorded,
        leaders,
    }
}

fn venue_form(player: &Player, venue: &str) -> f64 {
    player.venue_performance.get(venue).copied().unwrap_or(50.0) / 100.0
}

fn weather_bonus(player: &Player, criteria: &PredictionCriteria, bonus: f64) -> f64 {
    if player.weather_pref == criteria.weather {
        bonus
    } else {
        0.0
    }
}

fn format_bonus(player: &Player, criteria: &PredictionCriteria, bonus: f64) -> f64 {
    if player.format == Some(criteria.format) {
        bonus
    } else {
        0.0
    }
}

fn mean_over(group: &[&Player], value: impl Fn(&Player) -> f64) -> f64 {
    if group.is_empty() {
        return 0.0;
    }
    group.iter().map(|p| value(p)).sum::<f64>() / group.len() as f64
}

fn leader_names(group: &[&Player]) -> Vec<String> {
    group.iter().take(3).map(|p| p.name.clone()).collect()
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::TeamFilter;

    fn criteria() -> PredictionCriteria {
        PredictionCriteria {
            weather: Weather::Sunny,
            venue: "Lord's".to_string(),
            format: MatchFormat::Test,
            team: TeamFilter::All,
        }
    }

    fn player(id: u32, team: &str, fitness: f64, weather: Weather) -> Player {
        let mut p = Player::empty(id, format!("P{id}"), team.to_string());
        p.fitness = fitness;
        p.weather_pref = weather;
        p.format = Some(MatchFormat::Test);
        p
    }

    #[test]
    fn empty_groups_chart_as_zero() {
        let buckets = weather_breakdown(&[], &criteria());
        assert_eq!(buckets.len(), 3);
        assert!(buckets.iter().all(|b| b.value == 0.0));
    }

    #[test]
    fn team_comparison_keeps_top_five() {
        let players: Vec<Player> = (0..12)
            .map(|i| player(i, &format!("Team {i}"), 100.0, Weather::Sunny))
            .collect();
        let teams = crate::state::unique_teams(&players);
        let buckets = team_comparison(&players, &criteria(), &teams);
        assert_eq!(buckets.len(), 5);
        assert!(
            buckets
                .windows(2)
                .all(|pair| pair[0].score >= pair[1].score)
        );
    }

    #[test]
    fn fitness_alerts_sorted_worst_first() {
        let players = vec![
            player(1, "India", 90.0, Weather::Sunny),
            player(2, "India", 55.0, Weather::Sunny),
            player(3, "India", 62.0, Weather::Sunny),
        ];
        let flagged = fitness_alerts(&players, 70.0);
        assert_eq!(flagged.len(), 2);
        assert_eq!(flagged[0].id, 2);
        assert_eq!(flagged[1].id, 3);
    }

    #[test]
    fn venue_insight_handles_missing_entries() {
        let mut seen = player(1, "India", 90.0, Weather::Sunny);
        seen.venue_performance.insert("Lord's".to_string(), 80.0);
        let unseen = player(2, "India", 90.0, Weather::Sunny);

        let insight = venue_insight(&[seen, unseen], "Lord's");
        assert_eq!(insight.recorded, 1);
        assert_eq!(insight.avg_performance, 80.0);
        assert_eq!(insight.leaders.len(), 1);

        let empty = venue_insight(&[], "Lord's");
        assert_eq!(empty.avg_performance, 0.0);
        assert!(empty.leaders.is_empty());
    }
}
