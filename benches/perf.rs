use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};

use bestxi_terminal::prediction::{PredictionCriteria, TeamFilter, score_roster};
use bestxi_terminal::roster_fetch::parse_roster_json;
use bestxi_terminal::state::{MatchFormat, Player, SportMode, Weather};

fn synthetic_roster(count: u32) -> Vec<Player> {
    (0..count)
        .map(|i| {
            let mut p = Player::empty(
                i,
                format!("Player {i}"),
                format!("Team {}", i % 16),
            );
            p.runs = (i * 37) % 9000;
            p.wickets = (i * 7) % 400;
            p.catches = (i * 3) % 150;
            p.fitness = 50.0 + (i % 100) as f64;
            p.weather_pref = match i % 3 {
                0 => Weather::Sunny,
                1 => Weather::Cloudy,
                _ => Weather::Rainy,
            };
            p.venue_performance
                .insert("Lord's".to_string(), (i % 100) as f64);
            p
        })
        .collect()
}

fn synthetic_payload(count: u32) -> String {
    let rows: Vec<String> = (0..count)
        .map(|i| {
            format!(
                r#"{{"NO": {i}, "NAME": "Player {i}", "TEAM": "Team {}", "MAT": {}, "RUNS": {}, "BALLS": {}, "WKT": {}, "CA": {}}}"#,
                i % 16,
                (i % 200) + 1,
                (i * 37) % 9000,
                (i * 61) % 15000,
                (i * 7) % 400,
                (i * 3) % 150,
            )
        })
        .collect();
    format!(
        r#"{{"status": "success", "count": {count}, "data": [{}]}}"#,
        rows.join(",")
    )
}

fn bench_score_roster(c: &mut Criterion) {
    let roster = synthetic_roster(5000);
    let criteria = PredictionCriteria {
        weather: Weather::Sunny,
        venue: "Lord's".to_string(),
        format: MatchFormat::Test,
        team: TeamFilter::All,
    };
    c.bench_function("score_roster_5000", |b| {
        b.iter(|| score_roster(black_box(&roster), black_box(&criteria)))
    });

    let filtered = PredictionCriteria {
        team: TeamFilter::Only("Team 3".to_string()),
        ..criteria.clone()
    };
    c.bench_function("score_roster_5000_filtered", |b| {
        b.iter(|| score_roster(black_box(&roster), black_box(&filtered)))
    });
}

fn bench_parse_roster(c: &mut Criterion) {
    let payload = synthetic_payload(1000);
    c.bench_function("parse_roster_1000", |b| {
        b.iter(|| parse_roster_json(black_box(&payload), SportMode::Cricket))
    });
}

criterion_group!(benches, bench_score_roster, bench_parse_roster);
criterion_main!(benches);
