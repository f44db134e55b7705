use std::fs;
use std::path::PathBuf;

use bestxi_terminal::roster_fetch::parse_roster_json;
use bestxi_terminal::state::{MatchFormat, SportMode};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_cricket_fixture() {
    let raw = read_fixture("cricket_players.json");
    let players = parse_roster_json(&raw, SportMode::Cricket).expect("fixture should parse");
    assert_eq!(players.len(), 3);

    let verma = &players[0];
    assert_eq!(verma.id, 7);
    assert_eq!(verma.name, "A. Verma");
    assert_eq!(verma.team, "Mumbai");
    assert_eq!(verma.format, Some(MatchFormat::Test));
    assert_eq!(verma.runs, 8412);
    assert_eq!(verma.wickets, 4);
    assert_eq!(verma.catches, 121);
    assert_eq!(verma.best_bowling.as_deref(), Some("2/14"));
    assert!((verma.batting_avg - 48.34).abs() < 1e-9);
    assert!((verma.strike_rate - 8412.0 / 15320.0 * 100.0).abs() < 1e-9);
}

#[test]
fn name_falls_back_to_first_last_then_placeholder() {
    let raw = read_fixture("cricket_players.json");
    let players = parse_roster_json(&raw, SportMode::Cricket).expect("fixture should parse");

    assert_eq!(players[1].name, "Rohan Iyer");
    // Numeric strings in the payload still count.
    assert_eq!(players[1].runs, 3950);

    assert_eq!(players[2].name, "Unknown Player");
    assert_eq!(players[2].runs, 0);
    assert_eq!(players[2].strike_rate, 0.0);
}

#[test]
fn parses_football_fixture() {
    let raw = read_fixture("football_players.json");
    let players = parse_roster_json(&raw, SportMode::Football).expect("fixture should parse");
    assert_eq!(players.len(), 2);

    let mora = &players[0];
    assert_eq!(mora.id, 551);
    assert_eq!(mora.team, "Arsenal");
    assert_eq!(mora.position.as_deref(), Some("ST"));
    assert_eq!(mora.overall, Some(86));
    // No cricket counters in the football schema.
    assert_eq!(mora.runs, 0);
    assert_eq!(mora.wickets, 0);
}

#[test]
fn accepts_bare_array_and_alternate_envelopes() {
    let bare = r#"[{"NO": 1, "NAME": "Solo", "TEAM": "Delhi", "RUNS": 10}]"#;
    let players = parse_roster_json(bare, SportMode::Cricket).expect("array should parse");
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].runs, 10);

    for key in ["players", "results"] {
        let wrapped = format!(r#"{{"{key}": [{{"NO": 2, "NAME": "Wrapped", "TEAM": "Delhi"}}]}}"#);
        let players =
            parse_roster_json(&wrapped, SportMode::Cricket).expect("envelope should parse");
        assert_eq!(players.len(), 1);
        assert_eq!(players[0].name, "Wrapped");
    }
}

#[test]
fn null_and_empty_bodies_are_empty_rosters() {
    assert!(
        parse_roster_json("null", SportMode::Cricket)
            .expect("null should parse")
            .is_empty()
    );
    assert!(
        parse_roster_json("  ", SportMode::Cricket)
            .expect("blank should parse")
            .is_empty()
    );
}

#[test]
fn unexpected_shapes_are_rejected() {
    assert!(parse_roster_json(r#"{"count": 3}"#, SportMode::Cricket).is_err());
    assert!(parse_roster_json("not json", SportMode::Cricket).is_err());
}

#[test]
fn duplicate_rows_are_suppressed() {
    let raw = r#"[
        {"NO": 5, "NAME": "Twice", "TEAM": "Delhi", "RUNS": 100},
        {"NO": 5, "NAME": "Twice", "TEAM": "Delhi", "RUNS": 100},
        {"NO": 5, "NAME": "Other", "TEAM": "Delhi", "RUNS": 50}
    ]"#;
    let players = parse_roster_json(raw, SportMode::Cricket).expect("should parse");
    // Same id with a different name is a distinct record.
    assert_eq!(players.len(), 2);
}

#[test]
fn lowercase_columns_are_tolerated() {
    let raw = r#"[{"no": 9, "name": "Lower", "team": "Chennai", "runs": 777, "wkt": 3}]"#;
    let players = parse_roster_json(raw, SportMode::Cricket).expect("should parse");
    assert_eq!(players[0].id, 9);
    assert_eq!(players[0].runs, 777);
    assert_eq!(players[0].wickets, 3);
}
