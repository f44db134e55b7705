use std::collections::HashSet;
use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::http_cache::fetch_json_cached;
use crate::http_client::{api_base_url, http_client};
use crate::state::{MatchFormat, Player, SportMode};

/// Roster payloads are near-static; within this window a repeat fetch is
/// served straight from the response cache.
const ROSTER_MAX_AGE: Duration = Duration::from_secs(120);

pub fn fetch_roster(sport: SportMode) -> Result<Vec<Player>> {
    let client = http_client()?;
    let path = match sport {
        SportMode::Cricket => "/cricket/players/all",
        SportMode::Football => "/football/players/all",
    };
    let url = format!("{}{}", api_base_url(), path);
    let body = fetch_json_cached(client, &url, ROSTER_MAX_AGE).context("roster request failed")?;
    parse_roster_json(&body, sport)
}

/// Parse a roster payload. The API wraps rows in a `{status, count, data}`
/// envelope, but older deployments returned a bare array or used `players`
/// or `results`; all four shapes are accepted. Empty or `null` bodies are an
/// empty roster, not an error.
pub fn parse_roster_json(raw: &str, sport: SportMode) -> Result<Vec<Player>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Ok(Vec::new());
    }

    let root: Value = serde_json::from_str(trimmed).context("invalid roster json")?;
    let rows = unwrap_player_rows(&root)?;

    let mut players = Vec::with_capacity(rows.len());
    for row in rows {
        let player = match sport {
            SportMode::Cricket => normalize_cricket_row(row),
            SportMode::Football => normalize_football_row(row),
        };
        players.push(player);
    }
    Ok(dedup_players(players))
}

fn unwrap_player_rows(root: &Value) -> Result<Vec<&Value>> {
    if let Some(rows) = root.as_array() {
        return Ok(rows.iter().collect());
    }
    for key in ["data", "players", "results"] {
        if let Some(rows) = root.get(key).and_then(|v| v.as_array()) {
            return Ok(rows.iter().collect());
        }
    }
    Err(anyhow::anyhow!("unexpected roster payload shape"))
}

fn normalize_cricket_row(row: &Value) -> Player {
    let name = pick_string(row, &["NAME"])
        .or_else(|| {
            let first = pick_string(row, &["FIRST"]).unwrap_or_default();
            let last = pick_string(row, &["LAST"]).unwrap_or_default();
            let full = format!("{first} {last}").trim().to_string();
            if full.is_empty() { None } else { Some(full) }
        })
        .unwrap_or_else(|| "Unknown Player".to_string());
    let team = pick_string(row, &["TEAM"]).unwrap_or_else(|| "Unknown Team".to_string());

    let mut player = Player::empty(pick_u32(row, &["NO"]).unwrap_or(0), name, team);
    player.format = pick_string(row, &["FORMAT"])
        .as_deref()
        .and_then(MatchFormat::from_api);
    player.matches = pick_u32(row, &["MAT", "MATCHES"]).unwrap_or(0);
    player.runs = pick_u32(row, &["RUNS"]).unwrap_or(0);
    player.high_score = pick_u32(row, &["HS", "HIGHSCORE"]).unwrap_or(0);
    player.fifties = pick_u32(row, &["FIFTYS", "FIFTIES", "FIFTY"]).unwrap_or(0);
    player.hundreds = pick_u32(row, &["HUNDREDS", "HUNDRED"]).unwrap_or(0);
    player.balls = pick_u32(row, &["BALLS"]).unwrap_or(0);
    player.wickets = pick_u32(row, &["WKT", "WICKETS"]).unwrap_or(0);
    player.catches = pick_u32(row, &["CA", "CATCHES"]).unwrap_or(0);
    player.stumpings = pick_u32(row, &["ST", "STUMPINGS"]).unwrap_or(0);
    player.batting_avg = pick_f64(row, &["AVG"]).unwrap_or(0.0);
    player.bowling_avg = pick_f64(row, &["AVE"]).unwrap_or(0.0);
    player.best_bowling = pick_string(row, &["BBI"]);
    player.strike_rate = if player.balls > 0 {
        (player.runs as f64 / player.balls as f64) * 100.0
    } else {
        0.0
    };
    player
}

fn normalize_football_row(row: &Value) -> Player {
    let name = pick_string(row, &["NAME"]).unwrap_or_else(|| "Unknown Player".to_string());
    let team = pick_string(row, &["CLUB", "TEAM"]).unwrap_or_else(|| "Unknown Team".to_string());

    let mut player = Player::empty(pick_u32(row, &["PLAYERID", "NO"]).unwrap_or(0), name, team);
    player.position = pick_string(row, &["POSITION"]);
    player.nationality = pick_string(row, &["NATIONALITY"]);
    player.overall = pick_u32(row, &["OVERALL"]);
    // The football schema carries rating attributes only, so the cumulative
    // counters stay at zero and scoring leans on conditions alone.
    player
}

fn dedup_players(players: Vec<Player>) -> Vec<Player> {
    let mut seen: HashSet<(u32, String)> = HashSet::with_capacity(players.len());
    players
        .into_iter()
        .filter(|p| seen.insert((p.id, p.name.clone())))
        .collect()
}

fn pick_field<'a>(row: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    let obj = row.as_object()?;
    for key in keys {
        if let Some(value) = obj.get(*key) {
            return Some(value);
        }
    }
    // Column casing varies between warehouse exports; fall back to a
    // case-insensitive scan.
    for key in keys {
        for (name, value) in obj {
            if name.eq_ignore_ascii_case(key) {
                return Some(value);
            }
        }
    }
    None
}

fn pick_string(row: &Value, keys: &[&str]) -> Option<String> {
    match pick_field(row, keys)? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn pick_f64(row: &Value, keys: &[&str]) -> Option<f64> {
    match pick_field(row, keys)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn pick_u32(row: &Value, keys: &[&str]) -> Option<u32> {
    let num = pick_f64(row, keys)?;
    if num.is_finite() && num > 0.0 {
        Some(num as u32)
    } else {
        Some(0)
    }
}
