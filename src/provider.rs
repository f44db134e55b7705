use std::collections::HashMap;
use std::env;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::conditions;
use crate::persist;
use crate::roster_fetch;
use crate::state::{Delta, Player, ProviderCommand, SportMode, sport_label, unique_teams};

/// Background roster provider. Owns all network work: the UI thread only
/// exchanges commands and deltas over the channels.
pub fn spawn_roster_provider(
    tx: Sender<Delta>,
    cmd_rx: Receiver<ProviderCommand>,
    initial: SportMode,
) {
    thread::spawn(move || {
        let mut rng = rand::thread_rng();
        let refetch_interval = Duration::from_secs(
            env::var("ROSTER_POLL_SECS")
                .ok()
                .and_then(|val| val.parse::<u64>().ok())
                .unwrap_or(300)
                .max(30),
        );
        let mut last_fetch: HashMap<SportMode, Instant> = HashMap::new();

        serve_roster(
            &tx,
            initial,
            true,
            refetch_interval,
            &mut last_fetch,
            &mut rng,
        );

        loop {
            match cmd_rx.recv_timeout(Duration::from_millis(500)) {
                Ok(ProviderCommand::FetchRoster { sport, force }) => {
                    serve_roster(
                        &tx,
                        sport,
                        force,
                        refetch_interval,
                        &mut last_fetch,
                        &mut rng,
                    );
                }
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    });
}

fn serve_roster(
    tx: &Sender<Delta>,
    sport: SportMode,
    force: bool,
    refetch_interval: Duration,
    last_fetch: &mut HashMap<SportMode, Instant>,
    rng: &mut impl Rng,
) {
    if !force
        && let Some(last) = last_fetch.get(&sport)
        && last.elapsed() < refetch_interval
    {
        let _ = tx.send(Delta::Log(format!(
            "[INFO] Roster throttled ({}s)",
            refetch_interval.as_secs()
        )));
        return;
    }

    let cached = persist::load_sport(sport);
    let mut profiles = cached
        .as_ref()
        .map(|c| c.profiles.clone())
        .unwrap_or_default();

    match roster_fetch::fetch_roster(sport) {
        Ok(mut players) if !players.is_empty() => {
            conditions::assign_profiles(&mut players, &mut profiles, sport, rng);
            let teams = unique_teams(&players);
            persist::save_sport(sport, &players, &teams, &profiles);
            last_fetch.insert(sport, Instant::now());
            let _ = tx.send(Delta::Log(format!(
                "[INFO] {} roster loaded ({} players, {} teams)",
                sport_label(sport),
                players.len(),
                teams.len()
            )));
            let _ = tx.send(Delta::SetRoster { sport, players });
        }
        Ok(_) => {
            let _ = tx.send(Delta::Log(format!(
                "[WARN] {} roster response was empty",
                sport_label(sport)
            )));
            serve_fallback(tx, sport, cached, &mut profiles, rng);
        }
        Err(err) => {
            let _ = tx.send(Delta::Log(format!("[WARN] Roster fetch error: {err}")));
            serve_fallback(tx, sport, cached, &mut profiles, rng);
        }
    }
}

/// When the API is unreachable, fall back to the last cached roster; with no
/// cache, load a small built-in squad so every screen stays usable offline.
fn serve_fallback(
    tx: &Sender<Delta>,
    sport: SportMode,
    cached: Option<persist::SportCache>,
    profiles: &mut HashMap<u32, conditions::ConditionProfile>,
    rng: &mut impl Rng,
) {
    if let Some(cache) = cached
        && !cache.players.is_empty()
    {
        let _ = tx.send(Delta::Log(format!(
            "[INFO] Using cached {} roster ({} players)",
            sport_label(sport),
            cache.players.len()
        )));
        let _ = tx.send(Delta::SetRoster {
            sport,
            players: cache.players,
        });
        return;
    }

    let mut players = seed_roster(sport);
    conditions::assign_profiles(&mut players, profiles, sport, rng);
    let teams = unique_teams(&players);
    persist::save_sport(sport, &players, &teams, profiles);
    let _ = tx.send(Delta::Log(format!(
        "[INFO] Using built-in demo {} roster",
        sport_label(sport)
    )));
    let _ = tx.send(Delta::SetRoster { sport, players });
}

fn seed_roster(sport: SportMode) -> Vec<Player> {
    match sport {
        SportMode::Cricket => vec![
            cricket_seed(1, "V. Sharma", "Mumbai", 5400, 12, 48, 120),
            cricket_seed(2, "R. Patel", "Mumbai", 3100, 88, 35, 96),
            cricket_seed(3, "A. Khan", "Mumbai", 1250, 140, 22, 77),
            cricket_seed(4, "S. Iyer", "Delhi", 4200, 4, 51, 104),
            cricket_seed(5, "M. Reddy", "Delhi", 2600, 61, 30, 85),
            cricket_seed(6, "D. Joshi", "Chennai", 3900, 25, 44, 101),
            cricket_seed(7, "K. Nair", "Chennai", 880, 122, 18, 64),
            cricket_seed(8, "P. Singh", "Kolkata", 4700, 9, 39, 112),
            cricket_seed(9, "T. Das", "Kolkata", 1500, 97, 27, 73),
            cricket_seed(10, "H. Verma", "Bangalore", 3300, 33, 41, 92),
            cricket_seed(11, "J. Menon", "Bangalore", 2050, 74, 25, 80),
            cricket_seed(12, "N. Gill", "Delhi", 2900, 18, 33, 89),
        ],
        SportMode::Football => vec![
            football_seed(101, "L. Mora", "Arsenal", "FW", "Spain", 86),
            football_seed(102, "E. Costa", "Arsenal", "MF", "Portugal", 83),
            football_seed(103, "J. Weber", "Bayern", "DF", "Germany", 85),
            football_seed(104, "T. Laurent", "Bayern", "GK", "France", 88),
            football_seed(105, "M. Rossi", "Milan", "FW", "Italy", 82),
            football_seed(106, "A. Silva", "Milan", "MF", "Brazil", 87),
            football_seed(107, "C. Young", "Chelsea", "DF", "England", 80),
            football_seed(108, "O. Eriksen", "Chelsea", "MF", "Denmark", 84),
        ],
    }
}

fn cricket_seed(id: u32, name: &str, team: &str, runs: u32, wickets: u32, catches: u32, matches: u32) -> Player {
    let mut p = Player::empty(id, name.to_string(), team.to_string());
    p.format = Some(crate::state::MatchFormat::Test);
    p.matches = matches;
    p.runs = runs;
    p.wickets = wickets;
    p.catches = catches;
    p.balls = runs.saturating_mul(2);
    p.high_score = (runs / 30).max(20);
    p.fifties = runs / 400;
    p.hundreds = runs / 1500;
    p.batting_avg = runs as f64 / matches.max(1) as f64;
    p.strike_rate = if p.balls > 0 {
        p.runs as f64 / p.balls as f64 * 100.0
    } else {
        0.0
    };
    p
}

fn football_seed(
    id: u32,
    name: &str,
    club: &str,
    position: &str,
    nationality: &str,
    overall: u32,
) -> Player {
    let mut p = Player::empty(id, name.to_string(), club.to_string());
    p.position = Some(position.to_string());
    p.nationality = Some(nationality.to_string());
    p.overall = Some(overall);
    p
}
