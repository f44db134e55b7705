use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::conditions::ConditionProfile;
use crate::http_cache::app_cache_dir;
use crate::state::{Player, SportMode};

const CACHE_FILE: &str = "session.json";
const CACHE_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct CacheFile {
    version: u32,
    sports: HashMap<String, SportCache>,
}

/// Per-sport session snapshot. Condition profiles are the important part:
/// keeping them pins every player's fitness/weather/venue values, so scores
/// stay reproducible across fetches and restarts.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SportCache {
    pub players: Vec<Player>,
    pub teams: Vec<String>,
    #[serde(default)]
    pub profiles: HashMap<u32, ConditionProfile>,
    #[serde(default)]
    pub fetched_at: Option<u64>,
}

pub fn load_sport(sport: SportMode) -> Option<SportCache> {
    let path = cache_path()?;
    let raw = fs::read_to_string(path).ok()?;
    let cache = serde_json::from_str::<CacheFile>(&raw).ok()?;
    if cache.version != CACHE_VERSION {
        return None;
    }
    cache.sports.get(sport_key(sport)).cloned()
}

pub fn save_sport(
    sport: SportMode,
    players: &[Player],
    teams: &[String],
    profiles: &HashMap<u32, ConditionProfile>,
) {
    let Some(path) = cache_path() else {
        return;
    };
    let Some(dir) = path.parent() else {
        return;
    };
    let _ = fs::create_dir_all(dir);

    let mut cache = load_cache_file(&path).unwrap_or_else(|| CacheFile {
        version: CACHE_VERSION,
        sports: HashMap::new(),
    });
    cache.version = CACHE_VERSION;
    cache.sports.insert(
        sport_key(sport).to_string(),
        SportCache {
            players: players.to_vec(),
            teams: teams.to_vec(),
            profiles: profiles.clone(),
            fetched_at: system_time_to_secs(SystemTime::now()),
        },
    );

    if let Ok(json) = serde_json::to_string(&cache) {
        let tmp = path.with_extension("json.tmp");
        if fs::write(&tmp, json).is_ok() {
            let _ = fs::rename(&tmp, &path);
        }
    }
}

fn load_cache_file(path: &Path) -> Option<CacheFile> {
    let raw = fs::read_to_string(path).ok()?;
    serde_json::from_str::<CacheFile>(&raw).ok()
}

fn cache_path() -> Option<PathBuf> {
    app_cache_dir().map(|dir| dir.join(CACHE_FILE))
}

fn system_time_to_secs(time: SystemTime) -> Option<u64> {
    time.duration_since(UNIX_EPOCH).ok().map(|d| d.as_secs())
}

fn sport_key(sport: SportMode) -> &'static str {
    match sport {
        SportMode::Cricket => "cricket",
        SportMode::Football => "football",
    }
}
