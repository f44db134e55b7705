use std::collections::{HashMap, VecDeque};
use std::env;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::conditions;
use crate::prediction::{self, PlayerCriteria, PredictionCriteria, ScoredPlayer, TeamFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SportMode {
    Cricket,
    Football,
}

impl SportMode {
    pub fn other(self) -> Self {
        match self {
            SportMode::Cricket => SportMode::Football,
            SportMode::Football => SportMode::Cricket,
        }
    }
}

pub fn sport_label(sport: SportMode) -> &'static str {
    match sport {
        SportMode::Cricket => "CRICKET",
        SportMode::Football => "FOOTBALL",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Cloudy,
    Rainy,
}

impl Weather {
    pub const ALL: [Weather; 3] = [Weather::Sunny, Weather::Cloudy, Weather::Rainy];

    pub fn label(self) -> &'static str {
        match self {
            Weather::Sunny => "sunny",
            Weather::Cloudy => "cloudy",
            Weather::Rainy => "rainy",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Weather::Sunny => Weather::Cloudy,
            Weather::Cloudy => Weather::Rainy,
            Weather::Rainy => Weather::Sunny,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchFormat {
    Test,
    Odi,
    T20,
}

impl MatchFormat {
    pub const ALL: [MatchFormat; 3] = [MatchFormat::Test, MatchFormat::Odi, MatchFormat::T20];

    pub fn label(self) -> &'static str {
        match self {
            MatchFormat::Test => "Test",
            MatchFormat::Odi => "ODI",
            MatchFormat::T20 => "T20",
        }
    }

    pub fn next(self) -> Self {
        match self {
            MatchFormat::Test => MatchFormat::Odi,
            MatchFormat::Odi => MatchFormat::T20,
            MatchFormat::T20 => MatchFormat::Test,
        }
    }

    pub fn from_api(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "test" => Some(MatchFormat::Test),
            "odi" => Some(MatchFormat::Odi),
            "t20" | "t20i" => Some(MatchFormat::T20),
            _ => None,
        }
    }
}

/// A normalized roster entry. Counters default to zero when the API omits
/// them; the condition fields (fitness, weather preference, venue map) are
/// filled in by the data layer after normalization, never by the scoring
/// engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub name: String,
    pub team: String,
    pub format: Option<MatchFormat>,
    pub matches: u32,
    pub runs: u32,
    pub wickets: u32,
    pub catches: u32,
    pub balls: u32,
    pub high_score: u32,
    pub fifties: u32,
    pub hundreds: u32,
    pub stumpings: u32,
    pub batting_avg: f64,
    pub strike_rate: f64,
    pub bowling_avg: f64,
    pub best_bowling: Option<String>,
    pub position: Option<String>,
    pub nationality: Option<String>,
    pub overall: Option<u32>,
    pub fitness: f64,
    pub weather_pref: Weather,
    pub venue_performance: HashMap<String, f64>,
}

impl Player {
    /// A blank record with every counter at zero. Normalizers start from
    /// this so a missing payload field can never leave a counter
    /// uninitialized.
    pub fn empty(id: u32, name: String, team: String) -> Self {
        Self {
            id,
            name,
            team,
            format: None,
            matches: 0,
            runs: 0,
            wickets: 0,
            catches: 0,
            balls: 0,
            high_score: 0,
            fifties: 0,
            hundreds: 0,
            stumpings: 0,
            batting_avg: 0.0,
            strike_rate: 0.0,
            bowling_avg: 0.0,
            best_bowling: None,
            position: None,
            nationality: None,
            overall: None,
            fitness: 0.0,
            weather_pref: Weather::Sunny,
            venue_performance: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Roster,
    Prediction,
    Charts,
    Venues,
    PlayerDetail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortMode {
    Runs,
    Fitness,
    Name,
}

pub fn sort_label(sort: SortMode) -> &'static str {
    match sort {
        SortMode::Runs => "RUNS",
        SortMode::Fitness => "FITNESS",
        SortMode::Name => "NAME",
    }
}

#[derive(Debug)]
pub enum Delta {
    SetRoster {
        sport: SportMode,
        players: Vec<Player>,
    },
    Log(String),
}

#[derive(Debug, Clone)]
pub enum ProviderCommand {
    FetchRoster { sport: SportMode, force: bool },
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub sport: SportMode,
    pub sort: SortMode,
    pub search: String,
    pub search_active: bool,
    pub selected: usize,
    pub roster_team: TeamFilter,
    pub players: Vec<Player>,
    pub teams: Vec<String>,
    pub roster_loading: bool,
    pub roster_fetched_at: Option<SystemTime>,
    pub criteria: PredictionCriteria,
    pub show_prediction: bool,
    pub predicted: Vec<ScoredPlayer>,
    pub detail_player_id: Option<u32>,
    pub detail_criteria: PlayerCriteria,
    pub detail_score: Option<f64>,
    pub detail_back: Screen,
    pub venue_selected: usize,
    pub fitness_threshold: f64,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        let fitness_threshold = env::var("FITNESS_ALERT_THRESHOLD")
            .ok()
            .and_then(|val| val.parse::<f64>().ok())
            .unwrap_or(70.0);
        let sport = SportMode::Cricket;
        let home_venue = conditions::venues_for(sport)[0].to_string();
        Self {
            screen: Screen::Roster,
            sport,
            sort: SortMode::Runs,
            search: String::new(),
            search_active: false,
            selected: 0,
            roster_team: TeamFilter::All,
            players: Vec::new(),
            teams: Vec::new(),
            roster_loading: true,
            roster_fetched_at: None,
            criteria: PredictionCriteria {
                weather: Weather::Sunny,
                venue: home_venue.clone(),
                format: MatchFormat::Test,
                team: TeamFilter::All,
            },
            show_prediction: false,
            predicted: Vec::new(),
            detail_player_id: None,
            detail_criteria: PlayerCriteria {
                weather: Weather::Sunny,
                venue: home_venue,
                format: MatchFormat::Test,
            },
            detail_score: None,
            detail_back: Screen::Roster,
            venue_selected: 0,
            fitness_threshold,
            logs: VecDeque::with_capacity(200),
            help_overlay: false,
        }
    }

    pub fn push_log(&mut self, line: impl Into<String>) {
        if self.logs.len() >= 200 {
            self.logs.pop_front();
        }
        self.logs.push_back(line.into());
    }

    pub fn venues(&self) -> &'static [&'static str] {
        conditions::venues_for(self.sport)
    }

    /// Roster rows visible on the Roster screen: search across name and
    /// team, the browse team filter, then the active sort. Sorts are stable
    /// so equal keys keep roster order.
    pub fn filtered_players(&self) -> Vec<&Player> {
        let needle = self.search.trim().to_lowercase();
        let mut rows: Vec<&Player> = self
            .players
            .iter()
            .filter(|p| {
                if !self.roster_team.matches(&p.team) {
                    return false;
                }
                if needle.is_empty() {
                    return true;
                }
                p.name.to_lowercase().contains(&needle) || p.team.to_lowercase().contains(&needle)
            })
            .collect();

        match self.sort {
            SortMode::Runs => rows.sort_by(|a, b| b.runs.cmp(&a.runs)),
            SortMode::Fitness => rows.sort_by(|a, b| {
                b.fitness
                    .partial_cmp(&a.fitness)
                    .unwrap_or(std::cmp::Ordering::Equal)
            }),
            SortMode::Name => rows.sort_by(|a, b| a.name.cmp(&b.name)),
        }
        rows
    }

    pub fn selected_player(&self) -> Option<&Player> {
        if self.screen == Screen::PlayerDetail
            && let Some(id) = self.detail_player_id
        {
            return self.players.iter().find(|p| p.id == id);
        }
        self.filtered_players().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let total = match self.screen {
            Screen::Venues => self.venues().len(),
            _ => self.filtered_players().len(),
        };
        if total == 0 {
            return;
        }
        match self.screen {
            Screen::Venues => self.venue_selected = (self.venue_selected + 1) % total,
            _ => self.selected = (self.selected + 1) % total,
        }
    }

    pub fn select_prev(&mut self) {
        let total = match self.screen {
            Screen::Venues => self.venues().len(),
            _ => self.filtered_players().len(),
        };
        if total == 0 {
            return;
        }
        match self.screen {
            Screen::Venues => {
                self.venue_selected = self.venue_selected.checked_sub(1).unwrap_or(total - 1)
            }
            _ => self.selected = self.selected.checked_sub(1).unwrap_or(total - 1),
        }
    }

    pub fn cycle_sort(&mut self) {
        self.sort = match self.sort {
            SortMode::Runs => SortMode::Fitness,
            SortMode::Fitness => SortMode::Name,
            SortMode::Name => SortMode::Runs,
        };
        self.selected = 0;
    }

    pub fn cycle_roster_team(&mut self) {
        self.roster_team = next_team_filter(&self.roster_team, &self.teams);
        self.selected = 0;
    }

    pub fn cycle_criteria_team(&mut self) {
        self.criteria.team = next_team_filter(&self.criteria.team, &self.teams);
        self.refresh_prediction();
    }

    pub fn cycle_criteria_weather(&mut self) {
        self.criteria.weather = self.criteria.weather.next();
        self.refresh_prediction();
    }

    pub fn cycle_criteria_venue(&mut self) {
        self.criteria.venue = next_venue(&self.criteria.venue, self.venues());
        self.refresh_prediction();
    }

    pub fn cycle_criteria_format(&mut self) {
        self.criteria.format = self.criteria.format.next();
        self.refresh_prediction();
    }

    pub fn toggle_prediction(&mut self) {
        self.show_prediction = !self.show_prediction;
        if self.show_prediction {
            self.refresh_prediction();
        } else {
            self.predicted.clear();
        }
    }

    /// Re-derive the predicted XI. Runs on every criteria change while the
    /// prediction panel is open, so the table always reflects the current
    /// criteria.
    pub fn refresh_prediction(&mut self) {
        if self.show_prediction {
            self.predicted = prediction::score_roster(&self.players, &self.criteria);
        }
    }

    pub fn open_player_detail(&mut self) {
        let Some(id) = self.filtered_players().get(self.selected).map(|p| p.id) else {
            return;
        };
        self.detail_player_id = Some(id);
        self.detail_criteria = PlayerCriteria {
            weather: Weather::Sunny,
            venue: self.venues()[0].to_string(),
            format: MatchFormat::Test,
        };
        self.detail_score = None;
        self.detail_back = self.screen.clone();
        self.screen = Screen::PlayerDetail;
    }

    pub fn close_player_detail(&mut self) {
        self.screen = self.detail_back.clone();
        self.detail_player_id = None;
        self.detail_score = None;
    }

    pub fn generate_detail_score(&mut self) {
        let criteria = self.detail_criteria.clone();
        let score = self
            .selected_player()
            .map(|player| prediction::score_single_player(player, &criteria));
        if let Some(score) = score {
            self.detail_score = Some(score);
        }
    }

    pub fn toggle_sport(&mut self) {
        self.sport = self.sport.other();
        if self.screen == Screen::PlayerDetail {
            self.screen = Screen::Roster;
        }
        self.detail_player_id = None;
        self.detail_score = None;
        self.players.clear();
        self.teams.clear();
        self.selected = 0;
        self.search.clear();
        self.search_active = false;
        self.roster_team = TeamFilter::All;
        self.roster_loading = true;
        self.roster_fetched_at = None;
        self.show_prediction = false;
        self.predicted.clear();
        self.venue_selected = 0;
        let home_venue = self.venues()[0].to_string();
        self.criteria = PredictionCriteria {
            weather: Weather::Sunny,
            venue: home_venue.clone(),
            format: MatchFormat::Test,
            team: TeamFilter::All,
        };
        self.detail_criteria.venue = home_venue;
        self.push_log(format!("[INFO] Sport: {}", sport_label(self.sport)));
    }
}

fn next_team_filter(current: &TeamFilter, teams: &[String]) -> TeamFilter {
    if teams.is_empty() {
        return TeamFilter::All;
    }
    match current {
        TeamFilter::All => TeamFilter::Only(teams[0].clone()),
        TeamFilter::Only(team) => match teams.iter().position(|t| t == team) {
            Some(idx) if idx + 1 < teams.len() => TeamFilter::Only(teams[idx + 1].clone()),
            _ => TeamFilter::All,
        },
    }
}

fn next_venue(current: &str, venues: &[&str]) -> String {
    let idx = venues.iter().position(|v| *v == current).unwrap_or(0);
    venues[(idx + 1) % venues.len()].to_string()
}

pub fn unique_teams(players: &[Player]) -> Vec<String> {
    let mut teams: Vec<String> = Vec::new();
    for player in players {
        if !player.team.is_empty() && !teams.contains(&player.team) {
            teams.push(player.team.clone());
        }
    }
    teams.sort();
    teams
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetRoster { sport, players } => {
            if sport != state.sport {
                return;
            }
            state.teams = unique_teams(&players);
            state.players = players;
            state.roster_loading = false;
            state.roster_fetched_at = Some(SystemTime::now());
            let visible = state.filtered_players().len();
            if state.selected >= visible {
                state.selected = visible.saturating_sub(1);
            }
            state.refresh_prediction();
        }
        Delta::Log(line) => state.push_log(line),
    }
}
