use std::io;
use std::path::Path;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph};

use bestxi_terminal::analytics;
use bestxi_terminal::export;
use bestxi_terminal::persist;
use bestxi_terminal::prediction::round1;
use bestxi_terminal::provider;
use bestxi_terminal::state::{
    AppState, Delta, Player, ProviderCommand, Screen, SportMode, apply_delta, sort_label,
    sport_label,
};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::new(),
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.search_active {
            match key.code {
                KeyCode::Esc => {
                    self.state.search.clear();
                    self.state.search_active = false;
                    self.state.selected = 0;
                }
                KeyCode::Enter => self.state.search_active = false,
                KeyCode::Backspace => {
                    self.state.search.pop();
                    self.state.selected = 0;
                }
                KeyCode::Char(c) => {
                    self.state.search.push(c);
                    self.state.selected = 0;
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Char('1') => self.state.screen = Screen::Roster,
            KeyCode::Char('2') => self.state.screen = Screen::Prediction,
            KeyCode::Char('3') => self.state.screen = Screen::Charts,
            KeyCode::Char('4') => self.state.screen = Screen::Venues,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('f') | KeyCode::Char('F') => {
                self.state.toggle_sport();
                self.warm_load_cache();
                self.request_roster(false, true);
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.request_roster(true, true),
            _ => {}
        }

        match self.state.screen {
            Screen::Roster => match key.code {
                KeyCode::Char('/') => self.state.search_active = true,
                KeyCode::Char('s') => self.state.cycle_sort(),
                KeyCode::Char('t') => self.state.cycle_roster_team(),
                KeyCode::Char('d') | KeyCode::Enter => self.state.open_player_detail(),
                _ => {}
            },
            Screen::Prediction => match key.code {
                KeyCode::Char('g') => self.state.toggle_prediction(),
                KeyCode::Char('w') => self.state.cycle_criteria_weather(),
                KeyCode::Char('v') => self.state.cycle_criteria_venue(),
                KeyCode::Char('m') => self.state.cycle_criteria_format(),
                KeyCode::Char('t') => self.state.cycle_criteria_team(),
                KeyCode::Char('x') => self.export_workbook(),
                _ => {}
            },
            Screen::PlayerDetail => match key.code {
                KeyCode::Char('b') | KeyCode::Esc => self.state.close_player_detail(),
                KeyCode::Char('w') => {
                    self.state.detail_criteria.weather = self.state.detail_criteria.weather.next();
                }
                KeyCode::Char('v') => {
                    let venues = self.state.venues();
                    let idx = venues
                        .iter()
                        .position(|v| *v == self.state.detail_criteria.venue)
                        .unwrap_or(0);
                    self.state.detail_criteria.venue = venues[(idx + 1) % venues.len()].to_string();
                }
                KeyCode::Char('m') => {
                    self.state.detail_criteria.format = self.state.detail_criteria.format.next();
                }
                KeyCode::Char('g') => self.state.generate_detail_score(),
                _ => {}
            },
            Screen::Charts | Screen::Venues => {
                if matches!(key.code, KeyCode::Char('b') | KeyCode::Esc) {
                    self.state.screen = Screen::Roster;
                }
            }
        }
    }

    fn request_roster(&mut self, force: bool, announce: bool) {
        let Some(tx) = &self.cmd_tx else {
            if announce {
                self.state.push_log("[INFO] Roster fetch unavailable");
            }
            return;
        };
        let sport = self.state.sport;
        if tx.send(ProviderCommand::FetchRoster { sport, force }).is_err() {
            if announce {
                self.state.push_log("[WARN] Roster request failed");
            }
        } else if announce {
            self.state.push_log("[INFO] Roster request sent");
        }
    }

    /// Show the last persisted roster immediately while the provider
    /// refreshes in the background.
    fn warm_load_cache(&mut self) {
        let sport = self.state.sport;
        if let Some(cache) = persist::load_sport(sport)
            && !cache.players.is_empty()
        {
            apply_delta(
                &mut self.state,
                Delta::SetRoster {
                    sport,
                    players: cache.players,
                },
            );
        }
    }

    fn export_workbook(&mut self) {
        let predicted = if self.state.predicted.is_empty() {
            bestxi_terminal::prediction::score_roster(&self.state.players, &self.state.criteria)
        } else {
            self.state.predicted.clone()
        };
        let comparison =
            analytics::team_comparison(&self.state.players, &self.state.criteria, &self.state.teams);
        let filename = format!(
            "bestxi_{}_{}.xlsx",
            sport_label(self.state.sport).to_lowercase(),
            Local::now().format("%Y%m%d-%H%M%S")
        );
        match export::export_workbook(
            Path::new(&filename),
            self.state.sport,
            &self.state.players,
            &predicted,
            &comparison,
        ) {
            Ok(report) => self.state.push_log(format!(
                "[INFO] Exported {} ({} roster rows, {} XI rows)",
                filename, report.roster_rows, report.predicted_rows
            )),
            Err(err) => self.state.push_log(format!("[WARN] Export failed: {err}")),
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();

    let mut app = App::new(Some(cmd_tx));
    app.warm_load_cache();
    provider::spawn_roster_provider(tx, cmd_rx, app.state.sport);

    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(&app.state)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Roster => render_roster(frame, chunks[1], &app.state),
        Screen::Prediction => render_prediction(frame, chunks[1], &app.state),
        Screen::Charts => render_charts(frame, chunks[1], &app.state),
        Screen::Venues => render_venues(frame, chunks[1], &app.state),
        Screen::PlayerDetail => render_player_detail(frame, chunks[1], &app.state),
    }

    let footer =
        Paragraph::new(footer_text(&app.state)).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let title = match state.screen {
        Screen::Roster => format!(
            "BESTXI ROSTER | {} | Sort: {} | Team: {}",
            sport_label(state.sport),
            sort_label(state.sort),
            state.roster_team.label()
        ),
        Screen::Prediction => format!("BESTXI PREDICTION | {}", sport_label(state.sport)),
        Screen::Charts => format!("BESTXI CHARTS | {}", sport_label(state.sport)),
        Screen::Venues => format!("BESTXI VENUES | {}", sport_label(state.sport)),
        Screen::PlayerDetail => format!("BESTXI PLAYER | {}", sport_label(state.sport)),
    };
    let line1 = format!("  _  {}", title);
    let line2 = " (_)".to_string();
    let line3 = " /|\\".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    if state.search_active {
        return format!("Search: {}_ (Enter keep, Esc clear)", state.search);
    }
    match state.screen {
        Screen::Roster => {
            "1-4 Screens | j/k Move | / Search | s Sort | t Team | f Sport | Enter Player | r Refresh | ? Help | q Quit"
                .to_string()
        }
        Screen::Prediction => {
            "1-4 Screens | g Generate | w Weather | v Venue | m Format | t Team | x Export | ? Help | q Quit"
                .to_string()
        }
        Screen::Charts => "1-4 Screens | w/v/m via Prediction | b Back | ? Help | q Quit".to_string(),
        Screen::Venues => "1-4 Screens | j/k Venue | b Back | ? Help | q Quit".to_string(),
        Screen::PlayerDetail => {
            "b/Esc Back | w Weather | v Venue | m Format | g Calculate | q Quit".to_string()
        }
    }
}

fn render_roster(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let totals = analytics::roster_totals(&state.players, state.teams.len());
    let strip = format!(
        "Players: {} | Total Runs: {} | Teams: {} | Avg Fitness: {:.1}",
        totals.players, totals.total_runs, totals.teams, totals.avg_fitness
    );
    frame.render_widget(
        Paragraph::new(strip).style(Style::default().add_modifier(Modifier::BOLD)),
        sections[0],
    );

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(48), Constraint::Length(34)])
        .split(sections[1]);

    render_roster_table(frame, columns[0], state);

    let side = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(5)])
        .split(columns[1]);
    render_fitness_alerts(frame, side[0], state);

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, side[1]);
}

fn render_roster_table(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = roster_columns(state.sport);
    render_roster_header(frame, sections[0], state.sport, &widths);

    let list_area = sections[1];
    let rows = state.filtered_players();
    if state.roster_loading && rows.is_empty() {
        let empty =
            Paragraph::new("Loading roster...").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }
    if rows.is_empty() {
        let empty = Paragraph::new("No players match the current filters")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    if list_area.height == 0 {
        return;
    }
    let visible = list_area.height as usize;
    let (start, end) = visible_range(state.selected, rows.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };

        let selected = idx == state.selected;
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths.clone())
            .split(row_area);

        let player = rows[idx];
        for (c, text) in roster_cells(state.sport, player).into_iter().enumerate() {
            render_cell_text(frame, cols[c], &text, row_style);
        }
    }
}

fn roster_columns(sport: SportMode) -> Vec<Constraint> {
    match sport {
        SportMode::Cricket => vec![
            Constraint::Length(5),
            Constraint::Min(18),
            Constraint::Length(14),
            Constraint::Length(7),
            Constraint::Length(6),
            Constraint::Length(6),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(8),
        ],
        SportMode::Football => vec![
            Constraint::Length(7),
            Constraint::Min(18),
            Constraint::Length(14),
            Constraint::Length(5),
            Constraint::Length(13),
            Constraint::Length(5),
            Constraint::Length(5),
            Constraint::Length(8),
        ],
    }
}

fn roster_header_labels(sport: SportMode) -> Vec<&'static str> {
    match sport {
        SportMode::Cricket => vec!["No", "Player", "Team", "Runs", "Mat", "Wkts", "Ct", "Fit", "Weather"],
        SportMode::Football => vec!["ID", "Player", "Club", "Pos", "Nation", "Ovr", "Fit", "Weather"],
    }
}

fn roster_cells(sport: SportMode, player: &Player) -> Vec<String> {
    match sport {
        SportMode::Cricket => vec![
            player.id.to_string(),
            player.name.clone(),
            player.team.clone(),
            player.runs.to_string(),
            player.matches.to_string(),
            player.wickets.to_string(),
            player.catches.to_string(),
            format!("{:.0}", player.fitness),
            player.weather_pref.label().to_string(),
        ],
        SportMode::Football => vec![
            player.id.to_string(),
            player.name.clone(),
            player.team.clone(),
            player.position.clone().unwrap_or_else(|| "-".to_string()),
            player
                .nationality
                .clone()
                .unwrap_or_else(|| "-".to_string()),
            player
                .overall
                .map(|o| o.to_string())
                .unwrap_or_else(|| "-".to_string()),
            format!("{:.0}", player.fitness),
            player.weather_pref.label().to_string(),
        ],
    }
}

fn render_roster_header(frame: &mut Frame, area: Rect, sport: SportMode, widths: &[Constraint]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths.to_vec())
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);
    for (c, label) in roster_header_labels(sport).into_iter().enumerate() {
        render_cell_text(frame, cols[c], label, style);
    }
}

fn render_fitness_alerts(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title("Fitness Alerts")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let flagged = analytics::fitness_alerts(&state.players, state.fitness_threshold);
    if flagged.is_empty() {
        let empty = Paragraph::new("No fitness alerts currently")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let mut lines: Vec<String> = flagged
        .iter()
        .take(5)
        .map(|p| format!("{} ({}) fit {:.0}", p.name, p.team, p.fitness))
        .collect();
    if flagged.len() > 5 {
        lines.push(format!("+{} more alerts...", flagged.len() - 5));
    }
    let list = Paragraph::new(lines.join("\n")).style(Style::default().fg(Color::Yellow));
    frame.render_widget(list, inner);
}

fn render_prediction(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(1)])
        .split(area);

    let criteria = &state.criteria;
    let summary = format!(
        "Criteria: {} weather at {} ({}) | Team: {}\n{}",
        criteria.weather.label(),
        criteria.venue,
        criteria.format.label(),
        criteria.team.label(),
        if state.show_prediction {
            "Recommended lineup from performance, fitness, weather preference and venue history"
                .to_string()
        } else {
            "Press g to generate the recommended XI".to_string()
        }
    );
    let summary_widget = Paragraph::new(summary)
        .block(Block::default().title("Smart Team Prediction").borders(Borders::ALL));
    frame.render_widget(summary_widget, sections[0]);

    if !state.show_prediction {
        return;
    }
    if state.predicted.is_empty() {
        let empty = Paragraph::new("No candidates after team filtering")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, sections[1]);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(44), Constraint::Length(32)])
        .split(sections[1]);

    render_predicted_table(frame, columns[0], state);

    let chart = xi_bar_chart(state);
    frame.render_widget(
        chart.block(Block::default().title("XI Scores").borders(Borders::ALL)),
        columns[1],
    );
}

fn render_predicted_table(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = [
        Constraint::Length(5),
        Constraint::Min(18),
        Constraint::Length(14),
        Constraint::Length(7),
        Constraint::Length(5),
        Constraint::Length(8),
    ];
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(sections[0]);
    let style = Style::default().add_modifier(Modifier::BOLD);
    for (c, label) in ["Rank", "Player", "Team", "Score", "Fit", "Weather"]
        .into_iter()
        .enumerate()
    {
        render_cell_text(frame, cols[c], label, style);
    }

    let list_area = sections[1];
    for (i, entry) in state
        .predicted
        .iter()
        .take(list_area.height as usize)
        .enumerate()
    {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);
        let cells = [
            format!("{}", i + 1),
            entry.player.name.clone(),
            entry.player.team.clone(),
            format!("{:.1}", round1(entry.prediction_score)),
            format!("{:.0}", entry.player.fitness),
            entry.player.weather_pref.label().to_string(),
        ];
        for (c, text) in cells.into_iter().enumerate() {
            render_cell_text(frame, cols[c], &text, Style::default());
        }
    }
}

fn xi_bar_chart(state: &AppState) -> BarChart<'static> {
    let bars: Vec<Bar> = state
        .predicted
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            Bar::default()
                .value(entry.prediction_score.round().max(0.0) as u64)
                .label(Line::from(format!("{}", i + 1)))
                .style(Style::default().fg(Color::Green))
        })
        .collect();
    BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(2)
        .bar_gap(1)
        .max(100)
}

fn render_charts(frame: &mut Frame, area: Rect, state: &AppState) {
    let pool: Vec<Player> = state
        .players
        .iter()
        .filter(|p| state.criteria.team.matches(&p.team))
        .cloned()
        .collect();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[0]);
    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    if state.sport == SportMode::Cricket {
        let buckets = analytics::format_breakdown(&pool, &state.criteria);
        render_bucket_chart(frame, top[0], "By Format", &buckets);
    } else {
        let empty = Paragraph::new("Format charts apply to cricket only")
            .block(Block::default().title("By Format").borders(Borders::ALL))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, top[0]);
    }

    let weather = analytics::weather_breakdown(&pool, &state.criteria);
    render_bucket_chart(frame, top[1], "By Weather", &weather);

    let venues = analytics::venue_breakdown(&pool, &state.criteria, state.venues());
    render_bucket_chart(frame, bottom[0], "By Venue", &venues);

    let teams = analytics::team_comparison(&state.players, &state.criteria, &state.teams);
    let team_buckets: Vec<analytics::ChartBucket> = teams
        .into_iter()
        .map(|b| analytics::ChartBucket {
            label: b.team,
            value: b.score,
            leaders: Vec::new(),
        })
        .collect();
    render_bucket_chart(frame, bottom[1], "Top Teams", &team_buckets);
}

fn render_bucket_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    buckets: &[analytics::ChartBucket],
) {
    let bars: Vec<Bar> = buckets
        .iter()
        .map(|bucket| {
            Bar::default()
                .value(bucket.value.round().max(0.0) as u64)
                .label(Line::from(truncate_label(&bucket.label, 9)))
                .style(Style::default().fg(Color::Cyan))
        })
        .collect();
    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(1)
        .max(100)
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(chart, area);
}

fn truncate_label(raw: &str, max: usize) -> String {
    if raw.chars().count() <= max {
        raw.to_string()
    } else {
        raw.chars().take(max).collect()
    }
}

fn render_venues(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(30)])
        .split(area);

    let venues = state.venues();
    let mut lines = Vec::new();
    for (idx, venue) in venues.iter().enumerate() {
        let prefix = if idx == state.venue_selected { "> " } else { "  " };
        lines.push(format!("{prefix}{venue}"));
    }
    let list = Paragraph::new(lines.join("\n"))
        .block(Block::default().title("Venues").borders(Borders::ALL));
    frame.render_widget(list, columns[0]);

    let venue = venues
        .get(state.venue_selected)
        .copied()
        .unwrap_or(venues[0]);
    let insight = analytics::venue_insight(&state.players, venue);
    let mut text = vec![
        format!("Venue: {}", insight.venue),
        format!("Avg performance: {:.1}", insight.avg_performance),
        format!(
            "Recorded entries: {} of {}",
            insight.recorded,
            state.players.len()
        ),
        String::new(),
        "Top performers:".to_string(),
    ];
    if insight.leaders.is_empty() {
        text.push("  (no data yet)".to_string());
    }
    for (name, value) in &insight.leaders {
        text.push(format!("  {name} {value:.1}"));
    }
    let detail = Paragraph::new(text.join("\n"))
        .block(Block::default().title("Venue Insights").borders(Borders::ALL));
    frame.render_widget(detail, columns[1]);
}

fn render_player_detail(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(player) = state.selected_player() else {
        let empty = Paragraph::new("No player selected");
        frame.render_widget(empty, area);
        return;
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(36), Constraint::Length(40)])
        .split(area);

    let mut lines = vec![
        format!("{} - {}", player.name, player.team),
        String::new(),
    ];
    match state.sport {
        SportMode::Cricket => {
            lines.push(format!(
                "Format: {}",
                player
                    .format
                    .map(|f| f.label())
                    .unwrap_or("-")
            ));
            lines.push(format!("Matches: {}", player.matches));
            lines.push(format!(
                "Runs: {} (HS {}, avg {:.2}, SR {:.2})",
                player.runs, player.high_score, player.batting_avg, player.strike_rate
            ));
            lines.push(format!("100s/50s: {}/{}", player.hundreds, player.fifties));
            lines.push(format!(
                "Wickets: {} (best {}, avg {:.2})",
                player.wickets,
                player.best_bowling.as_deref().unwrap_or("-"),
                player.bowling_avg
            ));
            lines.push(format!(
                "Catches/Stumpings: {}/{}",
                player.catches, player.stumpings
            ));
        }
        SportMode::Football => {
            lines.push(format!(
                "Position: {}",
                player.position.as_deref().unwrap_or("-")
            ));
            lines.push(format!(
                "Nationality: {}",
                player.nationality.as_deref().unwrap_or("-")
            ));
            lines.push(format!(
                "Overall: {}",
                player
                    .overall
                    .map(|o| o.to_string())
                    .unwrap_or_else(|| "-".to_string())
            ));
        }
    }
    lines.push(String::new());
    lines.push(format!("Fitness: {:.0}", player.fitness));
    lines.push(format!("Prefers: {}", player.weather_pref.label()));
    lines.push("Venue form:".to_string());
    for venue in state.venues() {
        let value = player
            .venue_performance
            .get(*venue)
            .copied()
            .map(|v| format!("{v:.1}"))
            .unwrap_or_else(|| "-".to_string());
        lines.push(format!("  {venue}: {value}"));
    }
    let card = Paragraph::new(lines.join("\n"))
        .block(Block::default().title("Player Card").borders(Borders::ALL));
    frame.render_widget(card, columns[0]);

    let criteria = &state.detail_criteria;
    let mut right = vec![
        format!("Weather: {}", criteria.weather.label()),
        format!("Venue: {}", criteria.venue),
        format!("Format: {}", criteria.format.label()),
        String::new(),
    ];
    match state.detail_score {
        Some(score) => {
            right.push(format!("Prediction Score: {score:.1}"));
            right.push("Based on current form, venue history,".to_string());
            right.push("and weather preference".to_string());
        }
        None => right.push("Press g to calculate".to_string()),
    }
    let prediction = Paragraph::new(right.join("\n")).block(
        Block::default()
            .title("Generate Prediction")
            .borders(Borders::ALL),
    );
    frame.render_widget(prediction, columns[1]);
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    state
        .logs
        .iter()
        .rev()
        .take(3)
        .cloned()
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text.to_string()).style(style);
    frame.render_widget(paragraph, area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "BestXI Terminal - Help",
        "",
        "Global:",
        "  1            Roster",
        "  2            Prediction",
        "  3            Charts",
        "  4            Venues",
        "  f            Toggle sport",
        "  r            Refresh roster",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Roster:",
        "  j/k or ↑/↓   Move",
        "  /            Search players or teams",
        "  s            Cycle sort mode",
        "  t            Cycle team filter",
        "  Enter / d    Player card",
        "",
        "Prediction:",
        "  g            Generate / hide XI",
        "  w/v/m/t      Cycle criteria",
        "  x            Export workbook",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
