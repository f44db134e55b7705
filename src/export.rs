use std::path::Path;

use anyhow::{Context, Result};
use rust_xlsxwriter::{Workbook, Worksheet, XlsxError};

use crate::analytics::TeamBucket;
use crate::prediction::{ScoredPlayer, round1};
use crate::state::{Player, SportMode};

pub struct ExportReport {
    pub roster_rows: usize,
    pub predicted_rows: usize,
    pub team_rows: usize,
}

/// Write the current roster, the predicted XI and the team comparison into
/// one workbook, a sheet per table.
pub fn export_workbook(
    path: &Path,
    sport: SportMode,
    players: &[Player],
    predicted: &[ScoredPlayer],
    comparison: &[TeamBucket],
) -> Result<ExportReport> {
    let mut roster_rows = vec![roster_header(sport)];
    for player in players {
        roster_rows.push(roster_row(sport, player));
    }

    let mut predicted_rows = vec![vec![
        "Rank".to_string(),
        "Player".to_string(),
        "Team".to_string(),
        "Score".to_string(),
        "Fitness".to_string(),
        "Weather".to_string(),
    ]];
    for (rank, entry) in predicted.iter().enumerate() {
        predicted_rows.push(vec![
            (rank + 1).to_string(),
            entry.player.name.clone(),
            entry.player.team.clone(),
            format!("{:.1}", round1(entry.prediction_score)),
            format!("{:.0}", entry.player.fitness),
            entry.player.weather_pref.label().to_string(),
        ]);
    }

    let mut team_rows = vec![vec![
        "Team".to_string(),
        "Score".to_string(),
        "Players".to_string(),
    ]];
    for bucket in comparison {
        team_rows.push(vec![
            bucket.team.clone(),
            format!("{:.2}", bucket.score),
            bucket.players.to_string(),
        ]);
    }

    let mut workbook = Workbook::new();
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Roster")?;
        write_rows(sheet, &roster_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("PredictedXI")?;
        write_rows(sheet, &predicted_rows)?;
    }
    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("TeamComparison")?;
        write_rows(sheet, &team_rows)?;
    }

    workbook
        .save(path)
        .with_context(|| format!("failed writing workbook to {}", path.display()))?;

    Ok(ExportReport {
        roster_rows: roster_rows.len().saturating_sub(1),
        predicted_rows: predicted_rows.len().saturating_sub(1),
        team_rows: team_rows.len().saturating_sub(1),
    })
}

fn roster_header(sport: SportMode) -> Vec<String> {
    let mut columns = vec![
        "ID".to_string(),
        "Player".to_string(),
        "Team".to_string(),
    ];
    match sport {
        SportMode::Cricket => columns.extend(
            [
                "Format", "Matches", "Runs", "HS", "Avg", "SR", "Wkts", "Catches", "Fitness",
                "Weather",
            ]
            .map(String::from),
        ),
        SportMode::Football => columns.extend(
            ["Position", "Nationality", "Overall", "Fitness", "Weather"].map(String::from),
        ),
    }
    columns
}

fn roster_row(sport: SportMode, player: &Player) -> Vec<String> {
    let mut row = vec![
        player.id.to_string(),
        player.name.clone(),
        player.team.clone(),
    ];
    match sport {
        SportMode::Cricket => row.extend([
            player
                .format
                .map(|f| f.label().to_string())
                .unwrap_or_default(),
            player.matches.to_string(),
            player.runs.to_string(),
            player.high_score.to_string(),
            format!("{:.2}", player.batting_avg),
            format!("{:.2}", player.strike_rate),
            player.wickets.to_string(),
            player.catches.to_string(),
            format!("{:.0}", player.fitness),
            player.weather_pref.label().to_string(),
        ]),
        SportMode::Football => row.extend([
            player.position.clone().unwrap_or_default(),
            player.nationality.clone().unwrap_or_default(),
            player.overall.map(|o| o.to_string()).unwrap_or_default(),
            format!("{:.0}", player.fitness),
            player.weather_pref.label().to_string(),
        ]),
    }
    row
}

fn write_rows(sheet: &mut Worksheet, rows: &[Vec<String>]) -> Result<(), XlsxError> {
    for (r, row) in rows.iter().enumerate() {
        for (c, cell) in row.iter().enumerate() {
            sheet.write(r as u32, c as u16, cell.as_str())?;
        }
    }
    Ok(())
}
