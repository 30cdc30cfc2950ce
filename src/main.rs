mod config;
mod live;

use crate::config::{AppConfig, DEFAULT_LOG_FILTER, RunMode};
use color_eyre::eyre::{Result, eyre};
use competition_core::utils::TimeEstimation;
use competition_core::{CompetitionData, LeagueTable};
use database::{DatabaseGenerator, DatabaseLoader};
use env_logger::Env;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or(DEFAULT_LOG_FILTER)).init();

    let config = AppConfig::from_env()?;

    let (database, estimated) = TimeEstimation::estimate(|| match &config.competition_file {
        Some(path) => DatabaseLoader::load_from(path),
        None => DatabaseLoader::load(),
    });

    let database = database?;

    info!("database loaded: {} ms", estimated);

    let data = DatabaseGenerator::generate(&database)?;

    let competition_id = match config.competition_id {
        Some(id) => id,
        None => data
            .competitions
            .first()
            .map(|c| c.id)
            .ok_or_else(|| eyre!("no competitions loaded"))?,
    };

    let table = data
        .table(competition_id)
        .ok_or_else(|| eyre!("competition {} not found", competition_id))?;

    print_schedule(&data, competition_id);
    print_table(&data, &table);

    if config.mode == RunMode::Live {
        info!("live match demo started");

        live::run_live_demo(&data, competition_id, config.live_seconds).await?;
    }

    Ok(())
}

fn print_schedule(data: &CompetitionData, competition_id: u32) {
    let Some(competition) = data.competition(competition_id) else {
        return;
    };

    let Some(schedule) = data.schedule(competition_id) else {
        return;
    };

    let fixtures = schedule.to_competition_matches(competition);

    info!(
        "{}: {} tours, {} fixtures",
        competition.name,
        schedule.len(),
        fixtures.len()
    );

    if let (Some(first), Some(last)) = (
        fixtures.first().and_then(|m| m.date),
        fixtures.last().and_then(|m| m.date),
    ) {
        info!("season runs from {} to {}", first, last);
    }
}

fn print_table(data: &CompetitionData, table: &LeagueTable) {
    info!(
        "{:>3} {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
        "#", "Team", "P", "W", "D", "L", "GF", "GA", "GD", "Pts"
    );

    for (idx, row) in table.rows.iter().enumerate() {
        let name = data
            .teams
            .by_id(row.team_id)
            .map(|t| t.name.as_str())
            .unwrap_or("?");

        info!(
            "{:>3} {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>4} {:>4} {:>4}",
            idx + 1,
            name,
            row.played,
            row.wins,
            row.draws,
            row.losses,
            row.goals_for,
            row.goals_against,
            row.goal_difference,
            row.points
        );
    }
}
