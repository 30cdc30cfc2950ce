use competition_core::{CompetitionData, LiveMatchRegistry, Match, MatchStatus, NewMatchEvent};
use color_eyre::eyre::{Result, eyre};
use log::{debug, info};
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::time::sleep;

/// First stored fixture not yet finished, otherwise the first scheduled
/// pairing with no stored match.
fn next_fixture(data: &CompetitionData, competition_id: u32) -> Option<Match> {
    if let Some(fixture) = data
        .matches_of(competition_id)
        .find(|m| m.status != MatchStatus::Finished)
    {
        return Some(fixture.clone());
    }

    data.fixtures(competition_id)?
        .into_iter()
        .find(|m| data.match_by_id(&m.id).is_none())
}

/// Plays the next unplayed fixture of a competition in real time for
/// `seconds`, recording a few events along the way.
pub async fn run_live_demo(data: &CompetitionData, competition_id: u32, seconds: u64) -> Result<()> {
    let fixture = next_fixture(data, competition_id)
        .ok_or_else(|| eyre!("competition {} has no match left to play", competition_id))?;

    let match_id = fixture.id.clone();
    let home_team = fixture.home_team_id;
    let away_team = fixture.away_team_id;

    let roster = data.roster();
    let home_players = roster.players_of(home_team);
    let away_players = roster.players_of(away_team);

    let registry = LiveMatchRegistry::new();
    let engine = registry.open(fixture, roster)?;

    let mut snapshots = engine.subscribe();
    let watcher = tokio::spawn(async move {
        loop {
            match snapshots.recv().await {
                Ok(snapshot) => {
                    let (home, away) = snapshot.score();
                    debug!(
                        "[{}] {}s {}:{} running={}",
                        snapshot.match_id(),
                        snapshot.elapsed_seconds(),
                        home,
                        away,
                        snapshot.clock_running
                    );
                }
                Err(RecvError::Lagged(skipped)) => debug!("skipped {} snapshots", skipped),
                Err(RecvError::Closed) => break,
            }
        }
    });

    engine.start()?;
    info!("live match {} started", engine.match_id());

    for second in 1..=seconds {
        sleep(Duration::from_secs(1)).await;

        let event = match (second % 4, home_players.first(), away_players.first()) {
            (1, Some(&player), _) => Some(NewMatchEvent::goal(home_team, player)),
            (2, _, Some(&player)) => Some(NewMatchEvent::yellow_card(away_team, player)),
            (3, _, _) => match (away_players.first(), away_players.get(1)) {
                (Some(&player_out), Some(&player_in)) => {
                    Some(NewMatchEvent::substitution(away_team, player_out, player_in))
                }
                _ => None,
            },
            _ => None,
        };

        if let Some(event) = event {
            let snapshot = engine.add_event(event)?;

            if let Some(recorded) = snapshot.latest_event() {
                info!(
                    "{}' {} for team {}",
                    recorded.minute,
                    recorded.event_type(),
                    recorded.team_id
                );
            }
        }
    }

    engine.finish()?;

    let last = registry.close(&match_id)?;
    // last handle, closes the snapshot stream
    drop(engine);

    let (home, away) = last.score();

    info!(
        "live match {} ended {}:{} after {}s with {} events",
        last.match_id(),
        home,
        away,
        last.elapsed_seconds(),
        last.events().len()
    );

    watcher.await?;

    Ok(())
}
