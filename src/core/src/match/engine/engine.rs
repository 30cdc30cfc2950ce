use super::clock::{MatchClock, TickTarget};
use crate::club::PlayerRoster;
use crate::r#match::{
    Match, MatchEngineError, MatchEvent, MatchSnapshot, MatchStatus, NewMatchEvent,
};
use log::{debug, info, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::runtime::Handle;
use tokio::sync::broadcast;

pub const SNAPSHOT_CHANNEL_CAPACITY: usize = 64;

type SharedRoster = Arc<dyn PlayerRoster + Send + Sync>;

struct MatchState {
    fixture: Match,
    clock: MatchClock,
    next_event_id: u32,
}

impl MatchState {
    fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::new(self.fixture.clone(), self.clock.is_running())
    }

    fn ensure_not_finished(&self) -> Result<(), MatchEngineError> {
        if self.fixture.status.is_finished() {
            return Err(MatchEngineError::MatchFinished(self.fixture.id.clone()));
        }

        Ok(())
    }
}

struct EngineInner {
    state: Mutex<MatchState>,
    snapshots: broadcast::Sender<MatchSnapshot>,
}

impl EngineInner {
    fn lock(&self) -> MutexGuard<'_, MatchState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Call with the state lock held so subscribers see snapshots in
    /// mutation order.
    fn publish(&self, snapshot: &MatchSnapshot) {
        // no subscribers is fine
        let _ = self.snapshots.send(snapshot.clone());
    }
}

impl TickTarget for EngineInner {
    fn tick(&self, generation: u64) -> bool {
        let mut state = self.lock();

        if !state.clock.accepts(generation) {
            return false;
        }

        state.fixture.elapsed_seconds = state.fixture.elapsed_seconds.saturating_add(1);

        let snapshot = state.snapshot();
        self.publish(&snapshot);

        true
    }
}

/// Drives one match in real time: a one-second clock, the event log and
/// the score derived from it.
///
/// Every successful mutation returns the resulting [`MatchSnapshot`] and
/// publishes it to subscribers. A failed operation changes nothing.
pub struct LiveMatchEngine {
    match_id: String,
    roster: SharedRoster,
    inner: Arc<EngineInner>,
}

impl LiveMatchEngine {
    /// Takes over `fixture` as stored. The score is rebuilt from the goal
    /// events in its log.
    pub fn new<R>(mut fixture: Match, roster: R) -> Self
    where
        R: PlayerRoster + Send + Sync + 'static,
    {
        let (snapshots, _) = broadcast::channel(SNAPSHOT_CHANNEL_CAPACITY);

        if fixture.recount_score() {
            warn!(
                "match {}: score does not match its goal events, using {}:{}",
                fixture.id, fixture.home_score, fixture.away_score
            );
        }

        let next_event_id = fixture.events.iter().map(|e| e.id).max().unwrap_or(0) + 1;

        LiveMatchEngine {
            match_id: fixture.id.clone(),
            roster: Arc::new(roster),
            inner: Arc::new(EngineInner {
                state: Mutex::new(MatchState {
                    fixture,
                    clock: MatchClock::default(),
                    next_event_id,
                }),
                snapshots,
            }),
        }
    }

    pub fn match_id(&self) -> &str {
        &self.match_id
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        self.inner.lock().snapshot()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MatchSnapshot> {
        self.inner.snapshots.subscribe()
    }

    pub fn is_running(&self) -> bool {
        self.inner.lock().clock.is_running()
    }

    /// Starts ticking from the current elapsed time. A not started match
    /// moves to in progress; starting a running clock changes nothing.
    pub fn start(&self) -> Result<MatchSnapshot, MatchEngineError> {
        self.mutate(|state| {
            state.ensure_not_finished()?;

            if state.clock.is_running() {
                return Ok(false);
            }

            self.run_clock(state)?;

            if state.fixture.status == MatchStatus::NotStarted {
                state.fixture.status = MatchStatus::InProgress;
                info!("match {} kicked off", state.fixture.id);
            }

            Ok(true)
        })
    }

    pub fn pause(&self) -> Result<MatchSnapshot, MatchEngineError> {
        self.mutate(|state| {
            if !state.clock.is_running() {
                return Ok(false);
            }

            state.clock.stop();
            debug!(
                "match {} paused at {}s",
                state.fixture.id, state.fixture.elapsed_seconds
            );

            Ok(true)
        })
    }

    /// Like [`LiveMatchEngine::start`] for a match that has already kicked off.
    /// The next tick lands one full second after resuming; a partial second
    /// before the pause is not carried over.
    pub fn resume(&self) -> Result<MatchSnapshot, MatchEngineError> {
        self.mutate(|state| {
            state.ensure_not_finished()?;

            if !state.fixture.status.is_started() {
                return Err(MatchEngineError::MatchNotStarted(state.fixture.id.clone()));
            }

            if state.clock.is_running() {
                return Ok(false);
            }

            self.run_clock(state)?;

            Ok(true)
        })
    }

    /// Stops the clock and clears elapsed time, events and score.
    pub fn reset_clock(&self) -> Result<MatchSnapshot, MatchEngineError> {
        self.mutate(|state| {
            state.ensure_not_finished()?;

            state.clock.stop();

            let fixture = &mut state.fixture;
            fixture.elapsed_seconds = 0;
            fixture.events.clear();
            fixture.home_score = 0;
            fixture.away_score = 0;

            debug!("match {} clock reset", fixture.id);

            Ok(true)
        })
    }

    /// Zeroes the score and drops goal events. Other events stay.
    pub fn reset_score(&self) -> Result<MatchSnapshot, MatchEngineError> {
        self.mutate(|state| {
            state.ensure_not_finished()?;

            let fixture = &mut state.fixture;
            fixture.events.retain(|e| !e.is_goal());
            fixture.home_score = 0;
            fixture.away_score = 0;

            debug!("match {} score reset", fixture.id);

            Ok(true)
        })
    }

    pub fn add_event(&self, event: NewMatchEvent) -> Result<MatchSnapshot, MatchEngineError> {
        self.mutate(|state| {
            state.ensure_not_finished()?;

            let fixture = &mut state.fixture;

            let side = fixture
                .side_of(event.team_id)
                .ok_or_else(|| MatchEngineError::TeamNotInMatch {
                    match_id: fixture.id.clone(),
                    team_id: event.team_id,
                })?;

            let action = event.action()?;

            if let Some(player_id) = action
                .players()
                .find(|&player_id| !self.roster.belongs_to(player_id, event.team_id))
            {
                return Err(MatchEngineError::PlayerNotInTeam {
                    player_id,
                    team_id: event.team_id,
                });
            }

            let recorded = MatchEvent {
                id: state.next_event_id,
                minute: fixture.minute(),
                team_id: event.team_id,
                action,
            };

            state.next_event_id += 1;

            if recorded.is_goal() {
                let score = fixture.score_mut(side);
                *score = score.saturating_add(1);
            }

            debug!(
                "match {}: {} for team {} at minute {} (event {})",
                fixture.id,
                recorded.event_type(),
                recorded.team_id,
                recorded.minute,
                recorded.id
            );

            fixture.events.push(recorded);

            Ok(true)
        })
    }

    pub fn remove_event(&self, event_id: u32) -> Result<MatchSnapshot, MatchEngineError> {
        self.mutate(|state| {
            state.ensure_not_finished()?;

            let fixture = &mut state.fixture;

            let idx = fixture
                .events
                .iter()
                .position(|e| e.id == event_id)
                .ok_or_else(|| MatchEngineError::EventNotFound {
                    match_id: fixture.id.clone(),
                    event_id,
                })?;

            let removed = fixture.events.remove(idx);

            if removed.is_goal() {
                if let Some(side) = fixture.side_of(removed.team_id) {
                    let score = fixture.score_mut(side);
                    *score = score.saturating_sub(1);
                }
            }

            debug!("match {}: event {} removed", fixture.id, event_id);

            Ok(true)
        })
    }

    /// Stops the clock and closes the match. The match must be in progress.
    pub fn finish(&self) -> Result<MatchSnapshot, MatchEngineError> {
        self.mutate(|state| {
            state.ensure_not_finished()?;

            if !state.fixture.status.is_started() {
                return Err(MatchEngineError::MatchNotStarted(state.fixture.id.clone()));
            }

            state.clock.stop();
            state.fixture.status = MatchStatus::Finished;

            info!(
                "match {} finished {}:{}",
                state.fixture.id, state.fixture.home_score, state.fixture.away_score
            );

            Ok(true)
        })
    }

    fn run_clock(&self, state: &mut MatchState) -> Result<(), MatchEngineError> {
        let runtime = Handle::try_current().map_err(|_| MatchEngineError::NoRuntime)?;

        state.clock.start(&runtime, Arc::downgrade(&self.inner));

        debug!(
            "match {} clock running from {}s",
            state.fixture.id, state.fixture.elapsed_seconds
        );

        Ok(())
    }

    /// Applies `operation` under the state lock. `Ok(true)` means the state
    /// changed and the snapshot is published.
    fn mutate<F>(&self, operation: F) -> Result<MatchSnapshot, MatchEngineError>
    where
        F: FnOnce(&mut MatchState) -> Result<bool, MatchEngineError>,
    {
        let mut state = self.inner.lock();

        let changed = operation(&mut state)?;
        let snapshot = state.snapshot();

        if changed {
            self.inner.publish(&snapshot);
        }

        Ok(snapshot)
    }
}

impl Drop for LiveMatchEngine {
    fn drop(&mut self) {
        self.inner.lock().clock.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::Roster;
    use crate::r#match::{EventAction, MatchEventType};
    use crate::Player;
    use std::time::Duration;
    use tokio::time::sleep;

    const HOME: u32 = 1;
    const AWAY: u32 = 2;

    fn roster() -> Roster {
        Roster::from_players(&[
            Player::new(10, HOME, String::from("Home Striker")),
            Player::new(11, HOME, String::from("Home Sub")),
            Player::new(20, AWAY, String::from("Away Striker")),
            Player::new(21, AWAY, String::from("Away Sub")),
        ])
    }

    fn engine() -> LiveMatchEngine {
        LiveMatchEngine::new(Match::new(String::from("m1"), 1, HOME, AWAY), roster())
    }

    #[tokio::test(start_paused = true)]
    async fn test_goal_minute_and_removal() {
        let engine = engine();
        engine.start().unwrap();

        sleep(Duration::from_millis(125_500)).await;

        let snapshot = engine.add_event(NewMatchEvent::goal(HOME, 10)).unwrap();
        let goal = snapshot.latest_event().cloned().unwrap();

        assert_eq!(snapshot.elapsed_seconds(), 125);
        assert_eq!(goal.minute, 2);
        assert_eq!(snapshot.score(), (1, 0));

        let snapshot = engine.remove_event(goal.id).unwrap();

        assert_eq!(snapshot.score(), (0, 0));
        assert!(snapshot.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_moves_to_in_progress() {
        let engine = engine();
        assert_eq!(engine.snapshot().status(), MatchStatus::NotStarted);

        let snapshot = engine.start().unwrap();

        assert_eq!(snapshot.status(), MatchStatus::InProgress);
        assert!(snapshot.clock_running);

        // second start is a no-op
        let again = engine.start().unwrap();
        assert_eq!(again, snapshot);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_freezes_and_resume_continues() {
        let engine = engine();
        engine.start().unwrap();

        sleep(Duration::from_millis(10_500)).await;
        let paused = engine.pause().unwrap();
        assert_eq!(paused.elapsed_seconds(), 10);
        assert!(!paused.clock_running);

        sleep(Duration::from_secs(30)).await;
        assert_eq!(engine.snapshot().elapsed_seconds(), 10);

        engine.resume().unwrap();
        sleep(Duration::from_millis(5_500)).await;
        assert_eq!(engine.snapshot().elapsed_seconds(), 15);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resume_restarts_the_second() {
        let engine = engine();
        engine.start().unwrap();

        sleep(Duration::from_millis(1_500)).await;
        engine.pause().unwrap();
        engine.resume().unwrap();

        sleep(Duration::from_millis(600)).await;
        assert_eq!(engine.snapshot().elapsed_seconds(), 1);

        sleep(Duration::from_millis(500)).await;
        assert_eq!(engine.snapshot().elapsed_seconds(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_resume_requires_started_match() {
        let engine = engine();

        assert_eq!(
            engine.resume(),
            Err(MatchEngineError::MatchNotStarted(String::from("m1")))
        );
        assert!(!engine.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_clock() {
        let engine = engine();
        engine.start().unwrap();
        sleep(Duration::from_millis(61_500)).await;
        engine.add_event(NewMatchEvent::goal(AWAY, 20)).unwrap();
        engine.add_event(NewMatchEvent::yellow_card(HOME, 10)).unwrap();

        let snapshot = engine.reset_clock().unwrap();

        assert_eq!(snapshot.elapsed_seconds(), 0);
        assert_eq!(snapshot.score(), (0, 0));
        assert!(snapshot.events().is_empty());
        assert!(!snapshot.clock_running);
        assert_eq!(snapshot.status(), MatchStatus::InProgress);

        sleep(Duration::from_secs(10)).await;
        assert_eq!(engine.snapshot().elapsed_seconds(), 0);

        let again = engine.reset_clock().unwrap();
        assert_eq!(again, snapshot);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_score_keeps_other_events() {
        let engine = engine();
        engine.start().unwrap();
        engine.add_event(NewMatchEvent::goal(HOME, 10)).unwrap();
        engine.add_event(NewMatchEvent::red_card(AWAY, 21)).unwrap();
        engine.add_event(NewMatchEvent::goal(AWAY, 20)).unwrap();
        engine.pause().unwrap();

        let snapshot = engine.reset_score().unwrap();

        assert_eq!(snapshot.score(), (0, 0));
        assert_eq!(snapshot.events().len(), 1);
        assert_eq!(
            snapshot.events()[0].action,
            EventAction::RedCard { player_id: 21 }
        );

        let again = engine.reset_score().unwrap();
        assert_eq!(again, snapshot);
    }

    #[tokio::test(start_paused = true)]
    async fn test_score_never_negative() {
        let engine = engine();
        engine.start().unwrap();
        let first = engine.add_event(NewMatchEvent::goal(HOME, 10)).unwrap();
        let first_id = first.latest_event().map(|e| e.id).unwrap();

        engine.reset_score().unwrap();

        // the goal event is gone, removing it again fails without touching the score
        assert_eq!(
            engine.remove_event(first_id),
            Err(MatchEngineError::EventNotFound {
                match_id: String::from("m1"),
                event_id: first_id
            })
        );
        assert_eq!(engine.snapshot().score(), (0, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_loaded_score_follows_goal_events() {
        let mut fixture = Match::new(String::from("m1"), 1, HOME, AWAY);
        fixture.status = MatchStatus::InProgress;
        fixture.home_score = 3;
        fixture.away_score = 2;
        fixture.events.push(MatchEvent {
            id: 4,
            minute: 3,
            team_id: HOME,
            action: EventAction::Goal { player_id: 10 },
        });

        let engine = LiveMatchEngine::new(fixture, roster());
        assert_eq!(engine.snapshot().score(), (1, 0));

        let snapshot = engine.remove_event(4).unwrap();
        assert_eq!(snapshot.score(), (0, 0));

        // ids continue after the highest loaded id
        let snapshot = engine.add_event(NewMatchEvent::goal(AWAY, 20)).unwrap();
        assert_eq!(snapshot.latest_event().map(|e| e.id), Some(5));
        assert_eq!(snapshot.score(), (0, 1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_loaded_score_without_events_is_cleared() {
        let mut fixture = Match::new(String::from("m1"), 1, HOME, AWAY);
        fixture.status = MatchStatus::InProgress;
        fixture.home_score = 3;

        let engine = LiveMatchEngine::new(fixture, roster());

        assert_eq!(engine.snapshot().score(), (0, 0));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_published_snapshots_follow_mutation_order() {
        let engine = Arc::new(engine());
        let mut snapshots = engine.subscribe();
        engine.start().unwrap();

        let recorder = tokio::spawn(async move {
            let mut seen = Vec::new();

            loop {
                match snapshots.recv().await {
                    Ok(snapshot) => {
                        let finished = snapshot.status() == MatchStatus::Finished;
                        seen.push(snapshot);
                        if finished {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            seen
        });

        let writer = {
            let engine = Arc::clone(&engine);
            tokio::spawn(async move {
                for _ in 0..60 {
                    engine.add_event(NewMatchEvent::goal(HOME, 10)).unwrap();
                    sleep(Duration::from_millis(40)).await;
                }
            })
        };

        writer.await.unwrap();
        engine.finish().unwrap();

        let seen = recorder.await.unwrap();

        assert!(seen.iter().any(|s| s.elapsed_seconds() >= 1));
        assert!(seen.windows(2).all(|pair| {
            pair[0].score().0 <= pair[1].score().0
                && pair[0].elapsed_seconds() <= pair[1].elapsed_seconds()
        }));
        assert_eq!(seen.last().map(|s| s.score()), Some((60, 0)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_event_ids_are_not_reused() {
        let engine = engine();
        engine.start().unwrap();

        let first = engine.add_event(NewMatchEvent::goal(HOME, 10)).unwrap();
        let first_id = first.latest_event().map(|e| e.id).unwrap();
        engine.remove_event(first_id).unwrap();

        let second = engine.add_event(NewMatchEvent::goal(HOME, 10)).unwrap();

        assert_ne!(second.latest_event().map(|e| e.id), Some(first_id));
    }

    #[tokio::test(start_paused = true)]
    async fn test_event_validation() {
        let engine = engine();
        engine.start().unwrap();

        assert_eq!(
            engine.add_event(NewMatchEvent::goal(3, 10)),
            Err(MatchEngineError::TeamNotInMatch {
                match_id: String::from("m1"),
                team_id: 3
            })
        );
        assert_eq!(
            engine.add_event(NewMatchEvent::goal(HOME, 20)),
            Err(MatchEngineError::PlayerNotInTeam {
                player_id: 20,
                team_id: HOME
            })
        );
        assert_eq!(
            engine.add_event(NewMatchEvent::substitution(HOME, 10, 21)),
            Err(MatchEngineError::PlayerNotInTeam {
                player_id: 21,
                team_id: HOME
            })
        );
        assert_eq!(
            engine.add_event(NewMatchEvent::new(MatchEventType::Substitution, HOME, 10, None)),
            Err(MatchEngineError::MissingSubstitute)
        );

        let snapshot = engine.snapshot();
        assert!(snapshot.events().is_empty());
        assert_eq!(snapshot.score(), (0, 0));

        let snapshot = engine
            .add_event(NewMatchEvent::substitution(HOME, 10, 11))
            .unwrap();
        assert_eq!(snapshot.events().len(), 1);
        assert_eq!(snapshot.score(), (0, 0));
    }

    #[tokio::test(start_paused = true)]
    async fn test_finish() {
        let engine = engine();

        assert_eq!(
            engine.finish(),
            Err(MatchEngineError::MatchNotStarted(String::from("m1")))
        );

        engine.start().unwrap();
        sleep(Duration::from_millis(3_500)).await;

        let finished = engine.finish().unwrap();
        assert_eq!(finished.status(), MatchStatus::Finished);
        assert!(!finished.clock_running);

        sleep(Duration::from_secs(5)).await;
        assert_eq!(engine.snapshot().elapsed_seconds(), 3);

        let closed = Err(MatchEngineError::MatchFinished(String::from("m1")));
        assert_eq!(engine.start(), closed);
        assert_eq!(engine.add_event(NewMatchEvent::goal(HOME, 10)), closed);
        assert_eq!(engine.reset_clock(), closed);
        assert_eq!(engine.finish(), closed);
        assert!(engine.pause().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn test_snapshots_are_published() {
        let engine = engine();
        let mut snapshots = engine.subscribe();

        engine.start().unwrap();
        sleep(Duration::from_millis(2_500)).await;
        engine.add_event(NewMatchEvent::goal(HOME, 10)).unwrap();

        let started = snapshots.recv().await.unwrap();
        assert!(started.clock_running);
        assert_eq!(started.elapsed_seconds(), 0);

        assert_eq!(snapshots.recv().await.unwrap().elapsed_seconds(), 1);
        assert_eq!(snapshots.recv().await.unwrap().elapsed_seconds(), 2);
        assert_eq!(snapshots.recv().await.unwrap().score(), (1, 0));

        // failed operations publish nothing
        assert!(engine.add_event(NewMatchEvent::goal(HOME, 20)).is_err());
        engine.pause().unwrap();
        assert!(!snapshots.recv().await.unwrap().clock_running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_tick_after_drop() {
        let engine = engine();
        let mut snapshots = engine.subscribe();
        engine.start().unwrap();
        sleep(Duration::from_millis(1_500)).await;

        drop(engine);
        sleep(Duration::from_secs(5)).await;

        assert!(snapshots.recv().await.is_ok());
        assert!(snapshots.recv().await.is_ok());
        assert!(matches!(
            snapshots.recv().await,
            Err(broadcast::error::RecvError::Closed)
        ));
    }

    #[test]
    fn test_start_without_runtime() {
        let engine = engine();

        assert_eq!(engine.start(), Err(MatchEngineError::NoRuntime));
        assert_eq!(engine.snapshot().status(), MatchStatus::NotStarted);
    }
}
