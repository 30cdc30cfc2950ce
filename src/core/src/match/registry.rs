use crate::club::PlayerRoster;
use crate::r#match::{LiveMatchEngine, Match, MatchSnapshot};
use log::info;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("match {0} is already open")]
    MatchAlreadyOpen(String),
    #[error("match {0} is not open")]
    MatchNotOpen(String),
    #[error("match {0} is finished and cannot be opened")]
    MatchFinished(String),
}

/// Live engines by match id.
#[derive(Default)]
pub struct LiveMatchRegistry {
    engines: RwLock<HashMap<String, Arc<LiveMatchEngine>>>,
}

impl LiveMatchRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open<R>(&self, fixture: Match, roster: R) -> Result<Arc<LiveMatchEngine>, RegistryError>
    where
        R: PlayerRoster + Send + Sync + 'static,
    {
        if fixture.status.is_finished() {
            return Err(RegistryError::MatchFinished(fixture.id));
        }

        let mut engines = self.engines.write().unwrap_or_else(PoisonError::into_inner);

        if engines.contains_key(&fixture.id) {
            return Err(RegistryError::MatchAlreadyOpen(fixture.id));
        }

        let match_id = fixture.id.clone();
        let engine = Arc::new(LiveMatchEngine::new(fixture, roster));

        engines.insert(match_id.clone(), Arc::clone(&engine));

        info!("match {} opened for live tracking", match_id);

        Ok(engine)
    }

    pub fn get(&self, match_id: &str) -> Option<Arc<LiveMatchEngine>> {
        self.engines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(match_id)
            .cloned()
    }

    /// Removes the engine, stopping its clock, and returns its final snapshot.
    pub fn close(&self, match_id: &str) -> Result<MatchSnapshot, RegistryError> {
        let engine = self
            .engines
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(match_id)
            .ok_or_else(|| RegistryError::MatchNotOpen(match_id.to_string()))?;

        // handles held elsewhere keep the engine alive, so stop it here
        let snapshot = engine.pause().unwrap_or_else(|_| engine.snapshot());

        info!("match {} closed", match_id);

        Ok(snapshot)
    }

    /// Current snapshot of every open match, ordered by match id.
    pub fn snapshots(&self) -> Vec<MatchSnapshot> {
        let engines: Vec<Arc<LiveMatchEngine>> = self
            .engines
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();

        let mut snapshots: Vec<MatchSnapshot> = engines.iter().map(|e| e.snapshot()).collect();
        snapshots.sort_by(|a, b| a.match_id().cmp(b.match_id()));
        snapshots
    }

    pub fn len(&self) -> usize {
        self.engines.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::club::Roster;
    use crate::r#match::{MatchStatus, NewMatchEvent};
    use crate::Player;
    use std::time::Duration;
    use tokio::time::sleep;

    fn roster() -> Roster {
        Roster::from_players(&[Player::new(10, 1, String::new())])
    }

    fn fixture(id: &str) -> Match {
        Match::new(String::from(id), 1, 1, 2)
    }

    #[test]
    fn test_open_twice() {
        let registry = LiveMatchRegistry::new();

        registry.open(fixture("a"), roster()).unwrap();

        assert_eq!(
            registry.open(fixture("a"), roster()).err(),
            Some(RegistryError::MatchAlreadyOpen(String::from("a")))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_finished_match_cannot_be_opened() {
        let registry = LiveMatchRegistry::new();

        let result = registry.open(fixture("a").with_result(1, 0), roster());

        assert_eq!(
            result.err(),
            Some(RegistryError::MatchFinished(String::from("a")))
        );
        assert!(registry.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_get_shares_engine() {
        let registry = LiveMatchRegistry::new();
        registry.open(fixture("a"), roster()).unwrap();

        let engine = registry.get("a").unwrap();
        engine.start().unwrap();
        engine.add_event(NewMatchEvent::goal(1, 10)).unwrap();

        let again = registry.get("a").unwrap();
        assert_eq!(again.snapshot().score(), (1, 0));
        assert!(registry.get("b").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_stops_clock() {
        let registry = LiveMatchRegistry::new();
        let engine = registry.open(fixture("a"), roster()).unwrap();
        engine.start().unwrap();
        sleep(Duration::from_millis(4_500)).await;

        let last = registry.close("a").unwrap();

        assert_eq!(last.elapsed_seconds(), 4);
        assert!(!last.clock_running);
        assert_eq!(last.status(), MatchStatus::InProgress);

        sleep(Duration::from_secs(3)).await;
        assert_eq!(engine.snapshot().elapsed_seconds(), 4);

        assert_eq!(
            registry.close("a").err(),
            Some(RegistryError::MatchNotOpen(String::from("a")))
        );
    }

    #[test]
    fn test_snapshots_sorted_by_id() {
        let registry = LiveMatchRegistry::new();
        registry.open(fixture("b"), roster()).unwrap();
        registry.open(fixture("a"), roster()).unwrap();

        let ids: Vec<String> = registry
            .snapshots()
            .iter()
            .map(|s| s.match_id().to_string())
            .collect();

        assert_eq!(ids, vec![String::from("a"), String::from("b")]);
    }
}
