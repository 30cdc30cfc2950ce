use crate::r#match::{Match, MatchEvent, MatchStatus};
use serde::Serialize;

/// Point-in-time view of a live match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchSnapshot {
    #[serde(rename = "match")]
    pub fixture: Match,
    pub clock_running: bool,
}

impl MatchSnapshot {
    pub fn new(fixture: Match, clock_running: bool) -> Self {
        MatchSnapshot {
            fixture,
            clock_running,
        }
    }

    pub fn match_id(&self) -> &str {
        &self.fixture.id
    }

    pub fn status(&self) -> MatchStatus {
        self.fixture.status
    }

    pub fn elapsed_seconds(&self) -> u32 {
        self.fixture.elapsed_seconds
    }

    pub fn score(&self) -> (u16, u16) {
        (self.fixture.home_score, self.fixture.away_score)
    }

    pub fn events(&self) -> &[MatchEvent] {
        &self.fixture.events
    }

    pub fn latest_event(&self) -> Option<&MatchEvent> {
        self.fixture.events.last()
    }
}
