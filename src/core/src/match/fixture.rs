use crate::r#match::MatchEvent;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchStatus {
    #[default]
    NotStarted,
    InProgress,
    Finished,
}

impl MatchStatus {
    pub fn is_started(self) -> bool {
        self != MatchStatus::NotStarted
    }

    pub fn is_finished(self) -> bool {
        self == MatchStatus::Finished
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MatchSide {
    Home,
    Away,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: String,
    pub competition_id: u32,
    pub home_team_id: u32,
    pub away_team_id: u32,
    #[serde(default)]
    pub home_score: u16,
    #[serde(default)]
    pub away_score: u16,
    #[serde(default)]
    pub status: MatchStatus,
    #[serde(default)]
    pub elapsed_seconds: u32,
    #[serde(default)]
    pub events: Vec<MatchEvent>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl Match {
    pub fn new(id: String, competition_id: u32, home_team_id: u32, away_team_id: u32) -> Self {
        Match {
            id,
            competition_id,
            home_team_id,
            away_team_id,
            home_score: 0,
            away_score: 0,
            status: MatchStatus::NotStarted,
            elapsed_seconds: 0,
            events: Vec::new(),
            stage: None,
            date: None,
        }
    }

    pub fn with_stage(mut self, stage: String) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Marks the match finished with the given final score.
    pub fn with_result(mut self, home_score: u16, away_score: u16) -> Self {
        self.home_score = home_score;
        self.away_score = away_score;
        self.status = MatchStatus::Finished;
        self
    }

    pub fn involves(&self, team_id: u32) -> bool {
        self.home_team_id == team_id || self.away_team_id == team_id
    }

    pub fn side_of(&self, team_id: u32) -> Option<MatchSide> {
        if self.home_team_id == team_id {
            Some(MatchSide::Home)
        } else if self.away_team_id == team_id {
            Some(MatchSide::Away)
        } else {
            None
        }
    }

    pub fn minute(&self) -> u32 {
        self.elapsed_seconds / 60
    }

    pub(crate) fn score_mut(&mut self, side: MatchSide) -> &mut u16 {
        match side {
            MatchSide::Home => &mut self.home_score,
            MatchSide::Away => &mut self.away_score,
        }
    }

    /// Events ordered by minute for display. Events sharing a minute keep
    /// their insertion order.
    pub fn events_by_minute(&self) -> Vec<&MatchEvent> {
        let mut events: Vec<&MatchEvent> = self.events.iter().collect();
        events.sort_by_key(|e| e.minute);
        events
    }

    pub fn goals_of(&self, team_id: u32) -> u16 {
        let goals = self
            .events
            .iter()
            .filter(|e| e.team_id == team_id && e.is_goal())
            .count();

        u16::try_from(goals).unwrap_or(u16::MAX)
    }

    /// Sets both scores to the goals in the event log. Returns `true` if the
    /// stored score disagreed.
    pub fn recount_score(&mut self) -> bool {
        let home = self.goals_of(self.home_team_id);
        let away = self.goals_of(self.away_team_id);

        let changed = (home, away) != (self.home_score, self.away_score);

        self.home_score = home;
        self.away_score = away;

        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::r#match::EventAction;

    fn event(id: u32, minute: u32, action: EventAction) -> MatchEvent {
        MatchEvent {
            id,
            minute,
            team_id: 1,
            action,
        }
    }

    #[test]
    fn test_status_lifecycle() {
        assert_eq!(MatchStatus::default(), MatchStatus::NotStarted);
        assert!(MatchStatus::InProgress.is_started());
        assert!(!MatchStatus::NotStarted.is_started());
        assert!(MatchStatus::Finished.is_finished());
    }

    #[test]
    fn test_new_match() {
        let fixture = Match::new(String::from("m1"), 3, 1, 2);

        assert_eq!(fixture.status, MatchStatus::NotStarted);
        assert_eq!((fixture.home_score, fixture.away_score), (0, 0));
        assert_eq!(fixture.elapsed_seconds, 0);
        assert!(fixture.events.is_empty());
        assert_eq!(fixture.side_of(1), Some(MatchSide::Home));
        assert_eq!(fixture.side_of(2), Some(MatchSide::Away));
        assert_eq!(fixture.side_of(5), None);
    }

    #[test]
    fn test_events_by_minute_is_stable() {
        let mut fixture = Match::new(String::from("m1"), 1, 1, 2);
        fixture.events = vec![
            event(1, 30, EventAction::Goal { player_id: 10 }),
            event(2, 5, EventAction::YellowCard { player_id: 11 }),
            event(3, 30, EventAction::RedCard { player_id: 12 }),
            event(4, 5, EventAction::Goal { player_id: 13 }),
        ];

        let ids: Vec<u32> = fixture.events_by_minute().iter().map(|e| e.id).collect();

        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_status_wire_form() {
        assert_eq!(
            serde_json::to_value(MatchStatus::InProgress).unwrap(),
            "IN_PROGRESS"
        );

        let parsed: MatchStatus = serde_json::from_str("\"NOT_STARTED\"").unwrap();
        assert_eq!(parsed, MatchStatus::NotStarted);
    }

    #[test]
    fn test_recount_score() {
        let mut fixture = Match::new(String::from("m1"), 1, 1, 2);
        fixture.home_score = 3;
        fixture.away_score = 1;
        fixture.events = vec![
            event(1, 10, EventAction::Goal { player_id: 10 }),
            event(2, 20, EventAction::YellowCard { player_id: 10 }),
        ];

        assert!(fixture.recount_score());
        assert_eq!((fixture.home_score, fixture.away_score), (1, 0));
        assert!(!fixture.recount_score());
    }

    #[test]
    fn test_deserialize_defaults() {
        let json = r#"{"id":"x","competition_id":1,"home_team_id":1,"away_team_id":2}"#;

        let fixture: Match = serde_json::from_str(json).unwrap();

        assert_eq!(fixture, Match::new(String::from("x"), 1, 1, 2));
    }
}
