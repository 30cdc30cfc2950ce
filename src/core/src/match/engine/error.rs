use crate::r#match::MatchEventType;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchEngineError {
    #[error("team {team_id} does not play in match {match_id}")]
    TeamNotInMatch { match_id: String, team_id: u32 },
    #[error("player {player_id} is not registered for team {team_id}")]
    PlayerNotInTeam { player_id: u32, team_id: u32 },
    #[error("substitution requires an incoming player")]
    MissingSubstitute,
    #[error("player {player_id} cannot be substituted for themselves")]
    SamePlayerSubstitution { player_id: u32 },
    #[error("{event_type} events take a single player")]
    UnexpectedSecondaryPlayer { event_type: MatchEventType },
    #[error("event {event_id} not found in match {match_id}")]
    EventNotFound { match_id: String, event_id: u32 },
    #[error("match {0} has not started")]
    MatchNotStarted(String),
    #[error("match {0} is finished")]
    MatchFinished(String),
    #[error("live clock requires a running tokio runtime")]
    NoRuntime,
}
