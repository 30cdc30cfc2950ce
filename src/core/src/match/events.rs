use crate::r#match::MatchEngineError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchEventType {
    Goal,
    YellowCard,
    RedCard,
    Substitution,
}

impl fmt::Display for MatchEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MatchEventType::Goal => "GOAL",
            MatchEventType::YellowCard => "YELLOW_CARD",
            MatchEventType::RedCard => "RED_CARD",
            MatchEventType::Substitution => "SUBSTITUTION",
        };

        write!(f, "{}", name)
    }
}

/// What happened, together with the players involved.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventAction {
    Goal { player_id: u32 },
    YellowCard { player_id: u32 },
    RedCard { player_id: u32 },
    Substitution { player_out: u32, player_in: u32 },
}

impl EventAction {
    pub fn event_type(&self) -> MatchEventType {
        match self {
            EventAction::Goal { .. } => MatchEventType::Goal,
            EventAction::YellowCard { .. } => MatchEventType::YellowCard,
            EventAction::RedCard { .. } => MatchEventType::RedCard,
            EventAction::Substitution { .. } => MatchEventType::Substitution,
        }
    }

    pub fn primary_player(&self) -> u32 {
        match *self {
            EventAction::Goal { player_id }
            | EventAction::YellowCard { player_id }
            | EventAction::RedCard { player_id } => player_id,
            EventAction::Substitution { player_out, .. } => player_out,
        }
    }

    pub fn secondary_player(&self) -> Option<u32> {
        match *self {
            EventAction::Substitution { player_in, .. } => Some(player_in),
            _ => None,
        }
    }

    pub fn players(&self) -> impl Iterator<Item = u32> {
        std::iter::once(self.primary_player()).chain(self.secondary_player())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEvent {
    pub id: u32,
    pub minute: u32,
    pub team_id: u32,
    #[serde(flatten)]
    pub action: EventAction,
}

impl MatchEvent {
    pub fn event_type(&self) -> MatchEventType {
        self.action.event_type()
    }

    pub fn is_goal(&self) -> bool {
        matches!(self.action, EventAction::Goal { .. })
    }
}

/// Caller input for a new event, before validation.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NewMatchEvent {
    pub event_type: MatchEventType,
    pub team_id: u32,
    pub primary_player_id: u32,
    pub secondary_player_id: Option<u32>,
}

impl NewMatchEvent {
    pub fn new(
        event_type: MatchEventType,
        team_id: u32,
        primary_player_id: u32,
        secondary_player_id: Option<u32>,
    ) -> Self {
        NewMatchEvent {
            event_type,
            team_id,
            primary_player_id,
            secondary_player_id,
        }
    }

    pub fn goal(team_id: u32, player_id: u32) -> Self {
        Self::new(MatchEventType::Goal, team_id, player_id, None)
    }

    pub fn yellow_card(team_id: u32, player_id: u32) -> Self {
        Self::new(MatchEventType::YellowCard, team_id, player_id, None)
    }

    pub fn red_card(team_id: u32, player_id: u32) -> Self {
        Self::new(MatchEventType::RedCard, team_id, player_id, None)
    }

    pub fn substitution(team_id: u32, player_out: u32, player_in: u32) -> Self {
        Self::new(
            MatchEventType::Substitution,
            team_id,
            player_out,
            Some(player_in),
        )
    }

    /// Checks the player shape for the event type. Roster membership is
    /// checked by the engine.
    pub fn action(&self) -> Result<EventAction, MatchEngineError> {
        let player_id = self.primary_player_id;

        match (self.event_type, self.secondary_player_id) {
            (MatchEventType::Substitution, None) => Err(MatchEngineError::MissingSubstitute),
            (MatchEventType::Substitution, Some(player_in)) if player_in == player_id => {
                Err(MatchEngineError::SamePlayerSubstitution { player_id })
            }
            (MatchEventType::Substitution, Some(player_in)) => Ok(EventAction::Substitution {
                player_out: player_id,
                player_in,
            }),
            (event_type, Some(_)) => Err(MatchEngineError::UnexpectedSecondaryPlayer { event_type }),
            (MatchEventType::Goal, None) => Ok(EventAction::Goal { player_id }),
            (MatchEventType::YellowCard, None) => Ok(EventAction::YellowCard { player_id }),
            (MatchEventType::RedCard, None) => Ok(EventAction::RedCard { player_id }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_shapes() {
        assert_eq!(
            NewMatchEvent::goal(1, 10).action(),
            Ok(EventAction::Goal { player_id: 10 })
        );
        assert_eq!(
            NewMatchEvent::substitution(1, 10, 11).action(),
            Ok(EventAction::Substitution {
                player_out: 10,
                player_in: 11
            })
        );
    }

    #[test]
    fn test_substitution_validation() {
        let missing = NewMatchEvent::new(MatchEventType::Substitution, 1, 10, None);
        assert_eq!(missing.action(), Err(MatchEngineError::MissingSubstitute));

        assert_eq!(
            NewMatchEvent::substitution(1, 10, 10).action(),
            Err(MatchEngineError::SamePlayerSubstitution { player_id: 10 })
        );
    }

    #[test]
    fn test_secondary_player_rejected_for_cards() {
        let event = NewMatchEvent::new(MatchEventType::YellowCard, 1, 10, Some(11));

        assert_eq!(
            event.action(),
            Err(MatchEngineError::UnexpectedSecondaryPlayer {
                event_type: MatchEventType::YellowCard
            })
        );
    }

    #[test]
    fn test_event_json_shape() {
        let event = MatchEvent {
            id: 7,
            minute: 63,
            team_id: 2,
            action: EventAction::Substitution {
                player_out: 20,
                player_in: 21,
            },
        };

        let value = serde_json::to_value(&event).unwrap();

        assert_eq!(value["type"], "SUBSTITUTION");
        assert_eq!(value["player_out"], 20);
        assert_eq!(value["minute"], 63);

        let parsed: MatchEvent = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, event);
        assert_eq!(parsed.action.players().collect::<Vec<_>>(), vec![20, 21]);
    }
}
