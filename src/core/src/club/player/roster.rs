use crate::Player;
use std::collections::HashMap;
use std::sync::Arc;

/// Answers which team a player is registered for.
pub trait PlayerRoster {
    fn team_of(&self, player_id: u32) -> Option<u32>;

    fn belongs_to(&self, player_id: u32, team_id: u32) -> bool {
        self.team_of(player_id) == Some(team_id)
    }
}

impl<T: PlayerRoster + ?Sized> PlayerRoster for Arc<T> {
    fn team_of(&self, player_id: u32) -> Option<u32> {
        (**self).team_of(player_id)
    }
}

/// Player-to-team registrations. A player is registered for one team at a
/// time; registering again moves them.
#[derive(Debug, Default, Clone)]
pub struct Roster {
    registrations: HashMap<u32, u32>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_players(players: &[Player]) -> Self {
        let mut roster = Roster::new();

        for player in players {
            roster.register(player);
        }

        roster
    }

    pub fn register(&mut self, player: &Player) {
        self.registrations.insert(player.id, player.team_id);
    }

    /// Player ids registered for `team_id`, ascending.
    pub fn players_of(&self, team_id: u32) -> Vec<u32> {
        let mut players: Vec<u32> = self
            .registrations
            .iter()
            .filter(|(_, team)| **team == team_id)
            .map(|(player, _)| *player)
            .collect();

        players.sort_unstable();
        players
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl PlayerRoster for Roster {
    fn team_of(&self, player_id: u32) -> Option<u32> {
        self.registrations.get(&player_id).copied()
    }
}

impl PlayerRoster for HashMap<u32, u32> {
    fn team_of(&self, player_id: u32) -> Option<u32> {
        self.get(&player_id).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Roster {
        Roster::from_players(&[
            Player::new(10, 1, String::from("Keeper")),
            Player::new(11, 1, String::from("Striker")),
            Player::new(20, 2, String::from("Winger")),
        ])
    }

    #[test]
    fn test_belongs_to() {
        let roster = roster();
        assert!(roster.belongs_to(10, 1));
        assert!(!roster.belongs_to(10, 2));
        assert!(!roster.belongs_to(99, 1));
    }

    #[test]
    fn test_register_again_moves_player() {
        let mut roster = roster();
        roster.register(&Player::new(11, 2, String::from("Striker")));

        assert_eq!(roster.team_of(11), Some(2));
        assert_eq!(roster.players_of(1), vec![10]);
        assert_eq!(roster.players_of(2), vec![11, 20]);
    }

    #[test]
    fn test_shared_roster() {
        let shared = Arc::new(roster());
        assert!(shared.belongs_to(20, 2));
    }
}
