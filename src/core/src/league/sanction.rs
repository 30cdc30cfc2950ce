use serde::{Deserialize, Serialize};

/// Who a sanction is issued against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum SanctionTarget {
    Team(u32),
    Player(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sanction {
    pub id: u32,
    pub competition_id: u32,
    pub target: SanctionTarget,
    #[serde(default)]
    pub points_deducted: u16,
    #[serde(default)]
    pub reason: String,
}

impl Sanction {
    pub fn against_team(id: u32, competition_id: u32, team_id: u32, points_deducted: u16) -> Self {
        Sanction {
            id,
            competition_id,
            target: SanctionTarget::Team(team_id),
            points_deducted,
            reason: String::new(),
        }
    }

    pub fn against_player(id: u32, competition_id: u32, player_id: u32) -> Self {
        Sanction {
            id,
            competition_id,
            target: SanctionTarget::Player(player_id),
            points_deducted: 0,
            reason: String::new(),
        }
    }

    /// Points taken from `team_id` in the table by this sanction.
    pub fn deduction_for(&self, team_id: u32) -> u16 {
        match self.target {
            SanctionTarget::Team(target) if target == team_id => self.points_deducted,
            SanctionTarget::Team(_) | SanctionTarget::Player(_) => 0,
        }
    }
}
