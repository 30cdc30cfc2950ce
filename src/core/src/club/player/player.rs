use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub team_id: u32,
    #[serde(default)]
    pub name: String,
}

impl Player {
    pub fn new(id: u32, team_id: u32, name: String) -> Self {
        Player { id, team_id, name }
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}
