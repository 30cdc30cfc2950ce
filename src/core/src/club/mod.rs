pub mod player;
pub mod team;

pub use player::{Player, PlayerRoster, Roster};
pub use team::{Team, TeamBuilder, TeamCollection};
