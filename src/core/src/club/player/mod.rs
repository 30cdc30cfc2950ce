pub mod player;
pub mod roster;

pub use player::*;
pub use roster::*;
