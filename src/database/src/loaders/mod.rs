mod competition;

pub use competition::*;
