pub mod competition;
pub mod sanction;
pub mod schedule;
pub mod table;

pub use competition::*;
pub use sanction::*;
pub use schedule::*;
pub use table::*;
