mod clock;
pub mod engine;
pub mod error;

pub use engine::*;
pub use error::*;
