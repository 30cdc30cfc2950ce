pub mod engine;
pub mod events;
pub mod fixture;
pub mod registry;
pub mod snapshot;

pub use engine::*;
pub use events::*;
pub use fixture::*;
pub use registry::*;
pub use snapshot::*;
