pub mod common;
pub mod player;

// Re-export common types
pub use common::{Direction, PlayerId, Timestamp};

// Re-export player state
pub use player::Player;
