//! Repository contract for saving and loading room state.

use uno_core::GameState;

use super::Result;

/// Key-value store of room snapshots.
///
/// There are no transactions and no versioning: a room's dispatcher performs
/// a single `get`, mutates in memory, and performs a single `put`. Callers
/// must guarantee that only one writer touches a given room at a time.
pub trait StateRepository: Send + Sync {
    /// Load the state of `room`, if it was ever stored.
    fn get(&self, room: &str) -> Result<Option<GameState>>;

    /// Store the state of `room`, replacing any previous snapshot.
    fn put(&self, room: &str, state: &GameState) -> Result<()>;

    /// Forget `room`. Deleting an unknown room is not an error.
    fn delete(&self, room: &str) -> Result<()>;

    /// List every stored room key in ascending order.
    fn list_rooms(&self) -> Result<Vec<String>>;
}
