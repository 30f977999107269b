//! In-memory StateRepository implementation for tests and local runs.

use std::collections::HashMap;
use std::sync::RwLock;

use uno_core::GameState;

use super::{RepositoryError, Result, StateRepository};

/// In-memory implementation of StateRepository.
pub struct InMemoryStateRepo {
    rooms: RwLock<HashMap<String, GameState>>,
}

impl InMemoryStateRepo {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Create with one room already stored.
    pub fn with_room(room: impl Into<String>, state: GameState) -> Self {
        let mut rooms = HashMap::new();
        rooms.insert(room.into(), state);
        Self {
            rooms: RwLock::new(rooms),
        }
    }
}

impl Default for InMemoryStateRepo {
    fn default() -> Self {
        Self::new()
    }
}

impl StateRepository for InMemoryStateRepo {
    fn get(&self, room: &str) -> Result<Option<GameState>> {
        let rooms = self
            .rooms
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(rooms.get(room).cloned())
    }

    fn put(&self, room: &str, state: &GameState) -> Result<()> {
        let mut rooms = self
            .rooms
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        rooms.insert(room.to_owned(), state.clone());
        Ok(())
    }

    fn delete(&self, room: &str) -> Result<()> {
        let mut rooms = self
            .rooms
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        rooms.remove(room);
        Ok(())
    }

    fn list_rooms(&self) -> Result<Vec<String>> {
        let rooms = self
            .rooms
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        let mut keys: Vec<String> = rooms.keys().cloned().collect();
        keys.sort_unstable();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uno_core::{Player, PlayerId};

    #[test]
    fn put_get_delete() {
        let repo = InMemoryStateRepo::new();
        assert!(repo.get("lobby").unwrap().is_none());

        let mut state = GameState::new();
        state.players.push(Player::new(PlayerId::from("a"), "Ann"));
        repo.put("lobby", &state).unwrap();

        assert_eq!(repo.get("lobby").unwrap(), Some(state));
        assert_eq!(repo.list_rooms().unwrap(), vec!["lobby".to_string()]);

        repo.delete("lobby").unwrap();
        assert!(repo.get("lobby").unwrap().is_none());
        repo.delete("lobby").unwrap();
    }

    #[test]
    fn rooms_are_independent() {
        let repo = InMemoryStateRepo::with_room("b", GameState::new());
        let mut other = GameState::new();
        other.started = true;
        repo.put("a", &other).unwrap();

        assert_eq!(repo.list_rooms().unwrap(), vec!["a", "b"]);
        assert!(!repo.get("b").unwrap().unwrap().started);
    }
}
