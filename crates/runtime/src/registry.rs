//! Lazily spawned room workers keyed by room.

use std::collections::HashMap;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::{Mutex, mpsc};
use tracing::info;

use crate::api::RoomHandle;
use crate::clock::Clock;
use crate::config::RuntimeConfig;
use crate::dispatcher::Dispatcher;
use crate::repository::StateRepository;
use crate::transport::{ConnectionHub, Transport};
use crate::workers::RoomWorker;

/// Owns one worker per active room. Rooms share the repository and clock
/// but nothing else.
pub struct RoomRegistry {
    config: RuntimeConfig,
    repository: Arc<dyn StateRepository>,
    clock: Arc<dyn Clock>,
    rooms: Mutex<HashMap<String, RoomHandle>>,
}

impl RoomRegistry {
    pub fn new(
        config: RuntimeConfig,
        repository: Arc<dyn StateRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            repository,
            clock,
            rooms: Mutex::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Handle to `room`, spawning its worker on first use.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn room(&self, room: &str) -> RoomHandle {
        let mut rooms = self.rooms.lock().await;
        if let Some(handle) = rooms.get(room) {
            return handle.clone();
        }

        let handle = self.spawn_room(room);
        rooms.insert(room.to_owned(), handle.clone());
        handle
    }

    /// Gives back a handle obtained from [`RoomRegistry::room`].
    ///
    /// When no connection is attached and no other handle to the room is
    /// alive, the room is dropped from the registry and its worker stops
    /// once its queue drains. The next [`RoomRegistry::room`] call for the
    /// key spawns a fresh worker that reloads the persisted state.
    ///
    /// Returns true if the room was dropped.
    pub async fn release(&self, handle: RoomHandle) -> bool {
        let key = handle.room().to_owned();
        drop(handle);

        let mut rooms = self.rooms.lock().await;
        let idle = rooms
            .get(&key)
            .is_some_and(|stored| stored.connection_count() == 0 && stored.handle_count() == 1);
        if !idle {
            return false;
        }

        rooms.remove(&key);
        info!(target: "runtime::registry", room = %key, "room worker released");
        true
    }

    /// Keys of the rooms with a running worker, sorted.
    pub async fn active_rooms(&self) -> Vec<String> {
        let rooms = self.rooms.lock().await;
        let mut keys: Vec<String> = rooms.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    fn spawn_room(&self, room: &str) -> RoomHandle {
        let hub = Arc::new(ConnectionHub::new());
        let (command_tx, command_rx) = mpsc::channel(self.config.command_buffer_size);

        let rng = match self.config.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let dispatcher = Dispatcher::new(
            room,
            Arc::clone(&self.repository),
            Arc::clone(&hub) as Arc<dyn Transport>,
            Arc::clone(&self.clock),
            self.config.game_config.clone(),
            rng,
        );
        tokio::spawn(RoomWorker::new(dispatcher, command_rx).run());

        info!(target: "runtime::registry", room, "room worker spawned");
        RoomHandle::new(Arc::from(room), command_tx, hub)
    }
}
