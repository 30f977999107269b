//! Delivery of server messages to the connections attached to one room.
//!
//! A connection's id doubles as the id of the player it seats, so the
//! transport and the engine share [`PlayerId`].

mod hub;

pub use hub::ConnectionHub;

use uno_core::PlayerId;

use crate::protocol::ServerMessage;

/// Outbound side of a room's connections.
///
/// Delivery is best-effort: a message to a connection that has gone away is
/// dropped without error.
pub trait Transport: Send + Sync {
    /// Unicast to one connection.
    fn send(&self, to: &PlayerId, message: &ServerMessage);

    /// Send to every connection currently attached to the room.
    fn broadcast(&self, message: &ServerMessage);

    /// Ids of the connections currently attached to the room.
    fn connections(&self) -> Vec<PlayerId>;
}
