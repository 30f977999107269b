//! Channel-backed [`Transport`] used by the room workers.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tokio::sync::mpsc;
use uno_core::PlayerId;

use super::Transport;
use crate::protocol::ServerMessage;

/// Per-room registry of live connections.
///
/// Each attached connection owns the receiving end of an unbounded channel;
/// whoever drives the socket drains it.
#[derive(Default)]
pub struct ConnectionHub {
    senders: RwLock<HashMap<PlayerId, mpsc::UnboundedSender<ServerMessage>>>,
}

impl ConnectionHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attaches a connection and returns its outbound message stream.
    ///
    /// Attaching an id twice replaces the earlier stream, which then ends.
    pub fn attach(&self, id: PlayerId) -> mpsc::UnboundedReceiver<ServerMessage> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut senders = self.senders.write().unwrap_or_else(PoisonError::into_inner);
        senders.insert(id, tx);
        rx
    }

    /// Detaches a connection. Returns false if it was not attached.
    pub fn detach(&self, id: &PlayerId) -> bool {
        let mut senders = self.senders.write().unwrap_or_else(PoisonError::into_inner);
        senders.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        let senders = self.senders.read().unwrap_or_else(PoisonError::into_inner);
        senders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Transport for ConnectionHub {
    fn send(&self, to: &PlayerId, message: &ServerMessage) {
        let senders = self.senders.read().unwrap_or_else(PoisonError::into_inner);
        match senders.get(to) {
            Some(tx) => {
                if tx.send(message.clone()).is_err() {
                    tracing::trace!(target: "runtime::transport", conn = %to, "receiver dropped");
                }
            }
            None => tracing::trace!(target: "runtime::transport", conn = %to, "not attached"),
        }
    }

    fn broadcast(&self, message: &ServerMessage) {
        let senders = self.senders.read().unwrap_or_else(PoisonError::into_inner);
        for (id, tx) in senders.iter() {
            if tx.send(message.clone()).is_err() {
                tracing::trace!(target: "runtime::transport", conn = %id, "receiver dropped");
            }
        }
    }

    fn connections(&self) -> Vec<PlayerId> {
        let senders = self.senders.read().unwrap_or_else(PoisonError::into_inner);
        senders.keys().cloned().collect()
    }
}
