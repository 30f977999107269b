//! Cloneable façade for issuing commands to a room.
//!
//! [`RoomHandle`] hides the channel plumbing between a connection driver and
//! the room worker.
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use uno_core::{GameState, PlayerId};

use super::errors::{Result, RuntimeError};
use crate::protocol::ServerMessage;
use crate::transport::ConnectionHub;
use crate::workers::RoomCommand;

/// Client-facing handle to one room.
#[derive(Clone)]
pub struct RoomHandle {
    room: Arc<str>,
    command_tx: mpsc::Sender<RoomCommand>,
    hub: Arc<ConnectionHub>,
}

impl RoomHandle {
    pub(crate) fn new(
        room: Arc<str>,
        command_tx: mpsc::Sender<RoomCommand>,
        hub: Arc<ConnectionHub>,
    ) -> Self {
        Self {
            room,
            command_tx,
            hub,
        }
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    /// Number of connections currently attached.
    pub fn connection_count(&self) -> usize {
        self.hub.len()
    }

    /// Number of live clones of this handle, the registry's own included.
    pub(crate) fn handle_count(&self) -> usize {
        Arc::strong_count(&self.room)
    }

    /// Attach a connection and return the stream of messages addressed to it.
    ///
    /// The first message on the stream is the room state.
    pub async fn connect(&self, conn: PlayerId) -> Result<mpsc::UnboundedReceiver<ServerMessage>> {
        let outbound = self.hub.attach(conn.clone());
        let (reply_tx, reply_rx) = oneshot::channel();

        let result = self
            .request(
                RoomCommand::Connect {
                    conn: conn.clone(),
                    reply: reply_tx,
                },
                reply_rx,
            )
            .await;

        match result {
            Ok(()) => Ok(outbound),
            Err(err) => {
                self.hub.detach(&conn);
                Err(err)
            }
        }
    }

    /// Forward one raw frame received from `conn`.
    pub async fn send_message(&self, conn: &PlayerId, raw: impl Into<String>) -> Result<()> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request(
            RoomCommand::Message {
                conn: conn.clone(),
                raw: raw.into(),
                reply: reply_tx,
            },
            reply_rx,
        )
        .await
    }

    /// Detach `conn` and remove its player from the room.
    pub async fn disconnect(&self, conn: &PlayerId) -> Result<()> {
        self.hub.detach(conn);
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request(
            RoomCommand::Disconnect {
                conn: conn.clone(),
                reply: reply_tx,
            },
            reply_rx,
        )
        .await
    }

    /// Query the persisted room state (read-only snapshot).
    pub async fn query_state(&self) -> Result<GameState> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.request(RoomCommand::QueryState { reply: reply_tx }, reply_rx)
            .await
    }

    async fn request<T>(
        &self,
        command: RoomCommand,
        reply_rx: oneshot::Receiver<Result<T>>,
    ) -> Result<T> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)?
    }
}
