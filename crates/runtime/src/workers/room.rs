//! Room worker that owns a room's [`Dispatcher`].
//!
//! Receives commands from [`RoomHandle`](crate::RoomHandle) and applies them
//! one at a time, so no event for a room starts before the previous one has
//! been persisted.

use tokio::sync::{mpsc, oneshot};
use tracing::debug;
use uno_core::{GameState, PlayerId};

use crate::api::Result;
use crate::dispatcher::Dispatcher;

/// Commands that can be sent to a room worker.
pub enum RoomCommand {
    /// A connection attached to the room.
    Connect {
        conn: PlayerId,
        reply: oneshot::Sender<Result<()>>,
    },
    /// A raw frame received from a connection.
    Message {
        conn: PlayerId,
        raw: String,
        reply: oneshot::Sender<Result<()>>,
    },
    /// A connection went away.
    Disconnect {
        conn: PlayerId,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Read the persisted room state.
    QueryState {
        reply: oneshot::Sender<Result<GameState>>,
    },
}

/// Background task that processes one room's commands.
pub struct RoomWorker {
    dispatcher: Dispatcher,
    command_rx: mpsc::Receiver<RoomCommand>,
}

impl RoomWorker {
    pub fn new(dispatcher: Dispatcher, command_rx: mpsc::Receiver<RoomCommand>) -> Self {
        Self {
            dispatcher,
            command_rx,
        }
    }

    /// Main worker loop. Ends once every handle to the room is dropped.
    pub async fn run(mut self) {
        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }
        debug!(target: "runtime::worker", room = %self.dispatcher.room(), "room worker stopped");
    }

    fn handle_command(&mut self, cmd: RoomCommand) {
        match cmd {
            RoomCommand::Connect { conn, reply } => {
                let result = self.dispatcher.connect(&conn);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Connect reply channel closed (caller dropped)");
                }
            }
            RoomCommand::Message { conn, raw, reply } => {
                let result = self.dispatcher.handle_message(&conn, &raw);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Message reply channel closed (caller dropped)");
                }
            }
            RoomCommand::Disconnect { conn, reply } => {
                let result = self.dispatcher.disconnect(&conn);
                if reply.send(result).is_err() {
                    debug!(target: "runtime::worker", "Disconnect reply channel closed (caller dropped)");
                }
            }
            RoomCommand::QueryState { reply } => {
                if reply.send(self.dispatcher.state()).is_err() {
                    debug!(target: "runtime::worker", "QueryState reply channel closed (caller dropped)");
                }
            }
        }
    }
}
