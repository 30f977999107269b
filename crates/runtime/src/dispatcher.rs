//! Session and message dispatcher for one room.
//!
//! The dispatcher is the only component that touches the state repository.
//! Every inbound event follows the same shape: load the room, run the pure
//! reducer on a copy, persist the copy only if the reducer accepted it, then
//! tell the clients. A rejected intent is answered to its sender alone and
//! nothing is written.

use std::sync::Arc;

use rand::rngs::StdRng;
use tracing::{debug, error, info};
use uno_core::{
    Command, ExecutionOutcome, GameConfig, GameEngine, GameError, GameState, Notice, PlayerId,
    TurnContext, reduce,
};

use crate::api::{Result, RuntimeError};
use crate::clock::Clock;
use crate::protocol::{ClientMessage, ServerMessage};
use crate::repository::StateRepository;
use crate::transport::Transport;

pub struct Dispatcher {
    room: String,
    repository: Arc<dyn StateRepository>,
    transport: Arc<dyn Transport>,
    clock: Arc<dyn Clock>,
    config: GameConfig,
    rng: StdRng,
}

impl Dispatcher {
    pub fn new(
        room: impl Into<String>,
        repository: Arc<dyn StateRepository>,
        transport: Arc<dyn Transport>,
        clock: Arc<dyn Clock>,
        config: GameConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            room: room.into(),
            repository,
            transport,
            clock,
            config,
            rng,
        }
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    /// Current persisted state of the room (a fresh lobby if never stored).
    pub fn state(&self) -> Result<GameState> {
        Ok(self.repository.get(&self.room)?.unwrap_or_default())
    }

    /// A connection attached to the room.
    ///
    /// Initializes the room on first use, drops seated players whose
    /// connection is gone, and sends the connection the current state.
    pub fn connect(&mut self, conn: &PlayerId) -> Result<()> {
        let state = match self.repository.get(&self.room)? {
            Some(state) => state,
            None => {
                let state = GameState::new();
                self.repository.put(&self.room, &state)?;
                info!(target: "runtime::dispatcher", room = %self.room, "room initialized");
                state
            }
        };

        let live = self.transport.connections();
        let mut staged = state.clone();
        let removed = {
            let mut ctx = TurnContext::new(&self.config, self.clock.now(), &mut self.rng);
            GameEngine::new(&mut staged).reconcile(&live, &mut ctx)
        };

        if removed.is_empty() {
            self.transport
                .send(conn, &ServerMessage::State { state });
            return Ok(());
        }

        info!(
            target: "runtime::dispatcher",
            room = %self.room,
            removed = ?removed,
            "dropped players without a live connection"
        );
        self.commit(&staged, "reconcile")?;
        self.transport
            .broadcast(&ServerMessage::State { state: staged });
        Ok(())
    }

    /// One raw inbound frame from `conn`.
    pub fn handle_message(&mut self, conn: &PlayerId, raw: &str) -> Result<()> {
        match ClientMessage::parse(raw) {
            Ok(message) => self.handle_command(conn, Command::from(message)),
            Err(err) => {
                debug!(
                    target: "runtime::dispatcher",
                    room = %self.room,
                    conn = %conn,
                    code = err.error_code(),
                    "malformed message"
                );
                self.transport.send(conn, &ServerMessage::error(&err));
                Ok(())
            }
        }
    }

    /// A parsed intent from `conn`.
    pub fn handle_command(&mut self, conn: &PlayerId, command: Command) -> Result<()> {
        let state = self.state()?;
        let now = self.clock.now();

        let result = {
            let mut ctx = TurnContext::new(&self.config, now, &mut self.rng);
            reduce(&state, conn, &command, &mut ctx)
        };

        let (next, outcome) = match result {
            Ok(accepted) => accepted,
            Err(err) => {
                debug!(
                    target: "runtime::dispatcher",
                    room = %self.room,
                    conn = %conn,
                    command = %command,
                    kind = %err.kind(),
                    code = err.error_code(),
                    "command rejected"
                );
                self.transport.send(conn, &ServerMessage::error(&err));
                return Ok(());
            }
        };

        self.commit(&next, command.as_ref())?;
        debug!(
            target: "runtime::dispatcher",
            room = %self.room,
            conn = %conn,
            command = %command,
            "command applied"
        );

        self.deliver(&outcome);
        self.transport.broadcast(&ServerMessage::State { state: next });
        Ok(())
    }

    /// The transport reported that `conn` went away.
    ///
    /// A room left with neither players nor connections is removed from
    /// the repository.
    pub fn disconnect(&mut self, conn: &PlayerId) -> Result<()> {
        let Some(state) = self.repository.get(&self.room)? else {
            return Ok(());
        };

        let mut staged = state;
        let removed = {
            let mut ctx = TurnContext::new(&self.config, self.clock.now(), &mut self.rng);
            GameEngine::new(&mut staged).disconnect(conn, &mut ctx)
        };

        if staged.players.is_empty() && self.transport.connections().is_empty() {
            self.repository.delete(&self.room).map_err(|err| {
                error!(target: "runtime::dispatcher", room = %self.room, error = %err, "failed to remove empty room");
                RuntimeError::from(err)
            })?;
            info!(target: "runtime::dispatcher", room = %self.room, "room emptied");
            return Ok(());
        }
        if !removed {
            return Ok(());
        }

        info!(
            target: "runtime::dispatcher",
            room = %self.room,
            conn = %conn,
            players = staged.players.len(),
            started = staged.started,
            "player left"
        );
        self.commit(&staged, "disconnect")?;
        self.transport
            .broadcast(&ServerMessage::State { state: staged });
        Ok(())
    }

    /// Audits and persists a staged state.
    fn commit(&self, state: &GameState, cause: &str) -> Result<()> {
        if let Err(source) = state.check_invariants() {
            error!(
                target: "runtime::dispatcher",
                room = %self.room,
                cause,
                error = %source,
                "staged state failed invariant check; discarding"
            );
            return Err(RuntimeError::CorruptState {
                room: self.room.clone(),
                command: cause.to_owned(),
                source,
            });
        }

        self.repository.put(&self.room, state).map_err(|err| {
            error!(
                target: "runtime::dispatcher",
                room = %self.room,
                cause,
                error = %err,
                "failed to persist room state"
            );
            RuntimeError::from(err)
        })
    }

    fn deliver(&self, outcome: &ExecutionOutcome) {
        for notice in &outcome.notices {
            match notice {
                Notice::DrawnCard { player, card } => {
                    self.transport
                        .send(player, &ServerMessage::DrawnCard { card: card.clone() });
                }
                Notice::ForcedDraw { player, drawn } => {
                    debug!(target: "runtime::dispatcher", room = %self.room, player = %player, drawn, "forced draw");
                }
                Notice::Penalized { player, drawn } => {
                    info!(target: "runtime::dispatcher", room = %self.room, player = %player, drawn, "missed UNO call penalized");
                }
                Notice::Won { player } => {
                    info!(target: "runtime::dispatcher", room = %self.room, player = %player, "game won");
                }
            }
        }
    }
}
