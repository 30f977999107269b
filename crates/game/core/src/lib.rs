//! Deterministic UNO rules and room state.
//!
//! `uno-core` defines the canonical rules (cards, legality, effects, turn
//! order, lobby lifecycle) and exposes pure APIs that the runtime drives.
//! All state mutation flows through [`engine::GameEngine`]; time and
//! randomness are injected by the caller through [`engine::TurnContext`].
pub mod card;
pub mod command;
pub mod config;
pub mod deck;
pub mod engine;
pub mod error;
pub mod rules;
pub mod state;

pub use card::{Card, CardId, Color, Value};
pub use command::Command;
pub use config::GameConfig;
pub use deck::{generate_deck, shuffle, standard_deck};
pub use engine::{
    CommandError, ExecutionOutcome, GameEngine, HostAction, Notice, TurnContext, reduce,
};
pub use error::{ErrorKind, GameError};
pub use state::{
    Direction, GameState, InvariantViolation, PendingDecision, Phase, Player, PlayerId, Timestamp,
};
