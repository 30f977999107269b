//! State invariant violations.
//!
//! These never reach clients. They indicate a bug in the engine and are
//! raised by [`GameState::check_invariants`](super::GameState::check_invariants),
//! which tests and debug builds use to audit every transition.

/// Structural invariant that a [`GameState`](super::GameState) failed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    #[error("card conservation broken: {found} cards in play, expected {expected}")]
    CardCount { found: usize, expected: usize },

    #[error("duplicate card id {0} in play")]
    DuplicateCard(String),

    #[error("current player index {index} out of range for {players} players")]
    CurrentIndexOutOfRange { index: usize, players: usize },

    #[error("room holds {players} players (max: {max})")]
    TooManyPlayers { players: usize, max: usize },

    #[error("game is running with {players} players (min: {min})")]
    TooFewPlayers { players: usize, min: usize },

    #[error("lobby still holds cards on the table")]
    LobbyNotEmpty,

    #[error("pending decision references a player or card that is not present")]
    DanglingPendingDecision,
}
