//! Rejections produced while executing a command.
//!
//! The display text of each variant is exactly what the acting client sees.

use crate::error::{ErrorKind, GameError};

/// Host-only operations, used to word authorization failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum HostAction {
    Start,
    End,
    Restart,
}

/// Errors surfaced while executing a command through the game engine.
///
/// A rejected command never mutates state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    // ===== phase =====
    #[error("Game already in progress")]
    GameAlreadyStarted,

    #[error("Game not started")]
    GameNotStarted,

    #[error("Room is full (maximum {max} players)")]
    RoomFull { max: usize },

    #[error("Room is full, cannot {action}")]
    OverCapacity { action: &'static str },

    #[error("Need at least {min} players")]
    NotEnoughPlayers { min: usize },

    #[error("Need at least {min} players to restart")]
    NotEnoughPlayersToRestart { min: usize },

    #[error("All players must be ready")]
    PlayersNotReady,

    // ===== authorization =====
    #[error("Not your turn")]
    NotYourTurn,

    #[error("Only the host can {action} the game")]
    NotHost { action: HostAction },

    // ===== lookup =====
    #[error("Player not found")]
    PlayerNotFound,

    #[error("Card not in hand")]
    CardNotInHand,

    // ===== rules =====
    #[error("You are already in this room")]
    AlreadyJoined,

    #[error("Player name must not be empty")]
    EmptyName,

    #[error("Player name \"{name}\" is already taken. Please choose a different name.")]
    NameTaken { name: String },

    #[error("Invalid card play")]
    IllegalPlay,

    #[error("Must choose a color for wild card")]
    ColorRequired,

    #[error("Chosen color must be red, green, blue or yellow")]
    InvalidColorChoice,

    #[error("Can only call UNO with one card")]
    UnoRequiresOneCard,

    #[error("Play or keep the card you just drew first")]
    DecisionPending,

    #[error("No drawn card is waiting for a decision")]
    NoPendingDecision,

    #[error("Only the card you just drew can be played now")]
    NotDrawnCard,
}

impl GameError for CommandError {
    fn kind(&self) -> ErrorKind {
        use CommandError::*;
        match self {
            GameAlreadyStarted
            | GameNotStarted
            | RoomFull { .. }
            | OverCapacity { .. }
            | NotEnoughPlayers { .. }
            | NotEnoughPlayersToRestart { .. }
            | PlayersNotReady => ErrorKind::PhasePrecondition,
            NotYourTurn | NotHost { .. } => ErrorKind::AuthorizationDenied,
            PlayerNotFound | CardNotInHand => ErrorKind::NotFound,
            AlreadyJoined
            | EmptyName
            | NameTaken { .. }
            | IllegalPlay
            | ColorRequired
            | InvalidColorChoice
            | UnoRequiresOneCard
            | DecisionPending
            | NoPendingDecision
            | NotDrawnCard => ErrorKind::RuleViolation,
        }
    }

    fn error_code(&self) -> &'static str {
        use CommandError::*;
        match self {
            GameAlreadyStarted => "GAME_ALREADY_STARTED",
            GameNotStarted => "GAME_NOT_STARTED",
            RoomFull { .. } => "ROOM_FULL",
            OverCapacity { .. } => "OVER_CAPACITY",
            NotEnoughPlayers { .. } => "NOT_ENOUGH_PLAYERS",
            NotEnoughPlayersToRestart { .. } => "NOT_ENOUGH_PLAYERS_TO_RESTART",
            PlayersNotReady => "PLAYERS_NOT_READY",
            NotYourTurn => "NOT_YOUR_TURN",
            NotHost { .. } => "NOT_HOST",
            PlayerNotFound => "PLAYER_NOT_FOUND",
            CardNotInHand => "CARD_NOT_IN_HAND",
            AlreadyJoined => "ALREADY_JOINED",
            EmptyName => "EMPTY_NAME",
            NameTaken { .. } => "NAME_TAKEN",
            IllegalPlay => "ILLEGAL_PLAY",
            ColorRequired => "COLOR_REQUIRED",
            InvalidColorChoice => "INVALID_COLOR_CHOICE",
            UnoRequiresOneCard => "UNO_REQUIRES_ONE_CARD",
            DecisionPending => "DECISION_PENDING",
            NoPendingDecision => "NO_PENDING_DECISION",
            NotDrawnCard => "NOT_DRAWN_CARD",
        }
    }
}
