//! Player intents accepted by the engine.
//!
//! A [`Command`] is the validated, transport-free form of an inbound client
//! message. The sender is never part of the command itself: the engine is told
//! who acts, so a client can only ever speak for its own connection.

use crate::card::{CardId, Color};

/// Everything a seated (or joining) player can ask the room to do.
#[derive(Clone, Debug, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    /// Take a seat under a display name.
    Join { name: String },
    /// Mark self ready for the next game.
    Ready,
    /// Deal and flip the first card. Host only.
    StartGame,
    /// Abandon the running game and return to the lobby. Host only.
    EndGame,
    /// Clear the table and every ready flag. Host only.
    RestartGame,
    /// Play a card from hand. `chosen_color` is required for wild cards.
    PlayCard {
        card_id: CardId,
        chosen_color: Option<Color>,
    },
    /// Draw one card instead of playing.
    DrawCard,
    /// Play the card just drawn.
    PlayDrawnCard {
        card_id: CardId,
        chosen_color: Option<Color>,
    },
    /// Keep the card just drawn and end the turn.
    KeepDrawnCard,
    /// Announce UNO while holding exactly one card.
    CallUno,
}
