//! Wire protocol between clients and a room.
//!
//! Both directions are JSON objects whose `type` field selects the variant.
//! Inbound text is parsed and validated here, before anything reaches the
//! engine.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uno_core::{Card, CardId, Color, Command, ErrorKind, GameError, GameState};

/// Messages a client may send to its room.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    Join {
        name: String,
    },
    Ready,
    StartGame,
    EndGame,
    RestartGame,
    PlayCard {
        card_id: CardId,
        #[serde(default)]
        chosen_color: Option<Color>,
    },
    DrawCard,
    PlayDrawnCard {
        card_id: CardId,
        #[serde(default)]
        chosen_color: Option<Color>,
    },
    KeepDrawnCard,
    CallUno,
}

impl ClientMessage {
    /// Every accepted value of the `type` field.
    pub const TYPES: [&'static str; 10] = [
        "join",
        "ready",
        "startGame",
        "endGame",
        "restartGame",
        "playCard",
        "drawCard",
        "playDrawnCard",
        "keepDrawnCard",
        "callUno",
    ];

    /// Parses one inbound frame.
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|_| ProtocolError::InvalidFormat)?;
        let kind = value
            .get("type")
            .and_then(serde_json::Value::as_str)
            .ok_or(ProtocolError::InvalidFormat)?;
        if !Self::TYPES.contains(&kind) {
            return Err(ProtocolError::UnknownType(kind.to_owned()));
        }
        serde_json::from_value(value).map_err(|_| ProtocolError::InvalidFormat)
    }
}

impl From<ClientMessage> for Command {
    fn from(message: ClientMessage) -> Self {
        match message {
            ClientMessage::Join { name } => Command::Join { name },
            ClientMessage::Ready => Command::Ready,
            ClientMessage::StartGame => Command::StartGame,
            ClientMessage::EndGame => Command::EndGame,
            ClientMessage::RestartGame => Command::RestartGame,
            ClientMessage::PlayCard {
                card_id,
                chosen_color,
            } => Command::PlayCard {
                card_id,
                chosen_color,
            },
            ClientMessage::DrawCard => Command::DrawCard,
            ClientMessage::PlayDrawnCard {
                card_id,
                chosen_color,
            } => Command::PlayDrawnCard {
                card_id,
                chosen_color,
            },
            ClientMessage::KeepDrawnCard => Command::KeepDrawnCard,
            ClientMessage::CallUno => Command::CallUno,
        }
    }
}

/// Messages a room sends to its clients.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerMessage {
    /// Full room snapshot, broadcast after every change and sent on connect.
    State { state: GameState },
    /// Rejection of the recipient's last message.
    Error { message: String },
    /// A playable card the recipient just drew; they may play or keep it.
    DrawnCard { card: Card },
}

impl ServerMessage {
    pub fn error(err: &impl std::fmt::Display) -> Self {
        ServerMessage::Error {
            message: err.to_string(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Inbound frames that could not be turned into a [`ClientMessage`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Unknown message type")]
    UnknownType(String),

    #[error("Invalid message format")]
    InvalidFormat,
}

impl GameError for ProtocolError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::MalformedMessage
    }

    fn error_code(&self) -> &'static str {
        match self {
            ProtocolError::UnknownType(_) => "UNKNOWN_MESSAGE_TYPE",
            ProtocolError::InvalidFormat => "INVALID_MESSAGE_FORMAT",
        }
    }
}
