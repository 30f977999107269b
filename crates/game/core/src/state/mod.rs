//! Authoritative room state representation.
//!
//! [`GameState`] is the single root aggregate for a room: the roster, the
//! deck, the discard pile and the turn bookkeeping. Runtime layers clone,
//! persist, and broadcast it but mutate it exclusively through the engine.
pub mod error;
pub mod types;

use std::collections::HashSet;

pub use error::InvariantViolation;
pub use types::{Direction, Player, PlayerId, Timestamp};

use crate::card::{Card, CardId};
use crate::config::GameConfig;

/// Coarse room phase derived from [`GameState::started`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    Lobby,
    Active,
}

/// A drawn card that is playable and awaits the drawer's keep-or-play decision.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct PendingDecision {
    pub player_id: PlayerId,
    pub card_id: CardId,
}

/// Canonical snapshot of one room.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct GameState {
    /// Seated players in join order. Index 0 is the host.
    pub players: Vec<Player>,

    /// Draw pile. The last element is the top (pop = draw).
    pub deck: Vec<Card>,

    /// Played cards. The last element is the active card.
    pub discard_pile: Vec<Card>,

    pub current_player_index: usize,
    pub direction: Direction,
    pub started: bool,

    /// Advisory instant of the last resolved play.
    pub last_action_timestamp: Option<Timestamp>,

    /// Set between a playable draw and the drawer's keep-or-play decision.
    #[cfg_attr(feature = "serde", serde(default))]
    pub pending_decision: Option<PendingDecision>,
}

impl GameState {
    /// Creates an empty lobby.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        if self.started {
            Phase::Active
        } else {
            Phase::Lobby
        }
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= GameConfig::MAX_PLAYERS
    }

    pub fn player_index(&self, id: &PlayerId) -> Option<usize> {
        self.players.iter().position(|p| &p.id == id)
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    pub fn player_mut(&mut self, id: &PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| &p.id == id)
    }

    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// The host is whoever currently sits at index 0.
    pub fn host(&self) -> Option<&Player> {
        self.players.first()
    }

    pub fn is_host(&self, id: &PlayerId) -> bool {
        self.host().is_some_and(|p| &p.id == id)
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_player_index)
    }

    pub fn top_card(&self) -> Option<&Card> {
        self.discard_pile.last()
    }

    pub fn all_ready(&self) -> bool {
        self.players.iter().all(|p| p.ready)
    }

    /// Cards currently on the table: deck, discard pile, and every hand.
    pub fn cards_in_play(&self) -> usize {
        self.deck.len()
            + self.discard_pile.len()
            + self.players.iter().map(Player::hand_len).sum::<usize>()
    }

    /// Player who emptied their hand in the game that just ended.
    ///
    /// A game actually happened when the discard pile is non-empty; the
    /// winner is the player left with no cards.
    pub fn winner(&self) -> Option<&Player> {
        if self.started || self.discard_pile.is_empty() {
            return None;
        }
        self.players.iter().find(|p| p.has_empty_hand())
    }

    /// Returns the table to lobby shape: no cards anywhere, first seat to
    /// act, clockwise. Roster and `ready` flags are kept.
    pub fn reset_table(&mut self) {
        self.started = false;
        self.deck.clear();
        self.discard_pile.clear();
        self.current_player_index = 0;
        self.direction = Direction::Clockwise;
        self.pending_decision = None;
        for player in &mut self.players {
            player.clear_hand();
        }
    }

    pub fn clear_ready(&mut self) {
        for player in &mut self.players {
            player.ready = false;
        }
    }

    /// Audits the structural invariants of the room.
    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.players.len() > GameConfig::MAX_PLAYERS {
            return Err(InvariantViolation::TooManyPlayers {
                players: self.players.len(),
                max: GameConfig::MAX_PLAYERS,
            });
        }

        let cards = self.cards_in_play();
        let mut seen = HashSet::with_capacity(cards);
        let all_cards = self
            .deck
            .iter()
            .chain(self.discard_pile.iter())
            .chain(self.players.iter().flat_map(|p| p.hand.iter()));
        for card in all_cards {
            if !seen.insert(&card.id) {
                return Err(InvariantViolation::DuplicateCard(card.id.to_string()));
            }
        }

        if self.started {
            if self.players.len() < GameConfig::MIN_PLAYERS {
                return Err(InvariantViolation::TooFewPlayers {
                    players: self.players.len(),
                    min: GameConfig::MIN_PLAYERS,
                });
            }
            if self.current_player_index >= self.players.len() {
                return Err(InvariantViolation::CurrentIndexOutOfRange {
                    index: self.current_player_index,
                    players: self.players.len(),
                });
            }
            if cards != GameConfig::DECK_SIZE {
                return Err(InvariantViolation::CardCount {
                    found: cards,
                    expected: GameConfig::DECK_SIZE,
                });
            }
        } else if self.discard_pile.is_empty() && cards != 0 {
            // A finished game keeps its table for winner inference; a lobby
            // that never dealt (or was reset) holds nothing.
            return Err(InvariantViolation::LobbyNotEmpty);
        }

        if let Some(pending) = &self.pending_decision {
            let holds_card = self
                .player(&pending.player_id)
                .is_some_and(|p| p.find_card(&pending.card_id).is_some());
            if !holds_card {
                return Err(InvariantViolation::DanglingPendingDecision);
            }
        }

        Ok(())
    }
}
