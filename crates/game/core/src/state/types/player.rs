use crate::card::{Card, CardId};

use super::{PlayerId, Timestamp};

/// A seated participant.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Player {
    pub id: PlayerId,
    /// Display name, unique within the room while the player is present.
    pub name: String,
    pub hand: Vec<Card>,
    /// Lobby-only readiness flag.
    pub ready: bool,
    /// Set when the hand size becomes exactly one.
    pub last_card_timestamp: Option<Timestamp>,
    /// True once the player has declared their one-card state.
    pub called_uno: bool,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Vec::new(),
            ready: false,
            last_card_timestamp: None,
            called_uno: false,
        }
    }

    pub fn hand_len(&self) -> usize {
        self.hand.len()
    }

    pub fn has_empty_hand(&self) -> bool {
        self.hand.is_empty()
    }

    /// Position of a card in the hand.
    pub fn find_card(&self, card_id: &CardId) -> Option<usize> {
        self.hand.iter().position(|c| &c.id == card_id)
    }

    /// Removes and returns the card at `index`.
    pub fn take_card(&mut self, index: usize) -> Card {
        self.hand.remove(index)
    }

    /// Adds a card to the hand.
    pub fn receive(&mut self, card: Card) {
        self.hand.push(card);
    }

    /// Keeps the UNO markers consistent with the current hand size.
    ///
    /// Reaching exactly one card starts the call window at `now`; any other
    /// size clears both markers.
    pub fn sync_uno_marker(&mut self, now: Timestamp) {
        if self.hand.len() == 1 {
            if self.last_card_timestamp.is_none() {
                self.last_card_timestamp = Some(now);
                self.called_uno = false;
            }
        } else {
            self.clear_uno_marker();
        }
    }

    pub fn clear_uno_marker(&mut self) {
        self.last_card_timestamp = None;
        self.called_uno = false;
    }

    /// Drops every card and the UNO markers.
    pub fn clear_hand(&mut self) {
        self.hand.clear();
        self.clear_uno_marker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{Color, Value};

    #[test]
    fn marker_starts_on_one_card_and_clears_otherwise() {
        let mut player = Player::new(PlayerId::from("p1"), "Ann");
        player.receive(Card::new("red-5-1", Color::Red, Value::Five));
        player.sync_uno_marker(Timestamp(100));
        assert_eq!(player.last_card_timestamp, Some(Timestamp(100)));
        assert!(!player.called_uno);

        // A later sync while still at one card keeps the original instant.
        player.called_uno = true;
        player.sync_uno_marker(Timestamp(900));
        assert_eq!(player.last_card_timestamp, Some(Timestamp(100)));
        assert!(player.called_uno);

        player.receive(Card::new("red-6-1", Color::Red, Value::Six));
        player.sync_uno_marker(Timestamp(1_000));
        assert_eq!(player.last_card_timestamp, None);
        assert!(!player.called_uno);
    }

    #[test]
    fn take_card_by_position() {
        let mut player = Player::new(PlayerId::from("p1"), "Ann");
        player.receive(Card::new("blue-skip-1", Color::Blue, Value::Skip));
        player.receive(Card::new("wild-1", Color::Wild, Value::Wild));

        let index = player.find_card(&CardId::from("wild-1")).unwrap();
        let card = player.take_card(index);
        assert_eq!(card.value, Value::Wild);
        assert_eq!(player.hand_len(), 1);
        assert_eq!(player.find_card(&CardId::from("wild-1")), None);
    }
}
