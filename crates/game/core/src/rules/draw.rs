//! Drawing from the deck, including the reshuffle-on-empty policy.

use rand::RngCore;

use crate::card::{Card, Color};
use crate::deck::shuffle;
use crate::state::GameState;

/// Refills an empty deck from the discard pile.
///
/// The active top card is set aside, the rest of the discard pile is
/// shuffled into a new deck, and the saved card becomes the one-card discard
/// pile. Played wild cards go back into the deck as `Wild` colored.
///
/// Returns true if the deck holds at least one card afterwards. With nothing
/// under the top card the deck stays empty and nothing can be drawn.
pub fn replenish_deck(state: &mut GameState, rng: &mut dyn RngCore) -> bool {
    if !state.deck.is_empty() {
        return true;
    }

    let Some(top) = state.discard_pile.pop() else {
        return false;
    };

    let mut recycled = std::mem::take(&mut state.discard_pile);
    for card in &mut recycled {
        if card.is_wild() {
            card.color = Color::Wild;
        }
    }
    state.deck = shuffle(recycled, rng);
    state.discard_pile.push(top);

    !state.deck.is_empty()
}

/// Pops one card off the deck, reshuffling first if it is empty.
pub fn draw_one(state: &mut GameState, rng: &mut dyn RngCore) -> Option<Card> {
    if state.deck.is_empty() && !replenish_deck(state, rng) {
        return None;
    }
    state.deck.pop()
}

/// Draws up to `count` cards into the hand of the player at `seat`.
///
/// Each card applies the reshuffle policy independently. Returns the number
/// of cards actually drawn, which is less than `count` only when both piles
/// ran dry.
pub fn draw_to_seat(
    state: &mut GameState,
    seat: usize,
    count: usize,
    rng: &mut dyn RngCore,
) -> usize {
    let mut drawn = 0;
    for _ in 0..count {
        let Some(card) = draw_one(state, rng) else {
            break;
        };
        match state.players.get_mut(seat) {
            Some(player) => player.receive(card),
            None => {
                // No such seat: put the card back untouched.
                state.deck.push(card);
                break;
            }
        }
        drawn += 1;
    }
    drawn
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::card::Value;
    use crate::state::{Player, PlayerId};

    fn card(id: &str, color: Color, value: Value) -> Card {
        Card::new(id, color, value)
    }

    #[test]
    fn reshuffles_discard_under_the_top_card() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = GameState::new();
        state.players.push(Player::new(PlayerId::from("a"), "A"));
        state.discard_pile = vec![
            card("red-1-1", Color::Red, Value::One),
            card("wild-1", Color::Blue, Value::Wild),
            card("red-2-1", Color::Red, Value::Two),
        ];

        let drawn = draw_to_seat(&mut state, 0, 1, &mut rng);

        assert_eq!(drawn, 1);
        assert_eq!(state.discard_pile.len(), 1);
        assert_eq!(state.discard_pile[0].id.as_str(), "red-2-1");
        assert_eq!(state.deck.len() + state.players[0].hand_len(), 2);

        let recycled_wild = state
            .deck
            .iter()
            .chain(state.players[0].hand.iter())
            .find(|c| c.value == Value::Wild)
            .unwrap();
        assert_eq!(recycled_wild.color, Color::Wild);
    }

    #[test]
    fn single_discard_card_cannot_be_drawn() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = GameState::new();
        state.players.push(Player::new(PlayerId::from("a"), "A"));
        state.discard_pile = vec![card("red-1-1", Color::Red, Value::One)];

        assert_eq!(draw_to_seat(&mut state, 0, 2, &mut rng), 0);
        assert!(state.players[0].hand.is_empty());
        assert_eq!(state.discard_pile.len(), 1);
        assert!(state.deck.is_empty());
    }

    #[test]
    fn draws_from_the_top_of_the_deck() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = GameState::new();
        state.deck = vec![
            card("red-1-1", Color::Red, Value::One),
            card("red-2-1", Color::Red, Value::Two),
        ];
        let drawn = draw_one(&mut state, &mut rng).unwrap();
        assert_eq!(drawn.id.as_str(), "red-2-1");
    }

    #[test]
    fn empty_table_yields_nothing() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut state = GameState::new();
        assert!(draw_one(&mut state, &mut rng).is_none());
        assert!(!replenish_deck(&mut state, &mut rng));
    }
}
