//! The 108-card composition and the shuffle used for dealing and reshuffling.

use rand::Rng;

use crate::card::{Card, Color, Value};
use crate::config::GameConfig;

/// Faces that appear twice per color.
const DOUBLED_FACES: [Value; 12] = [
    Value::One,
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Skip,
    Value::Reverse,
    Value::DrawTwo,
];

/// Number of `Wild` and of `WildDrawFour` cards in a deck.
const WILDS_PER_KIND: usize = 4;

/// Builds the full deck in canonical (unshuffled) order.
///
/// Per color: one `0`, two each of `1..9`, `Skip`, `Reverse`, `DrawTwo`.
/// Then four `Wild` and four `WildDrawFour`.
pub fn standard_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(GameConfig::DECK_SIZE);

    for color in Color::SUITS {
        cards.push(Card::new(format!("{color}-0"), color, Value::Zero));
        for value in DOUBLED_FACES {
            for copy in 1..=2 {
                cards.push(Card::new(format!("{color}-{value}-{copy}"), color, value));
            }
        }
    }

    for i in 1..=WILDS_PER_KIND {
        cards.push(Card::new(format!("wild-{i}"), Color::Wild, Value::Wild));
        cards.push(Card::new(
            format!("wild-draw-{i}"),
            Color::Wild,
            Value::WildDrawFour,
        ));
    }

    debug_assert_eq!(cards.len(), GameConfig::DECK_SIZE);
    cards
}

/// Returns a freshly shuffled deck.
pub fn generate_deck<R: Rng + ?Sized>(rng: &mut R) -> Vec<Card> {
    shuffle(standard_deck(), rng)
}

/// Fisher–Yates shuffle: for `i` from the last index down to 1, swap with a
/// uniformly chosen index in `[0, i]`.
pub fn shuffle<T, R: Rng + ?Sized>(mut items: Vec<T>, rng: &mut R) -> Vec<T> {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
    items
}
