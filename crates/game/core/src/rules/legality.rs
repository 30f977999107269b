//! Whether a card may be played on the active discard.

use crate::card::{Card, Value};

/// Decides whether `card` may be played on `top`, given the full hand that
/// holds it.
///
/// - `WildDrawFour` is a last resort: it is playable only when no other
///   non-wild card in `hand` matches the top card's color or value.
/// - `Wild` is always playable.
/// - Anything else must match the top card's color or value.
pub fn is_playable(card: &Card, top: &Card, hand: &[Card]) -> bool {
    match card.value {
        Value::WildDrawFour => !hand
            .iter()
            .filter(|other| other.id != card.id && !other.is_wild())
            .any(|other| matches_top(other, top)),
        Value::Wild => true,
        _ => matches_top(card, top),
    }
}

fn matches_top(card: &Card, top: &Card) -> bool {
    card.color == top.color || card.value == top.value
}
