//! Side effects of a played card on turn order and hands.
//!
//! Every accepted play ends with exactly one effective turn transition.
//! Number cards (and a plain `Wild` with three or more players) leave the
//! transition to the caller; every other face performs it here and reports
//! so, which keeps the caller from advancing a second time.

use rand::RngCore;

use crate::card::{Card, Value};
use crate::state::GameState;

use super::draw::draw_to_seat;
use super::turn::{advance, next_index};

/// What a played card did, reported back to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectOutcome {
    /// True when the effect already moved the turn pointer.
    pub turn_advanced: bool,
    /// Seat forced to draw and how many cards it received.
    pub forced_draw: Option<(usize, usize)>,
}

impl EffectOutcome {
    const NONE: Self = Self {
        turn_advanced: false,
        forced_draw: None,
    };

    const ADVANCED: Self = Self {
        turn_advanced: true,
        forced_draw: None,
    };
}

/// Applies the effect of `card`, which has just been moved onto the discard
/// pile by the player at `current_player_index`.
///
/// | face | 2 players | 3+ players |
/// |---|---|---|
/// | Skip | opponent skipped, same player again | next player skipped |
/// | Reverse | acts as Skip | direction flips, turn passes the new way |
/// | Wild | opponent skipped | no turn change here |
/// | DrawTwo | opponent draws 2, skipped | next player draws 2, skipped |
/// | WildDrawFour | opponent draws 4, skipped | next player draws 4, skipped |
pub fn apply_effect(card: &Card, state: &mut GameState, rng: &mut dyn RngCore) -> EffectOutcome {
    let heads_up = state.players.len() == 2;

    match card.value {
        Value::Skip => {
            skip_next(state);
            EffectOutcome::ADVANCED
        }
        Value::Reverse => {
            if heads_up {
                skip_next(state);
            } else {
                // Flip, then hand the turn on in the new direction; this is
                // the play's one transition, so the caller must not advance.
                state.direction = state.direction.reversed();
                advance(state, 1);
            }
            EffectOutcome::ADVANCED
        }
        Value::Wild => {
            if heads_up {
                skip_next(state);
                EffectOutcome::ADVANCED
            } else {
                EffectOutcome::NONE
            }
        }
        Value::DrawTwo => penalize_next(state, 2, rng),
        Value::WildDrawFour => penalize_next(state, 4, rng),
        _ => EffectOutcome::NONE,
    }
}

/// Passes the turn over the next seat. With two players this lands back on
/// the current player.
fn skip_next(state: &mut GameState) {
    advance(state, 2);
}

fn penalize_next(state: &mut GameState, count: usize, rng: &mut dyn RngCore) -> EffectOutcome {
    let target = next_index(state);
    let drawn = draw_to_seat(state, target, count, rng);
    skip_next(state);
    EffectOutcome {
        turn_advanced: true,
        forced_draw: Some((target, drawn)),
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::card::Color;
    use crate::deck::standard_deck;
    use crate::state::{Direction, Player, PlayerId};

    fn table(players: usize) -> GameState {
        let mut state = GameState::new();
        for i in 0..players {
            state
                .players
                .push(Player::new(PlayerId::new(format!("p{i}")), format!("P{i}")));
        }
        state.deck = standard_deck();
        state.started = true;
        state
    }

    fn play(value: Value, players: usize) -> (GameState, EffectOutcome) {
        let mut rng = StdRng::seed_from_u64(11);
        let mut state = table(players);
        let card = Card::new("played", Color::Red, value);
        let outcome = apply_effect(&card, &mut state, &mut rng);
        (state, outcome)
    }

    #[test]
    fn number_cards_leave_turn_to_caller() {
        let (state, outcome) = play(Value::Seven, 3);
        assert!(!outcome.turn_advanced);
        assert_eq!(state.current_player_index, 0);
    }

    #[test]
    fn skip_two_players_returns_to_player() {
        let (state, outcome) = play(Value::Skip, 2);
        assert!(outcome.turn_advanced);
        assert_eq!(state.current_player_index, 0);
    }

    #[test]
    fn skip_three_players_skips_next() {
        let (state, outcome) = play(Value::Skip, 3);
        assert!(outcome.turn_advanced);
        assert_eq!(state.current_player_index, 2);
    }

    #[test]
    fn reverse_two_players_acts_as_skip() {
        let (state, outcome) = play(Value::Reverse, 2);
        assert!(outcome.turn_advanced);
        assert_eq!(state.current_player_index, 0);
        assert_eq!(state.direction, Direction::Clockwise);
    }

    #[test]
    fn reverse_three_players_flips_direction() {
        let (state, outcome) = play(Value::Reverse, 4);
        assert!(outcome.turn_advanced);
        assert_eq!(state.direction, Direction::CounterClockwise);
        assert_eq!(state.current_player_index, 3);
    }

    #[test]
    fn wild_two_players_skips_opponent() {
        let (state, outcome) = play(Value::Wild, 2);
        assert!(outcome.turn_advanced);
        assert_eq!(state.current_player_index, 0);
    }

    #[test]
    fn wild_three_players_only_changes_color() {
        let (state, outcome) = play(Value::Wild, 3);
        assert!(!outcome.turn_advanced);
        assert_eq!(state.current_player_index, 0);
    }

    #[test]
    fn draw_two_three_players() {
        let (state, outcome) = play(Value::DrawTwo, 3);
        assert!(outcome.turn_advanced);
        assert_eq!(outcome.forced_draw, Some((1, 2)));
        assert_eq!(state.players[1].hand_len(), 2);
        assert_eq!(state.current_player_index, 2);
    }

    #[test]
    fn wild_draw_four_two_players() {
        let (state, outcome) = play(Value::WildDrawFour, 2);
        assert_eq!(outcome.forced_draw, Some((1, 4)));
        assert_eq!(state.players[1].hand_len(), 4);
        assert_eq!(state.current_player_index, 0);
    }

    #[test]
    fn draw_two_targets_next_in_current_direction() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = table(4);
        state.direction = Direction::CounterClockwise;
        let card = Card::new("played", Color::Blue, Value::DrawTwo);

        let outcome = apply_effect(&card, &mut state, &mut rng);

        assert_eq!(outcome.forced_draw, Some((3, 2)));
        assert_eq!(state.current_player_index, 2);
    }
}
