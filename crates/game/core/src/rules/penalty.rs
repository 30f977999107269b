//! Missed-UNO penalty policy.
//!
//! The check is reactive: it runs as part of another player's resolved play,
//! never on a timer. A player who reaches one card right before the room goes
//! quiet is therefore never punished.

use rand::RngCore;

use crate::config::GameConfig;
use crate::state::{GameState, PlayerId, Timestamp};

use super::draw::draw_to_seat;

/// Force-draws penalty cards for every player who has sat on one card without
/// calling UNO for longer than the call window.
///
/// Returns each punished player with the number of cards they received.
pub fn sweep_uno_penalties(
    state: &mut GameState,
    config: &GameConfig,
    now: Timestamp,
    rng: &mut dyn RngCore,
) -> Vec<(PlayerId, usize)> {
    let mut punished = Vec::new();

    for seat in 0..state.players.len() {
        let player = &state.players[seat];
        let overdue = player.hand_len() == 1
            && !player.called_uno
            && player
                .last_card_timestamp
                .is_some_and(|since| now.millis_since(since) > config.uno_call_window_ms);
        if !overdue {
            continue;
        }

        let drawn = draw_to_seat(state, seat, GameConfig::UNO_PENALTY_CARDS, rng);
        let player = &mut state.players[seat];
        player.clear_uno_marker();
        punished.push((player.id.clone(), drawn));
    }

    punished
}
