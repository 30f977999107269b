//! Turn pointer arithmetic.

use crate::state::GameState;

/// Index of the seat after the current one in the current direction.
///
/// Returns the current index unchanged for an empty roster.
pub fn next_index(state: &GameState) -> usize {
    let players = state.players.len() as isize;
    if players == 0 {
        return state.current_player_index;
    }
    let current = state.current_player_index as isize;
    ((current + state.direction.step() + players) % players) as usize
}

/// Moves the turn pointer `steps` seats in the current direction.
pub fn advance(state: &mut GameState, steps: usize) {
    for _ in 0..steps {
        state.current_player_index = next_index(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Direction, Player, PlayerId};

    fn table(players: usize) -> GameState {
        let mut state = GameState::new();
        for i in 0..players {
            state
                .players
                .push(Player::new(PlayerId::new(format!("p{i}")), format!("P{i}")));
        }
        state
    }

    #[test]
    fn wraps_clockwise() {
        let mut state = table(3);
        state.current_player_index = 2;
        assert_eq!(next_index(&state), 0);
    }

    #[test]
    fn wraps_counter_clockwise() {
        let mut state = table(4);
        state.direction = Direction::CounterClockwise;
        assert_eq!(next_index(&state), 3);
        state.current_player_index = 2;
        assert_eq!(next_index(&state), 1);
    }

    #[test]
    fn advancing_twice_with_two_players_returns_to_self() {
        let mut state = table(2);
        advance(&mut state, 2);
        assert_eq!(state.current_player_index, 0);
        advance(&mut state, 1);
        assert_eq!(state.current_player_index, 1);
    }

    #[test]
    fn empty_roster_is_stable() {
        let state = table(0);
        assert_eq!(next_index(&state), 0);
    }
}
