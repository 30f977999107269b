//! Departures: explicit disconnects and reconciliation against the set of
//! live connections.

use crate::deck::shuffle;
use crate::state::{GameState, PlayerId};

use super::{GameEngine, TurnContext};

impl GameEngine<'_> {
    /// Removes `player` from the room.
    ///
    /// Returns false if no such player was seated. During a game the
    /// departing hand is shuffled back into the deck so the table keeps all
    /// of its cards. The turn pointer keeps pointing at the same player when
    /// someone before them leaves. A game reduced to one player ends.
    pub fn disconnect(&mut self, player: &PlayerId, ctx: &mut TurnContext<'_>) -> bool {
        let Some(seat) = self.state.player_index(player) else {
            return false;
        };

        let was_started = self.state.started;
        let departed = self.state.players.remove(seat);

        if self
            .state
            .pending_decision
            .as_ref()
            .is_some_and(|pending| &pending.player_id == player)
        {
            self.state.pending_decision = None;
        }

        if self.state.players.is_empty() {
            *self.state = GameState::new();
            return true;
        }

        if was_started && !departed.hand.is_empty() {
            let mut deck = std::mem::take(&mut self.state.deck);
            deck.extend(departed.hand);
            self.state.deck = shuffle(deck, &mut *ctx.rng);
        }

        if seat < self.state.current_player_index {
            self.state.current_player_index -= 1;
        }
        if self.state.current_player_index >= self.state.players.len() {
            self.state.current_player_index = 0;
        }

        if was_started && self.state.players.len() == 1 {
            self.state.reset_table();
            self.state.clear_ready();
        }

        true
    }

    /// Removes every seated player whose id is not in `live`.
    ///
    /// Returns the removed ids in seat order.
    pub fn reconcile(&mut self, live: &[PlayerId], ctx: &mut TurnContext<'_>) -> Vec<PlayerId> {
        let stale: Vec<PlayerId> = self
            .state
            .players
            .iter()
            .filter(|p| !live.contains(&p.id))
            .map(|p| p.id.clone())
            .collect();

        for id in &stale {
            self.disconnect(id, ctx);
        }
        stale
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::Table;
    use super::*;
    use crate::command::Command;

    fn disconnect(table: &mut Table, id: &str) -> bool {
        let mut ctx = TurnContext::new(&table.config, table.now, &mut table.rng);
        GameEngine::new(&mut table.state).disconnect(&PlayerId::from(id), &mut ctx)
    }

    fn reconcile(table: &mut Table, live: &[&str]) -> Vec<PlayerId> {
        let live: Vec<PlayerId> = live.iter().map(|id| PlayerId::from(*id)).collect();
        let mut ctx = TurnContext::new(&table.config, table.now, &mut table.rng);
        GameEngine::new(&mut table.state).reconcile(&live, &mut ctx)
    }

    #[test]
    fn unknown_player_is_a_no_op() {
        let mut table = Table::started(&["a", "b"]);
        let before = table.state.clone();
        assert!(!disconnect(&mut table, "zz"));
        assert_eq!(table.state, before);
    }

    #[test]
    fn last_player_leaving_resets_room() {
        let mut table = Table::new();
        table.seat(&["a"]);
        assert!(disconnect(&mut table, "a"));
        assert_eq!(table.state, GameState::new());
    }

    #[test]
    fn earlier_seat_leaving_keeps_current_player() {
        let mut table = Table::started(&["a", "b", "c"]);
        table.rig(&[&["red-5-1", "blue-1-1"], &["green-2-1"], &["red-2-1"]], "red-3-1");
        table.play("a", "red-5-1").unwrap();
        assert_eq!(table.current(), "b");

        disconnect(&mut table, "a");

        assert_eq!(table.current(), "b");
        assert!(table.state.started);
        assert!(table.state.check_invariants().is_ok());
    }

    #[test]
    fn departing_hand_returns_to_deck() {
        let mut table = Table::started(&["a", "b", "c"]);
        let deck_before = table.state.deck.len();

        disconnect(&mut table, "c");

        assert_eq!(table.state.deck.len(), deck_before + 7);
        assert_eq!(table.state.cards_in_play(), 108);
        assert!(table.state.check_invariants().is_ok());
    }

    #[test]
    fn last_seat_leaving_wraps_pointer() {
        let mut table = Table::started(&["a", "b", "c"]);
        table.state.current_player_index = 2;

        disconnect(&mut table, "c");

        assert_eq!(table.current(), "a");
    }

    #[test]
    fn heads_up_departure_ends_game() {
        let mut table = Table::started(&["a", "b"]);

        disconnect(&mut table, "a");

        let state = &table.state;
        assert!(!state.started);
        assert_eq!(state.players.len(), 1);
        assert!(!state.players[0].ready);
        assert_eq!(state.cards_in_play(), 0);
        assert!(state.is_host(&PlayerId::from("b")));
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn host_departure_promotes_next_seat() {
        let mut table = Table::new();
        table.seat(&["a", "b", "c"]);
        disconnect(&mut table, "a");
        assert!(table.state.is_host(&PlayerId::from("b")));
        assert!(table.run("b", Command::Ready).is_ok());
    }

    #[test]
    fn pending_decision_cleared_with_its_player() {
        let mut table = Table::started(&["a", "b", "c"]);
        table.state.pending_decision = Some(crate::state::PendingDecision {
            player_id: PlayerId::from("a"),
            card_id: table.state.players[0].hand[0].id.clone(),
        });

        disconnect(&mut table, "a");

        assert!(table.state.pending_decision.is_none());
    }

    #[test]
    fn reconcile_drops_stale_players() {
        let mut table = Table::new();
        table.seat(&["a", "b", "c"]);

        let removed = reconcile(&mut table, &["b"]);

        assert_eq!(removed, vec![PlayerId::from("a"), PlayerId::from("c")]);
        assert_eq!(table.state.players.len(), 1);
        assert!(table.state.is_host(&PlayerId::from("b")));
    }
}
