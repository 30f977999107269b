//! Turn actions: playing, drawing, the keep-or-play decision, and UNO calls.

use crate::card::{CardId, Color};
use crate::rules::{advance, apply_effect, draw_one, is_playable, sweep_uno_penalties};
use crate::state::{PendingDecision, PlayerId};

use super::{CommandError, ExecutionOutcome, GameEngine, Notice, TurnContext};

impl GameEngine<'_> {
    /// Plays a card from the actor's hand.
    ///
    /// `from_draw` restricts the play to the card awaiting a keep-or-play
    /// decision; otherwise a pending decision blocks the play.
    pub(super) fn play_card(
        &mut self,
        actor: &PlayerId,
        card_id: &CardId,
        chosen_color: Option<Color>,
        from_draw: bool,
        ctx: &mut TurnContext<'_>,
        outcome: &mut ExecutionOutcome,
    ) -> Result<(), CommandError> {
        let seat = self.require_turn(actor)?;
        self.check_pending(actor, card_id, from_draw)?;

        let player = &self.state.players[seat];
        let index = player
            .find_card(card_id)
            .ok_or(CommandError::CardNotInHand)?;
        let card = &player.hand[index];
        if let Some(top) = self.state.top_card() {
            if !is_playable(card, top, &player.hand) {
                return Err(CommandError::IllegalPlay);
            }
        }
        let color = if card.is_wild() {
            match chosen_color {
                None => return Err(CommandError::ColorRequired),
                Some(color) if color.is_wild() => return Err(CommandError::InvalidColorChoice),
                Some(color) => Some(color),
            }
        } else {
            None
        };

        // Validated; from here on the play cannot fail.
        self.state.pending_decision = None;
        let mut card = self.state.players[seat].take_card(index);
        if let Some(color) = color {
            card.color = color;
        }
        self.state.discard_pile.push(card.clone());

        let effect = apply_effect(&card, self.state, &mut *ctx.rng);
        if let Some((target, drawn)) = effect.forced_draw {
            outcome.push(Notice::ForcedDraw {
                player: self.state.players[target].id.clone(),
                drawn,
            });
        }

        self.sync_uno_markers(ctx.now);

        if self.state.players[seat].has_empty_hand() {
            self.state.started = false;
            outcome.push(Notice::Won {
                player: actor.clone(),
            });
        }

        for (player, drawn) in sweep_uno_penalties(self.state, ctx.config, ctx.now, &mut *ctx.rng)
        {
            outcome.push(Notice::Penalized { player, drawn });
        }

        if self.state.started && !effect.turn_advanced {
            advance(self.state, 1);
        }
        self.state.last_action_timestamp = Some(ctx.now);
        Ok(())
    }

    /// Draws one card. A playable draw leaves the turn with the drawer and
    /// opens a keep-or-play decision; anything else passes the turn.
    pub(super) fn draw_card(
        &mut self,
        actor: &PlayerId,
        ctx: &mut TurnContext<'_>,
        outcome: &mut ExecutionOutcome,
    ) -> Result<(), CommandError> {
        let seat = self.require_turn(actor)?;
        if self.state.pending_decision.is_some() {
            return Err(CommandError::DecisionPending);
        }

        match draw_one(self.state, &mut *ctx.rng) {
            Some(card) => {
                let playable = {
                    let hand = &self.state.players[seat].hand;
                    self.state
                        .top_card()
                        .is_none_or(|top| is_playable(&card, top, hand))
                };
                self.state.players[seat].receive(card.clone());
                if playable {
                    self.state.pending_decision = Some(PendingDecision {
                        player_id: actor.clone(),
                        card_id: card.id.clone(),
                    });
                    outcome.push(Notice::DrawnCard {
                        player: actor.clone(),
                        card,
                    });
                } else {
                    advance(self.state, 1);
                }
            }
            // Both piles are exhausted: nothing to take, the turn passes.
            None => advance(self.state, 1),
        }

        self.sync_uno_markers(ctx.now);
        Ok(())
    }

    pub(super) fn keep_drawn_card(&mut self, actor: &PlayerId) -> Result<(), CommandError> {
        self.require_turn(actor)?;
        let awaiting = self
            .state
            .pending_decision
            .as_ref()
            .is_some_and(|pending| &pending.player_id == actor);
        if !awaiting {
            return Err(CommandError::NoPendingDecision);
        }

        self.state.pending_decision = None;
        advance(self.state, 1);
        Ok(())
    }

    pub(super) fn call_uno(&mut self, actor: &PlayerId) -> Result<(), CommandError> {
        let player = self
            .state
            .player_mut(actor)
            .ok_or(CommandError::PlayerNotFound)?;
        if player.hand_len() != 1 {
            return Err(CommandError::UnoRequiresOneCard);
        }
        player.called_uno = true;
        Ok(())
    }

    fn check_pending(
        &self,
        actor: &PlayerId,
        card_id: &CardId,
        from_draw: bool,
    ) -> Result<(), CommandError> {
        let pending = self
            .state
            .pending_decision
            .as_ref()
            .filter(|pending| &pending.player_id == actor);

        match (pending, from_draw) {
            (None, false) => Ok(()),
            (Some(_), false) => Err(CommandError::DecisionPending),
            (None, true) => Err(CommandError::NoPendingDecision),
            (Some(pending), true) if &pending.card_id == card_id => Ok(()),
            (Some(_), true) => Err(CommandError::NotDrawnCard),
        }
    }
}
