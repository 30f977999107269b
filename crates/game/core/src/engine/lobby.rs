//! Seating, readiness, and the host's game lifecycle controls.

use rand::RngCore;

use crate::config::GameConfig;
use crate::deck::{generate_deck, shuffle};
use crate::state::{Direction, Player, PlayerId};

use super::{CommandError, GameEngine, HostAction, TurnContext};

impl GameEngine<'_> {
    pub(super) fn join(&mut self, actor: &PlayerId, name: &str) -> Result<(), CommandError> {
        if self.state.started {
            return Err(CommandError::GameAlreadyStarted);
        }
        if self.state.is_full() {
            return Err(CommandError::RoomFull {
                max: GameConfig::MAX_PLAYERS,
            });
        }
        if self.state.player(actor).is_some() {
            return Err(CommandError::AlreadyJoined);
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(CommandError::EmptyName);
        }
        if self.state.player_by_name(name).is_some() {
            return Err(CommandError::NameTaken {
                name: name.to_owned(),
            });
        }

        self.state.players.push(Player::new(actor.clone(), name));
        Ok(())
    }

    pub(super) fn ready(&mut self, actor: &PlayerId) -> Result<(), CommandError> {
        self.ensure_capacity("ready up")?;
        let player = self
            .state
            .player_mut(actor)
            .ok_or(CommandError::PlayerNotFound)?;
        player.ready = true;
        Ok(())
    }

    pub(super) fn start_game(
        &mut self,
        actor: &PlayerId,
        ctx: &mut TurnContext<'_>,
    ) -> Result<(), CommandError> {
        if self.state.started {
            return Err(CommandError::GameAlreadyStarted);
        }
        self.ensure_host(actor, HostAction::Start)?;
        if self.state.players.len() < GameConfig::MIN_PLAYERS {
            return Err(CommandError::NotEnoughPlayers {
                min: GameConfig::MIN_PLAYERS,
            });
        }
        self.ensure_capacity("start game")?;
        if !self.state.all_ready() {
            return Err(CommandError::PlayersNotReady);
        }

        self.state.reset_table();
        self.state.deck = generate_deck(&mut *ctx.rng);

        for _ in 0..GameConfig::INITIAL_HAND_SIZE {
            for player in &mut self.state.players {
                if let Some(card) = self.state.deck.pop() {
                    player.receive(card);
                }
            }
        }

        self.flip_opening_card(&mut *ctx.rng);

        self.state.started = true;
        self.state.current_player_index = 0;
        self.state.direction = Direction::Clockwise;
        self.state.last_action_timestamp = Some(ctx.now);
        self.sync_uno_markers(ctx.now);
        Ok(())
    }

    /// Turns the top of the deck onto the empty discard pile.
    ///
    /// A wild may not open the pile: it is put back and the deck reshuffled
    /// until a colored card turns up.
    fn flip_opening_card(&mut self, rng: &mut dyn RngCore) {
        while let Some(card) = self.state.deck.pop() {
            if card.is_wild() {
                self.state.deck.insert(0, card);
                let deck = std::mem::take(&mut self.state.deck);
                self.state.deck = shuffle(deck, rng);
                continue;
            }
            self.state.discard_pile.push(card);
            break;
        }
    }

    pub(super) fn end_game(&mut self, actor: &PlayerId) -> Result<(), CommandError> {
        self.ensure_host(actor, HostAction::End)?;
        self.state.reset_table();
        self.state.clear_ready();
        Ok(())
    }

    pub(super) fn restart_game(&mut self, actor: &PlayerId) -> Result<(), CommandError> {
        self.ensure_host(actor, HostAction::Restart)?;
        if self.state.players.len() < GameConfig::MIN_PLAYERS {
            return Err(CommandError::NotEnoughPlayersToRestart {
                min: GameConfig::MIN_PLAYERS,
            });
        }
        self.state.reset_table();
        self.state.clear_ready();
        Ok(())
    }

    fn ensure_host(&self, actor: &PlayerId, action: HostAction) -> Result<(), CommandError> {
        if self.state.is_host(actor) {
            Ok(())
        } else {
            Err(CommandError::NotHost { action })
        }
    }

    /// A room with every seat taken can neither ready up nor start.
    fn ensure_capacity(&self, action: &'static str) -> Result<(), CommandError> {
        if self.state.is_full() {
            return Err(CommandError::OverCapacity { action });
        }
        Ok(())
    }
}
