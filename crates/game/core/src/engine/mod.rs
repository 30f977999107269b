//! Command execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Every
//! mutation of a room (lobby management, plays, draws, disconnects) flows
//! through it. Each command is validated completely before the first write,
//! so a rejected command leaves the state exactly as it was.
//!
//! Randomness and time are injected through [`TurnContext`]; the engine never
//! reads a clock or an entropy source on its own.

mod errors;
mod lobby;
mod play;
mod roster;

pub use errors::{CommandError, HostAction};

use rand::RngCore;

use crate::card::Card;
use crate::command::Command;
use crate::config::GameConfig;
use crate::state::{GameState, PlayerId, Timestamp};

/// Per-command environment supplied by the caller.
pub struct TurnContext<'a> {
    pub config: &'a GameConfig,
    /// Instant the command is processed at.
    pub now: Timestamp,
    pub rng: &'a mut dyn RngCore,
}

impl<'a> TurnContext<'a> {
    pub fn new(config: &'a GameConfig, now: Timestamp, rng: &'a mut dyn RngCore) -> Self {
        Self { config, now, rng }
    }
}

/// Something that happened during a command that the full state broadcast
/// does not convey on its own.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "kind", rename_all = "snake_case")
)]
pub enum Notice {
    /// A draw produced a playable card; only the drawer should be told.
    DrawnCard { player: PlayerId, card: Card },
    /// A draw card forced the next player to pick up.
    ForcedDraw { player: PlayerId, drawn: usize },
    /// A missed UNO call was punished.
    Penalized { player: PlayerId, drawn: usize },
    /// A player emptied their hand and the game ended.
    Won { player: PlayerId },
}

/// Complete outcome of an accepted command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome {
    pub notices: Vec<Notice>,
}

impl ExecutionOutcome {
    fn push(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    /// The playable card drawn by `player`, if this command produced one.
    pub fn drawn_card_for(&self, player: &PlayerId) -> Option<&Card> {
        self.notices.iter().find_map(|notice| match notice {
            Notice::DrawnCard { player: p, card } if p == player => Some(card),
            _ => None,
        })
    }

    pub fn winner(&self) -> Option<&PlayerId> {
        self.notices.iter().find_map(|notice| match notice {
            Notice::Won { player } => Some(player),
            _ => None,
        })
    }
}

/// Game engine that validates commands and applies them to a room.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Executes `command` on behalf of `actor`.
    ///
    /// On error the state is untouched.
    pub fn execute(
        &mut self,
        actor: &PlayerId,
        command: &Command,
        ctx: &mut TurnContext<'_>,
    ) -> Result<ExecutionOutcome, CommandError> {
        let mut outcome = ExecutionOutcome::default();

        match command {
            Command::Join { name } => self.join(actor, name)?,
            Command::Ready => self.ready(actor)?,
            Command::StartGame => self.start_game(actor, ctx)?,
            Command::EndGame => self.end_game(actor)?,
            Command::RestartGame => self.restart_game(actor)?,
            Command::PlayCard {
                card_id,
                chosen_color,
            } => self.play_card(actor, card_id, *chosen_color, false, ctx, &mut outcome)?,
            Command::PlayDrawnCard {
                card_id,
                chosen_color,
            } => self.play_card(actor, card_id, *chosen_color, true, ctx, &mut outcome)?,
            Command::DrawCard => self.draw_card(actor, ctx, &mut outcome)?,
            Command::KeepDrawnCard => self.keep_drawn_card(actor)?,
            Command::CallUno => self.call_uno(actor)?,
        }

        Ok(outcome)
    }

    /// Brings every player's one-card marker in line with their hand.
    fn sync_uno_markers(&mut self, now: Timestamp) {
        for player in &mut self.state.players {
            player.sync_uno_marker(now);
        }
    }

    /// Resolves the seat of a player who is about to act on the turn.
    fn require_turn(&self, actor: &PlayerId) -> Result<usize, CommandError> {
        if !self.state.started {
            return Err(CommandError::GameNotStarted);
        }
        let seat = self
            .state
            .player_index(actor)
            .ok_or(CommandError::PlayerNotFound)?;
        if seat != self.state.current_player_index {
            return Err(CommandError::NotYourTurn);
        }
        Ok(seat)
    }
}

/// Pure form of [`GameEngine::execute`]: returns the next state instead of
/// mutating the given one.
pub fn reduce(
    state: &GameState,
    actor: &PlayerId,
    command: &Command,
    ctx: &mut TurnContext<'_>,
) -> Result<(GameState, ExecutionOutcome), CommandError> {
    let mut next = state.clone();
    let outcome = GameEngine::new(&mut next).execute(actor, command, ctx)?;
    Ok((next, outcome))
}

#[cfg(test)]
pub(crate) mod test_support {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::card::{CardId, Color, Value};

    pub struct Table {
        pub state: GameState,
        pub config: GameConfig,
        pub rng: StdRng,
        pub now: Timestamp,
    }

    impl Table {
        pub fn new() -> Self {
            Self {
                state: GameState::new(),
                config: GameConfig::default(),
                rng: StdRng::seed_from_u64(7),
                now: Timestamp(1_000),
            }
        }

        pub fn run(&mut self, actor: &str, command: Command) -> Result<ExecutionOutcome, CommandError> {
            let mut ctx = TurnContext::new(&self.config, self.now, &mut self.rng);
            GameEngine::new(&mut self.state).execute(&PlayerId::from(actor), &command, &mut ctx)
        }

        pub fn seat(&mut self, ids: &[&str]) {
            for id in ids {
                self.run(
                    id,
                    Command::Join {
                        name: id.to_uppercase(),
                    },
                )
                .unwrap();
            }
        }

        /// Seats the players, readies everyone, and starts the game.
        pub fn started(ids: &[&str]) -> Self {
            let mut table = Self::new();
            table.seat(ids);
            for id in ids {
                table.run(id, Command::Ready).unwrap();
            }
            table.run(ids[0], Command::StartGame).unwrap();
            table
        }

        /// Replaces hands, top card, and deck with a fixed layout while
        /// keeping all 108 cards on the table.
        pub fn rig(&mut self, hands: &[&[&str]], top: &str) {
            let mut pool: Vec<Card> = crate::deck::standard_deck();
            let mut take = |id: &str| -> Card {
                let index = pool
                    .iter()
                    .position(|c| c.id.as_str() == id)
                    .unwrap_or_else(|| panic!("no card {id}"));
                pool.remove(index)
            };

            let dealt: Vec<Vec<Card>> = hands
                .iter()
                .map(|ids| ids.iter().map(|id| take(*id)).collect())
                .collect();
            let top = take(top);

            for (player, hand) in self.state.players.iter_mut().zip(dealt) {
                player.hand = hand;
                player.clear_uno_marker();
            }
            self.state.discard_pile = vec![top];
            self.state.deck = pool;
            self.state.pending_decision = None;
        }

        pub fn play(&mut self, actor: &str, card: &str) -> Result<ExecutionOutcome, CommandError> {
            self.run(
                actor,
                Command::PlayCard {
                    card_id: CardId::from(card),
                    chosen_color: None,
                },
            )
        }

        pub fn play_wild(
            &mut self,
            actor: &str,
            card: &str,
            color: Color,
        ) -> Result<ExecutionOutcome, CommandError> {
            self.run(
                actor,
                Command::PlayCard {
                    card_id: CardId::from(card),
                    chosen_color: Some(color),
                },
            )
        }

        pub fn hand_len(&self, id: &str) -> usize {
            self.state
                .player(&PlayerId::from(id))
                .map_or(0, |p| p.hand_len())
        }

        pub fn current(&self) -> &str {
            self.state
                .current_player()
                .map_or("", |p| p.id.as_str())
        }

        pub fn top(&self) -> (Color, Value) {
            let top = self.state.top_card().unwrap();
            (top.color, top.value)
        }
    }
}
