//! Legality, effects, drawing, and turn arithmetic.
//!
//! These are free functions over [`GameState`](crate::state::GameState) that
//! the engine composes. None of them validate who is acting; that is the
//! engine's job.

pub mod draw;
pub mod effects;
pub mod legality;
pub mod penalty;
pub mod turn;

pub use draw::{draw_one, draw_to_seat, replenish_deck};
pub use effects::{EffectOutcome, apply_effect};
pub use legality::is_playable;
pub use penalty::sweep_uno_penalties;
pub use turn::{advance, next_index};
