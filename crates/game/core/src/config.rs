/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Grace period after reaching one card before a missed UNO call is punished.
    pub uno_call_window_ms: u64,
}

impl GameConfig {
    // ===== compile-time constants =====
    /// Maximum number of players seated in one room.
    pub const MAX_PLAYERS: usize = 5;
    /// Minimum number of players required to start (and restart) a game.
    pub const MIN_PLAYERS: usize = 2;
    /// Cards dealt to every player when a game starts.
    pub const INITIAL_HAND_SIZE: usize = 7;
    /// Total number of unique card instances in one deck.
    pub const DECK_SIZE: usize = 108;
    /// Cards drawn as punishment for a missed UNO call.
    pub const UNO_PENALTY_CARDS: usize = 2;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_UNO_CALL_WINDOW_MS: u64 = 10_000;

    pub fn new() -> Self {
        Self {
            uno_call_window_ms: Self::DEFAULT_UNO_CALL_WINDOW_MS,
        }
    }

    pub fn with_uno_call_window_ms(uno_call_window_ms: u64) -> Self {
        Self { uno_call_window_ms }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
