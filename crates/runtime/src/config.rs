//! Runtime tuning knobs.

use uno_core::GameConfig;

/// Configuration shared by every room the runtime hosts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    /// Capacity of each room's command queue.
    pub command_buffer_size: usize,
    /// Fixed shuffle seed. Every room started with the same seed deals the
    /// same cards, so this is for local debugging only.
    pub rng_seed: Option<u64>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            command_buffer_size: 32,
            rng_seed: None,
        }
    }
}
