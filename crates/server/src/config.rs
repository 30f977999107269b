//! Server configuration structures and loaders.
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

use uno_core::GameConfig;
use uno_runtime::RuntimeConfig;

/// Configuration required to bootstrap the server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Explicit directory for room state files.
    pub data_dir: Option<PathBuf>,
    /// Persist rooms under the platform data directory when no explicit
    /// directory is given.
    pub enable_persistence: bool,
    /// Directory for the rolling log file. Logs go to stderr only when unset.
    pub log_dir: Option<PathBuf>,
    pub runtime: RuntimeConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 4000)),
            data_dir: None,
            enable_persistence: false,
            log_dir: None,
            runtime: RuntimeConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `UNO_BIND_ADDR` - Listen address (default: 127.0.0.1:4000)
    /// - `UNO_DATA_DIR` - Directory for room state files (default: in-memory rooms)
    /// - `UNO_PERSISTENCE` - Persist rooms under the platform data directory (default: false)
    /// - `UNO_LOG_DIR` - Also write logs to a daily file in this directory
    /// - `UNO_CALL_WINDOW_MS` - Grace period for calling UNO (default: 10000)
    /// - `UNO_COMMAND_BUFFER` - Per-room command queue size (default: 32)
    /// - `UNO_RNG_SEED` - Fixed shuffle seed, for local debugging
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(addr) = read_env::<SocketAddr>(&lookup, "UNO_BIND_ADDR") {
            config.bind_addr = addr;
        }

        config.data_dir = lookup("UNO_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        if let Some(enable) = read_env::<bool>(&lookup, "UNO_PERSISTENCE") {
            config.enable_persistence = enable;
        } else if lookup("UNO_PERSISTENCE").is_some() {
            // Also accept just setting the variable without value as "true"
            config.enable_persistence = true;
        }

        config.log_dir = lookup("UNO_LOG_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        if let Some(window) = read_env::<u64>(&lookup, "UNO_CALL_WINDOW_MS") {
            config.runtime.game_config = GameConfig::with_uno_call_window_ms(window);
        }
        if let Some(capacity) = read_env::<usize>(&lookup, "UNO_COMMAND_BUFFER") {
            config.runtime.command_buffer_size = capacity.max(1);
        }
        config.runtime.rng_seed = read_env::<u64>(&lookup, "UNO_RNG_SEED");

        config
    }

    /// Directory room state is persisted to, if persistence is enabled.
    pub fn storage_dir(&self) -> Option<PathBuf> {
        self.data_dir
            .clone()
            .or_else(|| self.enable_persistence.then(default_data_dir))
    }
}

/// Platform data directory, e.g. `~/.local/share/uno` on Linux.
fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "uno")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./save_data"))
}

fn read_env<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}
