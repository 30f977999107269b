//! UNO room server entry point.
mod config;
mod connection;
mod logging;

use std::sync::Arc;

use anyhow::{Context, Result};
use config::ServerConfig;
use tokio::net::TcpListener;
use tracing::{info, warn};
use uno_runtime::{
    FileStateRepository, InMemoryStateRepo, RoomRegistry, StateRepository, SystemClock,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env();
    let _log_guard = logging::init(config.log_dir.as_deref())?;

    let repository = build_repository(&config)?;
    let registry = Arc::new(RoomRegistry::new(
        config.runtime.clone(),
        repository,
        Arc::new(SystemClock),
    ));

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "listening");

    let mut conn_ids = connection::ConnectionIds::random();
    loop {
        tokio::select! {
            accepted = listener.accept() => {
                let (stream, peer) = match accepted {
                    Ok(accepted) => accepted,
                    Err(err) => {
                        warn!(error = %err, "accept failed");
                        continue;
                    }
                };
                let conn = conn_ids.next_id();
                let registry = Arc::clone(&registry);
                tokio::spawn(async move {
                    if let Err(err) = connection::serve(stream, peer, conn, registry).await {
                        warn!(%peer, error = %err, "connection ended with error");
                    }
                });
            }
            _ = tokio::signal::ctrl_c() => {
                info!(rooms = ?registry.active_rooms().await, "shutting down");
                break;
            }
        }
    }

    Ok(())
}

fn build_repository(config: &ServerConfig) -> Result<Arc<dyn StateRepository>> {
    match config.storage_dir() {
        Some(dir) => {
            let repository = FileStateRepository::new(&dir)
                .with_context(|| format!("failed to open data directory {}", dir.display()))?;
            let stored = repository
                .list_rooms()
                .with_context(|| format!("failed to read data directory {}", dir.display()))?;
            info!(dir = %dir.display(), rooms = stored.len(), "persisting rooms to disk");
            Ok(Arc::new(repository))
        }
        None => {
            info!("rooms are kept in memory");
            Ok(Arc::new(InMemoryStateRepo::new()))
        }
    }
}
