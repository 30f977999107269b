//! Room hosting for the UNO rule engine.
//!
//! This crate wires the pure reducer from `uno-core` to the outside world: a
//! wire protocol, a state repository, a transport, and one sequential worker
//! per room. Consumers obtain a [`RoomHandle`] from the [`RoomRegistry`] and
//! feed it connection events.
//!
//! Modules are organized by responsibility:
//! - [`dispatcher`] turns connection events into engine calls and replies
//! - [`protocol`] defines the client and server message types
//! - [`repository`] and [`transport`] are the adapters the dispatcher drives
//! - [`api`] exposes the handle and error types downstream crates use
//! - [`registry`] spawns and tracks room workers
pub mod api;
pub mod clock;
pub mod config;
pub mod dispatcher;
pub mod protocol;
pub mod registry;
pub mod repository;
pub mod transport;

mod workers;

pub use api::{Result, RoomHandle, RuntimeError};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::RuntimeConfig;
pub use dispatcher::Dispatcher;
pub use protocol::{ClientMessage, ProtocolError, ServerMessage};
pub use registry::RoomRegistry;
pub use repository::{FileStateRepository, InMemoryStateRepo, RepositoryError, StateRepository};
pub use transport::{ConnectionHub, Transport};
