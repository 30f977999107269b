//! Repository layer for room state.
//!
//! Every room is one [`GameState`](uno_core::GameState) snapshot stored under
//! its room key. The dispatcher is the only caller.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileStateRepository;
pub use memory::InMemoryStateRepo;
pub use traits::StateRepository;
