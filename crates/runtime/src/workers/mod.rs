//! Worker tasks that back the runtime.
//!
//! One room worker per room key serializes that room's events.

mod room;

pub use room::{RoomCommand, RoomWorker};
