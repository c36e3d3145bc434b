//! Hosts a [`mineswept_core::Game`] on a tokio task.
//!
//! The task is the single writer of the session: player actions arrive over a channel and timer
//! ticks come from an interval polled in the same loop, so every transition is applied in one
//! total order. Readers get owned snapshots through [`EngineHandle::snapshot`] or a watch
//! subscription.

pub use config::*;
pub use countdown::*;
pub use engine::*;
pub use error::*;

mod config;
mod countdown;
mod engine;
mod error;
