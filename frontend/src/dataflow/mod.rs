//! Event plumbing between DOM listeners and controller loops.
//!
//! - **[`Relay`]** carries events out of listener closures
//! - **[`Actor`]** owns a value that a single loop mutates
//!
//! Relays follow the `{source}_{event}_relay` naming pattern.

pub mod actor;
pub mod relay;

pub use actor::Actor;
pub use relay::{Relay, RelayError, relay};
