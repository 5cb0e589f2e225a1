//! pmixer PulseAudio - Synchronous bridge over the asynchronous client API.
//!
//! This crate handles all interactions with the sound server, including:
//! - Connecting and waiting for the context to become ready
//! - Turning each callback-based request into a blocking call
//! - Resolving the default sink and changing its volume or mute state

pub mod backend;
pub mod error;
pub mod mutation;
pub mod pulse;
pub mod query;
pub mod runner;
pub mod session;

#[cfg(test)]
mod fake;

pub use backend::{AudioServer, ListEntry, OperationState, PendingOperation, ServerInfo};
pub use error::{PulseError, PulseResult};
pub use pulse::PulseServer;
pub use runner::{Outcome, execute};
pub use session::Session;
