//! pmixer Core - Volume arithmetic, sink snapshots and connection state.
//!
//! This crate contains the domain types shared between the PulseAudio bridge
//! and the command-line front end. Nothing here talks to the sound server.

pub mod command;
pub mod error;
pub mod sink;
pub mod state;
pub mod volume;

pub use command::{Command, Mutation};
pub use error::{Error, Result};
pub use sink::SinkSnapshot;
pub use state::{ConnectionState, ServerState};
pub use volume::{VOLUME_MUTED, VOLUME_NORM, VolumeStep, VolumeVector};
