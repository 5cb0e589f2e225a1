//! One full command run against a sound server.

use pmixer_core::{Command, Mutation, SinkSnapshot, VolumeStep};
use tracing::info;

use crate::backend::AudioServer;
use crate::error::PulseResult;
use crate::session::Session;

/// What a successful run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Default sink as found before the change
    pub sink: SinkSnapshot,
    /// Request sent to the server
    pub mutation: Mutation,
}

/// Connect, resolve the default sink, apply `command` and disconnect.
///
/// The session is dropped before returning on every path, which disconnects
/// if the connection was established and releases the server.
///
/// Failures are returned, not logged; the caller reports them once.
///
/// # Errors
/// Returns the first failure: connecting, resolving the default sink, or
/// the event loop failing while a request is outstanding.
pub fn execute<S: AudioServer>(
    server: S,
    command: Command,
    step: &VolumeStep,
) -> PulseResult<Outcome> {
    let mut session = Session::connect(server)?;

    let sink = session.default_sink()?;
    info!("got sink {}, volume {}", sink.index, sink.volume.average());

    let mutation = command.mutation(&sink, step);
    session.apply(&mutation)?;

    Ok(Outcome { sink, mutation })
}
