//! Volume and mute requests.
//!
//! The server's success flag is logged but not checked: a wait only confirms
//! that the request finished running.

use pmixer_core::{Mutation, VolumeVector};
use tracing::{debug, warn};

use crate::backend::AudioServer;
use crate::error::PulseResult;
use crate::session::Session;

fn report(request: &'static str) -> Box<dyn FnMut(bool)> {
    Box::new(move |success| {
        if success {
            debug!(request, "Server accepted request");
        } else {
            warn!(request, "Server rejected request");
        }
    })
}

impl<S: AudioServer> Session<S> {
    /// Set every channel volume of the sink at `index`.
    ///
    /// # Errors
    /// Returns an error if the event loop fails while waiting.
    pub fn set_volume(&mut self, index: u32, volume: &VolumeVector) -> PulseResult<()> {
        debug!(index, volume = volume.average(), "Setting sink volume");
        let op = self.server_mut().set_sink_volume(index, volume, report("set_sink_volume"));
        self.wait(op)
    }

    /// Set the mute flag of the sink at `index`.
    ///
    /// # Errors
    /// Returns an error if the event loop fails while waiting.
    pub fn set_mute(&mut self, index: u32, muted: bool) -> PulseResult<()> {
        debug!(index, muted, "Setting sink mute");
        let op = self.server_mut().set_sink_mute(index, muted, report("set_sink_mute"));
        self.wait(op)
    }

    /// Issue the request described by `mutation`.
    ///
    /// # Errors
    /// Returns an error if the event loop fails while waiting.
    pub fn apply(&mut self, mutation: &Mutation) -> PulseResult<()> {
        match mutation {
            Mutation::SetVolume { index, volume } => self.set_volume(*index, volume),
            Mutation::SetMute { index, muted } => self.set_mute(*index, *muted),
        }
    }
}
