//! Commands and the sink mutations they produce.
//!
//! A command is turned into exactly one mutation request by looking at the
//! current sink snapshot.

use std::fmt;

use crate::sink::SinkSnapshot;
use crate::volume::{VolumeStep, VolumeVector};

/// A single adjustment requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Raise the volume one step
    Inc,
    /// Lower the volume one step
    Dec,
    /// Toggle mute
    Mute,
}

/// A request to change sink state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Set every channel volume of a sink
    SetVolume { index: u32, volume: VolumeVector },
    /// Set the mute flag of a sink
    SetMute { index: u32, muted: bool },
}

impl Command {
    /// Derive the mutation this command applies to `sink`.
    #[must_use]
    pub fn mutation(self, sink: &SinkSnapshot, step: &VolumeStep) -> Mutation {
        match self {
            Self::Inc => Mutation::SetVolume {
                index: sink.index,
                volume: sink.volume.increment_clamped(step.step, step.ceiling),
            },
            Self::Dec => Mutation::SetVolume {
                index: sink.index,
                volume: sink.volume.decrement(step.step),
            },
            Self::Mute => Mutation::SetMute { index: sink.index, muted: !sink.muted },
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = match self {
            Self::Inc => "inc",
            Self::Dec => "dec",
            Self::Mute => "mute",
        };
        f.write_str(word)
    }
}
