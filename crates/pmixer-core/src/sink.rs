//! Sink state as reported by the sound server.

use crate::volume::VolumeVector;

/// Snapshot of one sink, taken from a single sink-info record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkSnapshot {
    /// Server-side sink index
    pub index: u32,
    /// Whether the sink is muted
    pub muted: bool,
    /// Per-channel volume
    pub volume: VolumeVector,
}
