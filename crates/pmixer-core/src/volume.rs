//! Per-channel volume vectors and the fixed volume step.

use crate::error::{Error, Result};

/// Silence.
pub const VOLUME_MUTED: u32 = 0;

/// Nominal 100% volume in raw sound server units.
pub const VOLUME_NORM: u32 = 0x10000;

/// Number of steps between silence and nominal volume.
pub const DEFAULT_STEPS: u32 = 20;

/// Volume levels for each channel of a sink.
///
/// The channel count is taken from the server's response and never changes;
/// all operations return a new vector of the same length.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VolumeVector {
    levels: Vec<u32>,
}

impl VolumeVector {
    /// Create a vector from raw per-channel levels.
    #[must_use]
    pub fn new(levels: Vec<u32>) -> Self {
        Self { levels }
    }

    /// Create a vector with every channel at the same level.
    #[must_use]
    pub fn uniform(channels: usize, level: u32) -> Self {
        Self { levels: vec![level; channels] }
    }

    /// Number of channels.
    #[must_use]
    pub fn channels(&self) -> usize {
        self.levels.len()
    }

    /// Raw per-channel levels.
    #[must_use]
    pub fn levels(&self) -> &[u32] {
        &self.levels
    }

    /// Arithmetic mean of all channels, 0 for an empty vector.
    #[must_use]
    pub fn average(&self) -> u32 {
        if self.levels.is_empty() {
            return VOLUME_MUTED;
        }

        let sum: u64 = self.levels.iter().map(|&l| u64::from(l)).sum();
        // The mean of u32 values always fits in u32.
        u32::try_from(sum / self.levels.len() as u64).unwrap_or(u32::MAX)
    }

    /// Loudest channel, silence for an empty vector.
    #[must_use]
    pub fn max(&self) -> u32 {
        self.levels.iter().copied().max().unwrap_or(VOLUME_MUTED)
    }

    /// Scale all channels so the loudest one ends up at `target`, keeping
    /// the balance between channels. A silent vector is set to `target`
    /// on every channel.
    #[must_use]
    pub fn scale_to(&self, target: u32) -> Self {
        let current = self.max();
        if current == VOLUME_MUTED {
            return Self::uniform(self.channels(), target);
        }

        let levels = self
            .levels
            .iter()
            .map(|&level| {
                let scaled = u64::from(level) * u64::from(target) / u64::from(current);
                u32::try_from(scaled).unwrap_or(u32::MAX)
            })
            .collect();
        Self { levels }
    }

    /// Raise the loudest channel by `step`, clamping at `ceiling`, and scale
    /// the others along with it.
    ///
    /// Never lowers the volume, so a vector already above `ceiling` is kept.
    #[must_use]
    pub fn increment_clamped(&self, step: u32, ceiling: u32) -> Self {
        let current = self.max();
        let target = current.max(current.saturating_add(step).min(ceiling));
        self.scale_to(target)
    }

    /// Lower the loudest channel by `step`, stopping at silence, and scale
    /// the others along with it.
    #[must_use]
    pub fn decrement(&self, step: u32) -> Self {
        self.scale_to(self.max().saturating_sub(step))
    }
}

/// Step size and upper bound used by the `inc`/`dec` commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VolumeStep {
    /// Amount added or removed per invocation
    pub step: u32,
    /// Highest level `inc` will reach
    pub ceiling: u32,
}

impl VolumeStep {
    /// Split nominal volume into `steps` equal increments.
    ///
    /// # Errors
    /// Returns [`Error::InvalidStepCount`] when `steps` is zero.
    pub fn from_steps(steps: u32, ceiling: u32) -> Result<Self> {
        if steps == 0 {
            return Err(Error::InvalidStepCount(steps));
        }
        Ok(Self { step: VOLUME_NORM / steps, ceiling })
    }
}

impl Default for VolumeStep {
    fn default() -> Self {
        Self { step: VOLUME_NORM / DEFAULT_STEPS, ceiling: VOLUME_NORM }
    }
}
