//! PulseAudio error types.

use thiserror::Error;

/// PulseAudio bridge error type.
#[derive(Debug, Error)]
pub enum PulseError {
    #[error("Out of memory: {0}")]
    OutOfMemory(String),

    #[error("Sound server connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Server did not report a default sink")]
    NoDefaultSink,

    #[error("Sink not found: {0}")]
    SinkNotFound(String),

    #[error("MainLoop error: {0}")]
    MainLoop(String),

    #[error(transparent)]
    Core(#[from] pmixer_core::Error),
}

/// Result type for PulseAudio operations.
pub type PulseResult<T> = Result<T, PulseError>;
