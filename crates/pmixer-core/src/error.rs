//! Error types for pmixer core.

use thiserror::Error;

/// Core error type for pmixer operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("Sound server reported an unexpected context state: {0}")]
    UnexpectedProtocolState(i32),

    #[error("Invalid volume step count: {0} (must be at least 1)")]
    InvalidStepCount(u32),
}

/// Result type alias for pmixer core operations.
pub type Result<T> = std::result::Result<T, Error>;
