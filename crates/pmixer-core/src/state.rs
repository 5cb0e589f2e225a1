//! Connection state machine.

use crate::error::{Error, Result};

/// Context state as reported by the sound server client library.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    /// Context created, not yet connected
    Unconnected,
    /// Socket connection in progress
    Connecting,
    /// Authenticating with the server
    Authorizing,
    /// Sending the client name
    SettingName,
    /// Connection established, requests may be issued
    Ready,
    /// Connection failed or was lost
    Failed,
    /// Connection closed on request
    Terminated,
    /// A state value outside the protocol enumeration
    Unrecognized(i32),
}

/// Readiness of our connection to the sound server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    /// Waiting for the server to become ready
    #[default]
    Connecting,
    /// Server is ready for requests
    Connected,
    /// Connection attempt failed
    Error,
}

impl ConnectionState {
    /// Compute the state that follows a server notification.
    ///
    /// Only `Connecting` can move: `Ready` connects and `Failed` errors out.
    /// Every other known server state leaves the state unchanged.
    ///
    /// # Errors
    /// Returns [`Error::UnexpectedProtocolState`] for an unrecognized server
    /// state; the caller should keep its current state.
    pub fn advance(self, server: ServerState) -> Result<Self> {
        let next = match server {
            ServerState::Ready => Self::Connected,
            ServerState::Failed => Self::Error,
            ServerState::Unconnected
            | ServerState::Connecting
            | ServerState::Authorizing
            | ServerState::SettingName
            | ServerState::Terminated => self,
            ServerState::Unrecognized(raw) => return Err(Error::UnexpectedProtocolState(raw)),
        };

        if self.is_terminal() {
            return Ok(self);
        }
        Ok(next)
    }

    /// Whether the state can no longer change.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Connected | Self::Error)
    }
}
