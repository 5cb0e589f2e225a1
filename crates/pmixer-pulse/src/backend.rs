//! The asynchronous sound server API the bridge is built on.
//!
//! Every request takes a completion callback and returns an operation handle
//! whose state can be polled. Callbacks only fire from inside
//! [`AudioServer::iterate`].

use pmixer_core::{ServerState, SinkSnapshot, VolumeVector};

use crate::error::PulseResult;

/// Lifecycle of one outstanding request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationState {
    /// Waiting for the server
    Running,
    /// Completed, callback has fired
    Done,
    /// Cancelled or the connection went away
    Failed,
}

/// Handle to an outstanding request.
///
/// Dropping the handle releases the request.
pub trait PendingOperation {
    /// Current state of the request.
    fn state(&self) -> OperationState;
}

/// Server-wide information returned by the server-info request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerInfo {
    /// Name of the default sink, if the server has one
    pub default_sink_name: Option<String>,
}

/// One entry of a list reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEntry<T> {
    /// A matching record
    Item(T),
    /// No more records follow
    End,
    /// The server failed the request
    Error,
}

/// Callback-driven sound server connection plus its event loop.
pub trait AudioServer {
    /// Handle type returned by requests.
    type Operation: PendingOperation;

    /// Register the connection state notification. Called once before
    /// [`connect`](Self::connect).
    fn set_state_callback(&mut self, callback: Box<dyn FnMut(ServerState)>);

    /// Start connecting. Progress is reported through the state callback.
    ///
    /// # Errors
    /// Returns an error if the connection attempt cannot be started.
    fn connect(&mut self) -> PulseResult<()>;

    /// Close an established connection.
    fn disconnect(&mut self);

    /// Advance the event loop once, blocking until something happens.
    ///
    /// # Errors
    /// Returns an error if the loop was asked to quit or polling failed.
    fn iterate(&mut self) -> PulseResult<()>;

    /// Request server information.
    fn server_info(&mut self, callback: Box<dyn FnMut(ServerInfo)>) -> Self::Operation;

    /// Request the sink with the given name.
    fn sink_info_by_name(
        &mut self,
        name: &str,
        callback: Box<dyn FnMut(ListEntry<SinkSnapshot>)>,
    ) -> Self::Operation;

    /// Set all channel volumes of a sink. The callback receives the server's
    /// success flag.
    fn set_sink_volume(
        &mut self,
        index: u32,
        volume: &VolumeVector,
        callback: Box<dyn FnMut(bool)>,
    ) -> Self::Operation;

    /// Set the mute flag of a sink. The callback receives the server's
    /// success flag.
    fn set_sink_mute(
        &mut self,
        index: u32,
        muted: bool,
        callback: Box<dyn FnMut(bool)>,
    ) -> Self::Operation;
}
