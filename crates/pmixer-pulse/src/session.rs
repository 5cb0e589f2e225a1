//! Synchronous session over the callback-driven server API.
//!
//! A [`Session`] owns the server connection for one command run. It turns
//! each asynchronous request into a blocking call by iterating the event loop
//! until the request leaves the running state. There is no timeout: if the
//! server never completes a request, the wait never returns.

use std::cell::Cell;
use std::rc::Rc;

use pmixer_core::ConnectionState;
use tracing::{debug, error, info};

use crate::backend::{AudioServer, OperationState, PendingOperation};
use crate::error::{PulseError, PulseResult};

/// A connected sound server session.
pub struct Session<S: AudioServer> {
    server: S,
    state: Rc<Cell<ConnectionState>>,
}

impl<S: AudioServer> Session<S> {
    /// Connect to the server and block until it is ready.
    ///
    /// # Errors
    /// Returns [`PulseError::ConnectionFailed`] if the server reports a
    /// failure, or the event loop error if iterating fails first.
    pub fn connect(mut server: S) -> PulseResult<Self> {
        let state = Rc::new(Cell::new(ConnectionState::Connecting));

        let observed = Rc::clone(&state);
        server.set_state_callback(Box::new(move |server_state| {
            match observed.get().advance(server_state) {
                Ok(next) => observed.set(next),
                Err(e) => error!(error = %e, "Sound server context in unexpected state"),
            }
        }));

        let mut session = Self { server, state };

        session.state.set(ConnectionState::Connecting);
        session.server.connect()?;

        while session.state() == ConnectionState::Connecting {
            session.server.iterate()?;
        }

        if session.state() != ConnectionState::Connected {
            return Err(PulseError::ConnectionFailed("server refused the connection".to_string()));
        }

        info!("Connected to sound server");
        Ok(session)
    }

    /// Current connection state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state.get()
    }

    /// Block until `op` is no longer running, then release it.
    ///
    /// Only completion is checked; whatever the request produced must be
    /// read from the slot its callback filled.
    ///
    /// # Errors
    /// Returns an error if the event loop fails while waiting.
    pub fn wait(&mut self, op: S::Operation) -> PulseResult<()> {
        while op.state() == OperationState::Running {
            self.server.iterate()?;
        }
        debug!(state = ?op.state(), "Operation finished");
        Ok(())
    }

    pub(crate) fn server_mut(&mut self) -> &mut S {
        &mut self.server
    }
}

impl<S: AudioServer> Drop for Session<S> {
    fn drop(&mut self) {
        if self.state() == ConnectionState::Connected {
            debug!("Disconnecting from sound server");
            self.server.disconnect();
        }
    }
}
