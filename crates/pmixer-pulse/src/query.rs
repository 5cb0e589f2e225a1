//! Default sink lookup.

use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use pmixer_core::SinkSnapshot;
use tracing::info;

use crate::backend::{AudioServer, ListEntry};
use crate::error::{PulseError, PulseResult};
use crate::session::Session;

impl<S: AudioServer> Session<S> {
    /// Resolve the server's default sink and take a snapshot of it.
    ///
    /// Issues a server-info request followed by a sink-info request for the
    /// name it returned. The second request is only sent once the first has
    /// completed.
    ///
    /// # Errors
    /// Returns [`PulseError::NoDefaultSink`] when the server reports no
    /// default sink and [`PulseError::SinkNotFound`] when no sink matches
    /// the reported name.
    pub fn default_sink(&mut self) -> PulseResult<SinkSnapshot> {
        let name = self.default_sink_name()?;
        info!("Default sink name {name}");
        self.sink_by_name(&name)
    }

    fn default_sink_name(&mut self) -> PulseResult<String> {
        // Overwritten by every reply; the server sends exactly one.
        let slot: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));

        let writer = Rc::clone(&slot);
        let op = self.server_mut().server_info(Box::new(move |info| {
            if let Some(name) = info.default_sink_name {
                *writer.borrow_mut() = Some(name);
            }
        }));
        self.wait(op)?;

        slot.borrow_mut().take().ok_or(PulseError::NoDefaultSink)
    }

    fn sink_by_name(&mut self, name: &str) -> PulseResult<SinkSnapshot> {
        let slot: Rc<OnceCell<SinkSnapshot>> = Rc::new(OnceCell::new());

        let writer = Rc::clone(&slot);
        let op = self.server_mut().sink_info_by_name(
            name,
            Box::new(move |entry| {
                if let ListEntry::Item(sink) = entry {
                    // Only the first record counts
                    let _ = writer.set(sink);
                }
            }),
        );
        self.wait(op)?;

        slot.get().cloned().ok_or_else(|| PulseError::SinkNotFound(name.to_string()))
    }
}
