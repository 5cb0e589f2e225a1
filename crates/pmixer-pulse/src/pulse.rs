//! [`AudioServer`] implementation backed by libpulse.
//!
//! Uses the standard (non-threaded) main loop so that every callback runs on
//! the calling thread from inside [`AudioServer::iterate`].

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use libpulse_binding::callbacks::ListResult;
use libpulse_binding::context::{self, Context, FlagSet};
use libpulse_binding::mainloop::standard::{IterateResult, Mainloop};
use libpulse_binding::operation::{self, Operation};
use libpulse_binding::volume::{ChannelVolumes, Volume};
use pmixer_core::{ServerState, SinkSnapshot, VolumeVector};
use tracing::debug;

use crate::backend::{AudioServer, ListEntry, OperationState, PendingOperation, ServerInfo};
use crate::error::{PulseError, PulseResult};

/// Connection to a PulseAudio (or pipewire-pulse) server.
pub struct PulseServer {
    // Dropped before the main loop it was created on.
    context: Rc<RefCell<Context>>,
    mainloop: Mainloop,
    server: Option<String>,
}

impl PulseServer {
    /// Create the main loop and an unconnected context.
    ///
    /// `server` selects a server address; `None` uses the library default.
    ///
    /// # Errors
    /// Returns [`PulseError::OutOfMemory`] if libpulse cannot allocate the
    /// main loop or the context.
    pub fn new(client_name: &str, server: Option<String>) -> PulseResult<Self> {
        let mainloop = Mainloop::new()
            .ok_or_else(|| PulseError::OutOfMemory("Failed to create main loop".to_string()))?;

        let context = Context::new(&mainloop, client_name)
            .ok_or_else(|| PulseError::OutOfMemory("Failed to create context".to_string()))?;

        debug!(client_name, ?server, "PulseAudio context created");

        Ok(Self {
            context: Rc::new(RefCell::new(context)),
            mainloop,
            server,
        })
    }

    /// Highest volume a mixer UI should offer (about +11 dB).
    #[must_use]
    pub fn ui_max_volume() -> u32 {
        Volume::ui_max().0
    }
}

#[allow(unreachable_patterns)]
fn server_state(state: context::State) -> ServerState {
    match state {
        context::State::Unconnected => ServerState::Unconnected,
        context::State::Connecting => ServerState::Connecting,
        context::State::Authorizing => ServerState::Authorizing,
        context::State::SettingName => ServerState::SettingName,
        context::State::Ready => ServerState::Ready,
        context::State::Failed => ServerState::Failed,
        context::State::Terminated => ServerState::Terminated,
        other => ServerState::Unrecognized(other as i32),
    }
}

fn to_channel_volumes(volume: &VolumeVector) -> ChannelVolumes {
    let mut channels = ChannelVolumes::default();
    channels.set_len(u8::try_from(volume.channels()).unwrap_or(u8::MAX));
    for (slot, &level) in channels.get_mut().iter_mut().zip(volume.levels()) {
        *slot = Volume(level);
    }
    channels
}

fn from_channel_volumes(channels: &ChannelVolumes) -> VolumeVector {
    VolumeVector::new(channels.get().iter().map(|v| v.0).collect())
}

/// Pollable handle to a libpulse operation. Dropping it unrefs the operation.
pub struct PulseOperation {
    poll: Box<dyn Fn() -> operation::State>,
}

impl PulseOperation {
    fn new<C: ?Sized + 'static>(op: Operation<C>) -> Self {
        Self { poll: Box::new(move || op.get_state()) }
    }
}

impl PendingOperation for PulseOperation {
    fn state(&self) -> OperationState {
        match (self.poll)() {
            operation::State::Running => OperationState::Running,
            operation::State::Done => OperationState::Done,
            operation::State::Cancelled => OperationState::Failed,
        }
    }
}

impl AudioServer for PulseServer {
    type Operation = PulseOperation;

    fn set_state_callback(&mut self, mut callback: Box<dyn FnMut(ServerState)>) {
        let context: Weak<RefCell<Context>> = Rc::downgrade(&self.context);

        self.context.borrow_mut().set_state_callback(Some(Box::new(move || {
            let Some(strong) = context.upgrade() else {
                return;
            };
            // Borrowed while connect() or disconnect() run; neither can report Ready.
            let Ok(ctx) = strong.try_borrow() else {
                return;
            };
            let state = server_state(ctx.get_state());
            drop(ctx);
            callback(state);
        })));
    }

    fn connect(&mut self) -> PulseResult<()> {
        self.context
            .borrow_mut()
            .connect(self.server.as_deref(), FlagSet::NOFLAGS, None)
            .map_err(|e| PulseError::ConnectionFailed(format!("{e:?}")))
    }

    fn disconnect(&mut self) {
        self.context.borrow_mut().disconnect();
    }

    fn iterate(&mut self) -> PulseResult<()> {
        match self.mainloop.iterate(true) {
            IterateResult::Success(_) => Ok(()),
            IterateResult::Quit(retval) => {
                Err(PulseError::MainLoop(format!("Main loop quit with {}", retval.0)))
            }
            IterateResult::Err(e) => Err(PulseError::MainLoop(format!("{e:?}"))),
        }
    }

    fn server_info(&mut self, mut callback: Box<dyn FnMut(ServerInfo)>) -> PulseOperation {
        let op = self.context.borrow().introspect().get_server_info(move |info| {
            callback(ServerInfo {
                default_sink_name: info.default_sink_name.as_deref().map(str::to_owned),
            });
        });
        PulseOperation::new(op)
    }

    fn sink_info_by_name(
        &mut self,
        name: &str,
        mut callback: Box<dyn FnMut(ListEntry<SinkSnapshot>)>,
    ) -> PulseOperation {
        let op = self.context.borrow().introspect().get_sink_info_by_name(name, move |result| {
            let entry = match result {
                ListResult::Item(info) => ListEntry::Item(SinkSnapshot {
                    index: info.index,
                    muted: info.mute,
                    volume: from_channel_volumes(&info.volume),
                }),
                ListResult::End => ListEntry::End,
                ListResult::Error => ListEntry::Error,
            };
            callback(entry);
        });
        PulseOperation::new(op)
    }

    fn set_sink_volume(
        &mut self,
        index: u32,
        volume: &VolumeVector,
        callback: Box<dyn FnMut(bool)>,
    ) -> PulseOperation {
        let channels = to_channel_volumes(volume);
        let op = self
            .context
            .borrow()
            .introspect()
            .set_sink_volume_by_index(index, &channels, Some(callback));
        PulseOperation::new(op)
    }

    fn set_sink_mute(
        &mut self,
        index: u32,
        muted: bool,
        callback: Box<dyn FnMut(bool)>,
    ) -> PulseOperation {
        let op = self
            .context
            .borrow()
            .introspect()
            .set_sink_mute_by_index(index, muted, Some(callback));
        PulseOperation::new(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pmixer_core::VOLUME_NORM;

    #[test]
    fn test_channel_volume_conversion_keeps_channels() {
        let volume = VolumeVector::new(vec![VOLUME_NORM, VOLUME_NORM / 2, 0]);

        let channels = to_channel_volumes(&volume);

        assert_eq!(channels.len(), 3);
        assert_eq!(from_channel_volumes(&channels), volume);
    }

    #[test]
    fn test_context_states_map() {
        assert_eq!(server_state(context::State::Ready), ServerState::Ready);
        assert_eq!(server_state(context::State::Failed), ServerState::Failed);
        assert_eq!(server_state(context::State::SettingName), ServerState::SettingName);
    }

    #[test]
    fn test_ui_max_above_normal() {
        assert!(PulseServer::ui_max_volume() > VOLUME_NORM);
    }
}
