//! Scripted in-memory sound server for tests.
//!
//! Each call to `iterate` delivers the next scripted connection state, then
//! ticks every outstanding request; a request completes once its latency has
//! elapsed. When there is nothing left to do the loop reports an error
//! instead of blocking forever.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use pmixer_core::{ServerState, SinkSnapshot, VolumeVector};

use crate::backend::{AudioServer, ListEntry, OperationState, PendingOperation, ServerInfo};
use crate::error::{PulseError, PulseResult};

/// A request the fake received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ServerInfo,
    SinkInfo(String),
    SetVolume { index: u32, volume: VolumeVector },
    SetMute { index: u32, muted: bool },
}

struct Pending {
    remaining: usize,
    state: Rc<Cell<OperationState>>,
    complete: Option<Box<dyn FnOnce()>>,
    cancelled: bool,
}

struct Inner {
    states: VecDeque<ServerState>,
    state_callback: Option<Box<dyn FnMut(ServerState)>>,
    default_sink: Option<String>,
    sinks: Vec<(String, SinkSnapshot)>,
    latency: usize,
    refuse_connect: bool,
    fail_next: bool,
    cancel_next: bool,
    disconnected: bool,
    iterations: usize,
    requests: Vec<Request>,
    pending: Vec<Pending>,
}

/// Cloneable handle to a scripted server; clones share state so a test can
/// keep one to inspect what the session did.
#[derive(Clone)]
pub struct FakeServer {
    inner: Rc<RefCell<Inner>>,
    released: Rc<Cell<usize>>,
}

pub const DEFAULT_SINK: &str = "alsa_output.pci-0000_00_1f.3.analog-stereo";

impl FakeServer {
    /// A server that connects in two steps and has one stereo default sink
    /// at index 0, unmuted, both channels at 50.
    pub fn new() -> Self {
        let sink = SinkSnapshot { index: 0, muted: false, volume: VolumeVector::new(vec![50, 50]) };
        Self {
            inner: Rc::new(RefCell::new(Inner {
                states: VecDeque::from(vec![ServerState::Connecting, ServerState::Ready]),
                state_callback: None,
                default_sink: Some(DEFAULT_SINK.to_string()),
                sinks: vec![(DEFAULT_SINK.to_string(), sink)],
                latency: 1,
                refuse_connect: false,
                fail_next: false,
                cancel_next: false,
                disconnected: false,
                iterations: 0,
                requests: Vec::new(),
                pending: Vec::new(),
            })),
            released: Rc::new(Cell::new(0)),
        }
    }

    pub fn with_states(self, states: Vec<ServerState>) -> Self {
        self.inner.borrow_mut().states = states.into();
        self
    }

    pub fn with_default_sink(self, name: Option<&str>) -> Self {
        self.inner.borrow_mut().default_sink = name.map(String::from);
        self
    }

    pub fn with_sink(self, name: &str, sink: SinkSnapshot) -> Self {
        {
            let mut inner = self.inner.borrow_mut();
            inner.sinks.retain(|(n, _)| n != name);
            inner.sinks.push((name.to_string(), sink));
        }
        self
    }

    pub fn with_latency(self, latency: usize) -> Self {
        self.inner.borrow_mut().latency = latency;
        self
    }

    pub fn refusing_connect(self) -> Self {
        self.inner.borrow_mut().refuse_connect = true;
        self
    }

    pub fn fail_next_iteration(&self) {
        self.inner.borrow_mut().fail_next = true;
    }

    /// The next request ends up `Failed` without its callback firing.
    pub fn cancel_next_request(&self) {
        self.inner.borrow_mut().cancel_next = true;
    }

    pub fn disconnected(&self) -> bool {
        self.inner.borrow().disconnected
    }

    pub fn iterations(&self) -> usize {
        self.inner.borrow().iterations
    }

    pub fn released(&self) -> usize {
        self.released.get()
    }

    pub fn requests(&self) -> Vec<Request> {
        self.inner.borrow().requests.clone()
    }

    fn submit(&self, request: Request, complete: Box<dyn FnOnce()>) -> FakeOperation {
        let state = Rc::new(Cell::new(OperationState::Running));
        let mut inner = self.inner.borrow_mut();
        let remaining = inner.latency;
        let cancelled = std::mem::take(&mut inner.cancel_next);
        inner.requests.push(request);
        inner.pending.push(Pending {
            remaining,
            state: Rc::clone(&state),
            complete: Some(complete),
            cancelled,
        });
        FakeOperation { state, released: Rc::clone(&self.released) }
    }
}

/// Operation handle that counts its own release.
pub struct FakeOperation {
    state: Rc<Cell<OperationState>>,
    released: Rc<Cell<usize>>,
}

impl PendingOperation for FakeOperation {
    fn state(&self) -> OperationState {
        self.state.get()
    }
}

impl Drop for FakeOperation {
    fn drop(&mut self) {
        self.released.set(self.released.get() + 1);
    }
}

impl AudioServer for FakeServer {
    type Operation = FakeOperation;

    fn set_state_callback(&mut self, callback: Box<dyn FnMut(ServerState)>) {
        self.inner.borrow_mut().state_callback = Some(callback);
    }

    fn connect(&mut self) -> PulseResult<()> {
        if self.inner.borrow().refuse_connect {
            return Err(PulseError::ConnectionFailed("connection refused".to_string()));
        }
        Ok(())
    }

    fn disconnect(&mut self) {
        let mut inner = self.inner.borrow_mut();
        inner.disconnected = true;
        if let Some(callback) = inner.state_callback.as_mut() {
            callback(ServerState::Terminated);
        }
    }

    fn iterate(&mut self) -> PulseResult<()> {
        let mut inner = self.inner.borrow_mut();
        inner.iterations += 1;

        if inner.fail_next {
            inner.fail_next = false;
            return Err(PulseError::MainLoop("injected failure".to_string()));
        }

        if let Some(state) = inner.states.pop_front() {
            if let Some(callback) = inner.state_callback.as_mut() {
                callback(state);
            }
            return Ok(());
        }

        if inner.pending.is_empty() {
            return Err(PulseError::MainLoop("fake event loop is idle".to_string()));
        }

        for pending in &mut inner.pending {
            pending.remaining = pending.remaining.saturating_sub(1);
            if pending.remaining == 0 {
                let complete = pending.complete.take();
                if pending.cancelled {
                    pending.state.set(OperationState::Failed);
                    continue;
                }
                if let Some(complete) = complete {
                    complete();
                }
                pending.state.set(OperationState::Done);
            }
        }
        inner.pending.retain(|p| p.state.get() == OperationState::Running);
        Ok(())
    }

    fn server_info(&mut self, mut callback: Box<dyn FnMut(ServerInfo)>) -> FakeOperation {
        let info = ServerInfo { default_sink_name: self.inner.borrow().default_sink.clone() };
        self.submit(Request::ServerInfo, Box::new(move || callback(info)))
    }

    fn sink_info_by_name(
        &mut self,
        name: &str,
        mut callback: Box<dyn FnMut(ListEntry<SinkSnapshot>)>,
    ) -> FakeOperation {
        let found = self
            .inner
            .borrow()
            .sinks
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, sink)| sink.clone());

        self.submit(
            Request::SinkInfo(name.to_string()),
            Box::new(move || match found {
                Some(sink) => {
                    callback(ListEntry::Item(sink));
                    callback(ListEntry::End);
                }
                None => callback(ListEntry::Error),
            }),
        )
    }

    fn set_sink_volume(
        &mut self,
        index: u32,
        volume: &VolumeVector,
        mut callback: Box<dyn FnMut(bool)>,
    ) -> FakeOperation {
        let request = Request::SetVolume { index, volume: volume.clone() };
        self.submit(request, Box::new(move || callback(true)))
    }

    fn set_sink_mute(
        &mut self,
        index: u32,
        muted: bool,
        mut callback: Box<dyn FnMut(bool)>,
    ) -> FakeOperation {
        self.submit(Request::SetMute { index, muted }, Box::new(move || callback(true)))
    }
}
