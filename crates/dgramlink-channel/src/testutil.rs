//! Scripted doubles shared by the loop and channel tests.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use dgramlink_transport::{DatagramSocket, Result, TransportError};

use crate::report::{ChannelEvent, EventSink};

/// One scripted inbound step.
pub(crate) enum ScriptStep {
    /// Deliver this datagram from this source.
    Datagram(Vec<u8>, SocketAddr),
    /// Fail the receive with a non-timeout transport error.
    RecvError,
}

/// Deterministic datagram endpoint.
///
/// Yields scripted inbound steps in order, then times out forever; the
/// timeout is simulated by sleeping the requested duration so loop timing is
/// observable. Every outbound write is recorded.
pub(crate) struct FakeSocket {
    inbound: Mutex<VecDeque<ScriptStep>>,
    sent: Mutex<Vec<(Vec<u8>, SocketAddr)>>,
    fail_sends: AtomicBool,
    local: SocketAddr,
}

impl FakeSocket {
    pub(crate) fn new() -> Self {
        Self {
            inbound: Mutex::new(VecDeque::new()),
            sent: Mutex::new(Vec::new()),
            fail_sends: AtomicBool::new(false),
            local: SocketAddr::from(([127, 0, 0, 1], 1025)),
        }
    }

    pub(crate) fn push_datagram(&self, raw: &[u8], source: SocketAddr) {
        self.inbound
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(ScriptStep::Datagram(raw.to_vec(), source));
    }

    pub(crate) fn push_recv_error(&self) {
        self.inbound
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(ScriptStep::RecvError);
    }

    /// Make every subsequent `send_to` fail.
    pub(crate) fn fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn sent_payloads(&self) -> Vec<Vec<u8>> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(payload, _)| payload.clone())
            .collect()
    }

    pub(crate) fn sent_count(&self) -> usize {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl DatagramSocket for FakeSocket {
    fn send_to(&self, payload: &[u8], target: SocketAddr) -> Result<usize> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(TransportError::Send {
                target,
                source: std::io::Error::other("scripted send failure"),
            });
        }
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((payload.to_vec(), target));
        Ok(payload.len())
    }

    fn recv_timeout(&self, buf: &mut [u8], timeout: Duration) -> Result<(usize, SocketAddr)> {
        let step = self
            .inbound
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();
        match step {
            Some(ScriptStep::Datagram(raw, source)) => {
                buf[..raw.len()].copy_from_slice(&raw);
                Ok((raw.len(), source))
            }
            Some(ScriptStep::RecvError) => Err(TransportError::Recv(std::io::Error::other(
                "scripted receive failure",
            ))),
            None => {
                thread::sleep(timeout);
                Err(TransportError::Timeout)
            }
        }
    }

    fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.local)
    }
}

/// Sink that records every event for later assertions.
#[derive(Default)]
pub(crate) struct CollectingSink {
    events: Mutex<Vec<ChannelEvent>>,
}

impl CollectingSink {
    pub(crate) fn events(&self) -> Vec<ChannelEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn count_matching(&self, pred: impl Fn(&ChannelEvent) -> bool) -> usize {
        self.events().iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for CollectingSink {
    fn event(&self, event: &ChannelEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

/// Poll `condition` until it holds or `deadline` elapses.
pub(crate) fn wait_until(deadline: Duration, condition: impl Fn() -> bool) -> bool {
    let start = Instant::now();
    while start.elapsed() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    condition()
}
