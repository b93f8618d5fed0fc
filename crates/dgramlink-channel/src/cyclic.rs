use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use bytes::Bytes;
use dgramlink_transport::DatagramSocket;

use crate::lifecycle::StopFlag;
use crate::report::{ChannelEvent, EventSink};

/// Upper bound on one uninterrupted sleep, so a stop request never has to
/// wait out a long interval.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// The cyclic send half of a channel.
///
/// Transmits an already-encoded payload to the fixed target, sleeps the
/// interval, re-checks the stop flag. The period is best-effort: actual
/// period = send time + interval, with no drift correction.
pub(crate) struct CyclicSendLoop<S> {
    pub(crate) socket: Arc<S>,
    pub(crate) target: SocketAddr,
    pub(crate) payload: Bytes,
    pub(crate) interval: Duration,
    pub(crate) sink: Arc<dyn EventSink>,
    pub(crate) stop: StopFlag,
}

impl<S: DatagramSocket> CyclicSendLoop<S> {
    pub(crate) fn run(self) {
        while !self.stop.is_stop_requested() {
            match self.socket.send_to(&self.payload, self.target) {
                Ok(len) => self.sink.event(&ChannelEvent::Sent {
                    len,
                    target: self.target,
                }),
                // Send failures are reported and the cadence keeps going;
                // only the stop flag ends the loop.
                Err(err) => self.sink.event(&ChannelEvent::TransportFailed {
                    context: "cyclic send",
                    error: err.to_string(),
                }),
            }
            if self.stopped_during_interval() {
                break;
            }
        }
        self.sink.event(&ChannelEvent::CyclicSendStopped);
    }

    /// Sleep through the interval in slices, returning early (true) if the
    /// stop flag is raised.
    fn stopped_during_interval(&self) -> bool {
        let deadline = Instant::now() + self.interval;
        loop {
            if self.stop.is_stop_requested() {
                return true;
            }
            let now = Instant::now();
            if now >= deadline {
                return false;
            }
            thread::sleep((deadline - now).min(SLEEP_SLICE));
        }
    }
}
