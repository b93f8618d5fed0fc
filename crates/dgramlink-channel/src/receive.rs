use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use dgramlink_codec::ElementFormat;
use dgramlink_transport::{DatagramSocket, TransportError, MAX_DATAGRAM_SIZE};

use crate::buffer::{RecvLog, RecvRecord};
use crate::lifecycle::StopFlag;
use crate::report::{ChannelEvent, EventSink};

/// The receive half of a channel.
///
/// Waits for inbound datagrams with a bounded timeout, decodes each one, and
/// appends the result to the shared log. Runs on its own thread; the only
/// thing that terminates it is the stop flag, observed within at most one
/// timeout interval.
pub(crate) struct ReceiveLoop<S> {
    pub(crate) socket: Arc<S>,
    pub(crate) format: ElementFormat,
    pub(crate) timeout: Duration,
    pub(crate) log: RecvLog,
    pub(crate) sink: Arc<dyn EventSink>,
    pub(crate) stop: StopFlag,
}

impl<S: DatagramSocket> ReceiveLoop<S> {
    pub(crate) fn run(self) {
        let mut buf = vec![0u8; MAX_DATAGRAM_SIZE];
        while !self.stop.is_stop_requested() {
            match self.socket.recv_timeout(&mut buf, self.timeout) {
                Ok((len, source)) => self.on_datagram(&buf[..len], source),
                // Nothing arrived inside the window; go re-check the flag.
                Err(TransportError::Timeout) => {}
                Err(err) => self.sink.event(&ChannelEvent::TransportFailed {
                    context: "receive",
                    error: err.to_string(),
                }),
            }
        }
        self.sink.event(&ChannelEvent::ReceiveStopped);
    }

    fn on_datagram(&self, raw: &[u8], source: SocketAddr) {
        self.sink.event(&ChannelEvent::Received {
            payload: Bytes::copy_from_slice(raw),
            source,
        });
        match dgramlink_codec::decode(raw, self.format) {
            Ok(values) => self.log.append(RecvRecord::Payload { values, source }),
            Err(error) => {
                // The datagram is consumed either way; record the failure in
                // arrival position and keep receiving.
                self.log.append(RecvRecord::DecodeFailure {
                    len: raw.len(),
                    source,
                });
                self.sink.event(&ChannelEvent::DecodeFailed { error, source });
            }
        }
    }
}
