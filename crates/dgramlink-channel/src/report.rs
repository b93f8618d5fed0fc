use std::net::SocketAddr;
use std::time::Duration;

use bytes::Bytes;
use dgramlink_codec::CodecError;
use tracing::{debug, info, warn};

/// Everything the channel and its loops report instead of printing.
///
/// Recoverable errors and lifecycle transitions are only observable through
/// these events; none of them terminate a loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelEvent {
    /// A datagram arrived.
    Received { payload: Bytes, source: SocketAddr },
    /// A datagram was written to the transport.
    Sent { len: usize, target: SocketAddr },
    /// An inbound payload did not decode; it was consumed, not requeued.
    DecodeFailed {
        error: CodecError,
        source: SocketAddr,
    },
    /// An out-of-range value was dropped during encoding.
    ValueSkipped { index: usize, value: i64 },
    /// A transport operation failed; the loop carries on.
    TransportFailed {
        context: &'static str,
        error: String,
    },
    /// Encoding produced zero bytes; nothing was sent.
    EmptySend,
    /// A start request was ignored because the loop is already running or
    /// has been stopped for good.
    DoubleStartIgnored { loop_name: &'static str },
    /// The receive loop started.
    ReceiveStarted,
    /// The receive loop observed its stop flag and exited.
    ReceiveStopped,
    /// A cyclic send loop started.
    CyclicSendStarted { interval: Duration },
    /// A running cyclic send loop was stopped and replaced by a new one.
    CyclicSendSuperseded,
    /// The cyclic send loop observed its stop flag and exited.
    CyclicSendStopped,
}

/// Sink for channel events, injected into the channel and both loops.
///
/// Implementations must be cheap and non-blocking; events are emitted from
/// inside the loop iterations.
pub trait EventSink: Send + Sync {
    fn event(&self, event: &ChannelEvent);
}

/// Sink that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn event(&self, _event: &ChannelEvent) {}
}

/// Default sink: routes events to `tracing`.
///
/// Warnings always go out at warn level. Per-datagram data events (received
/// hex dump, sent length) are emitted at info level only when `printing` is
/// set, mirroring the channel config flag.
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    printing: bool,
}

impl TracingSink {
    pub fn new(printing: bool) -> Self {
        Self { printing }
    }
}

impl EventSink for TracingSink {
    fn event(&self, event: &ChannelEvent) {
        match event {
            ChannelEvent::Received { payload, source } => {
                if self.printing {
                    info!(
                        data = %hex(payload),
                        len = payload.len(),
                        %source,
                        "data received"
                    );
                }
            }
            ChannelEvent::Sent { len, target } => {
                if self.printing {
                    info!(len, %target, "data sent");
                }
            }
            ChannelEvent::DecodeFailed { error, source } => {
                warn!(%error, %source, "receive loop: payload dropped");
            }
            ChannelEvent::ValueSkipped { index, value } => {
                warn!(index, value, "encode: value out of range, skipped");
            }
            ChannelEvent::TransportFailed { context, error } => {
                warn!(context, %error, "transport error, continuing");
            }
            ChannelEvent::EmptySend => {
                warn!("send: encoded payload is empty, nothing sent");
            }
            ChannelEvent::DoubleStartIgnored { loop_name } => {
                warn!(loop_name, "start ignored, loop not idle");
            }
            ChannelEvent::ReceiveStarted => debug!("receive loop started"),
            ChannelEvent::ReceiveStopped => debug!("receive loop stopped"),
            ChannelEvent::CyclicSendStarted { interval } => {
                debug!(?interval, "cyclic send loop started");
            }
            ChannelEvent::CyclicSendSuperseded => {
                debug!("cyclic send loop superseded");
            }
            ChannelEvent::CyclicSendStopped => debug!("cyclic send loop stopped"),
        }
    }
}

fn hex(payload: &Bytes) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(payload.len() * 2);
    for byte in payload {
        let _ = write!(out, "{byte:02x}");
    }
    out
}
