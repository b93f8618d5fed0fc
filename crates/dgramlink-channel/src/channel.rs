use std::net::SocketAddr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use dgramlink_codec::ElementFormat;
use dgramlink_transport::{DatagramSocket, UdpTransport};

use crate::buffer::{RecvLog, RecvRecord};
use crate::config::ChannelConfig;
use crate::cyclic::CyclicSendLoop;
use crate::error::{ChannelError, Result};
use crate::lifecycle::{LoopState, StopFlag};
use crate::receive::ReceiveLoop;
use crate::report::{ChannelEvent, EventSink, TracingSink};

/// Bidirectional datagram channel: one bound socket, one receive loop, one
/// cyclic send loop, and an append-only log of everything received.
///
/// At most one receive loop and one cyclic send loop are active per channel.
/// Starting the receive loop twice is a reported no-op; starting a second
/// cyclic send supersedes the first. Both loops are stopped when the channel
/// is dropped.
pub struct Channel<S: DatagramSocket = UdpTransport> {
    socket: Arc<S>,
    config: ChannelConfig,
    log: RecvLog,
    sink: Arc<dyn EventSink>,
    receiver: Mutex<ReceiverSlot>,
    cyclic: Mutex<Option<CyclicHandle>>,
}

struct ReceiverSlot {
    state: LoopState,
    stop: StopFlag,
    handle: Option<JoinHandle<()>>,
}

struct CyclicHandle {
    stop: StopFlag,
    handle: JoinHandle<()>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Channel<UdpTransport> {
    /// Bind a UDP socket per `config` and build a channel over it, reporting
    /// through a [`TracingSink`] honoring the config's printing flag.
    pub fn bind(config: ChannelConfig) -> Result<Self> {
        let socket = UdpTransport::bind(config.bind_addr)?;
        let sink = Arc::new(TracingSink::new(config.printing));
        Ok(Self::with_socket(Arc::new(socket), config, sink))
    }
}

impl<S: DatagramSocket> Channel<S> {
    /// Build a channel over an already-bound endpoint with an injected sink.
    ///
    /// This is the seam for scripted transports and custom reporting.
    pub fn with_socket(socket: Arc<S>, config: ChannelConfig, sink: Arc<dyn EventSink>) -> Self {
        Self {
            socket,
            config,
            log: RecvLog::new(),
            sink,
            receiver: Mutex::new(ReceiverSlot {
                state: LoopState::Idle,
                stop: StopFlag::new(),
                handle: None,
            }),
            cyclic: Mutex::new(None),
        }
    }

    /// The channel configuration.
    pub fn config(&self) -> &ChannelConfig {
        &self.config
    }

    /// The local address the socket is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Copy of the receive log, linearized at the append boundary.
    pub fn snapshot(&self) -> Vec<RecvRecord> {
        self.log.snapshot()
    }

    /// Encode and transmit `values` once to the configured target, using the
    /// configured element format.
    ///
    /// Out-of-range values are skipped and reported. Fails with
    /// [`ChannelError::EmptyEncode`] if nothing was packed — no transport
    /// write happens in that case.
    pub fn send_once(&self, values: &[i64]) -> Result<usize> {
        self.send_once_with_format(values, self.config.format)
    }

    /// [`Channel::send_once`] with an explicit element format.
    pub fn send_once_with_format(&self, values: &[i64], format: ElementFormat) -> Result<usize> {
        let payload = self.encode_reporting(values, format)?;
        let len = self.socket.send_to(&payload, self.config.target)?;
        self.sink.event(&ChannelEvent::Sent {
            len,
            target: self.config.target,
        });
        Ok(len)
    }

    /// Signal the receive loop to stop and wait for it to exit.
    ///
    /// Returns within one receive timeout. No-op if the loop is not running.
    pub fn stop_receiving(&self) {
        let handle = {
            let mut slot = lock(&self.receiver);
            if slot.state != LoopState::Running {
                return;
            }
            slot.state = LoopState::Stopped;
            slot.stop.request_stop();
            slot.handle.take()
        };
        // Join outside the lock so readers are never blocked on the exit.
        if let Some(handle) = handle {
            let _ = handle.join();
        }
    }

    /// Signal the cyclic send loop to stop and wait for it to exit.
    ///
    /// No-op if no cyclic send is running.
    pub fn stop_cyclic_send(&self) {
        let previous = lock(&self.cyclic).take();
        if let Some(previous) = previous {
            previous.stop.request_stop();
            let _ = previous.handle.join();
        }
    }

    fn encode_reporting(&self, values: &[i64], format: ElementFormat) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        let skipped = dgramlink_codec::encode(values, format, &mut buf);
        for skip in &skipped {
            self.sink.event(&ChannelEvent::ValueSkipped {
                index: skip.index,
                value: skip.value,
            });
        }
        if buf.is_empty() {
            self.sink.event(&ChannelEvent::EmptySend);
            return Err(ChannelError::EmptyEncode {
                skipped: skipped.len(),
            });
        }
        Ok(buf.freeze())
    }
}

impl<S: DatagramSocket + 'static> Channel<S> {
    /// Start the receive loop on its own thread.
    ///
    /// Idempotent: if the loop is already running (or was stopped for good)
    /// the call is a reported no-op, never a second loop.
    pub fn start_receiving(&self) -> Result<()> {
        let mut slot = lock(&self.receiver);
        match slot.state {
            LoopState::Running | LoopState::Stopped => {
                self.sink.event(&ChannelEvent::DoubleStartIgnored {
                    loop_name: "receive",
                });
                return Ok(());
            }
            LoopState::Idle => {}
        }

        let work = ReceiveLoop {
            socket: Arc::clone(&self.socket),
            format: self.config.format,
            timeout: self.config.recv_timeout,
            log: self.log.clone(),
            sink: Arc::clone(&self.sink),
            stop: slot.stop.clone(),
        };
        let handle = thread::Builder::new()
            .name("dgramlink-recv".into())
            .spawn(move || work.run())
            .map_err(|source| ChannelError::Spawn {
                name: "receive",
                source,
            })?;

        slot.state = LoopState::Running;
        slot.handle = Some(handle);
        self.sink.event(&ChannelEvent::ReceiveStarted);
        Ok(())
    }

    /// Start a cyclic send loop transmitting `values` every `interval`,
    /// using the configured element format.
    ///
    /// If a cyclic send is already running it is stopped and replaced; the
    /// supersession is reported. Fails with [`ChannelError::EmptyEncode`]
    /// if the payload encodes to zero bytes.
    pub fn start_cyclic_send(&self, values: &[i64], interval: Duration) -> Result<()> {
        self.start_cyclic_send_with_format(values, self.config.format, interval)
    }

    /// [`Channel::start_cyclic_send`] with an explicit element format.
    pub fn start_cyclic_send_with_format(
        &self,
        values: &[i64],
        format: ElementFormat,
        interval: Duration,
    ) -> Result<()> {
        let payload = self.encode_reporting(values, format)?;

        // Hold the slot lock across supersede + spawn so concurrent starts
        // serialize; the join is bounded by one sleep slice.
        let mut slot = lock(&self.cyclic);
        if let Some(previous) = slot.take() {
            previous.stop.request_stop();
            let _ = previous.handle.join();
            self.sink.event(&ChannelEvent::CyclicSendSuperseded);
        }

        let stop = StopFlag::new();
        let work = CyclicSendLoop {
            socket: Arc::clone(&self.socket),
            target: self.config.target,
            payload,
            interval,
            sink: Arc::clone(&self.sink),
            stop: stop.clone(),
        };
        let handle = thread::Builder::new()
            .name("dgramlink-send".into())
            .spawn(move || work.run())
            .map_err(|source| ChannelError::Spawn {
                name: "cyclic send",
                source,
            })?;

        *slot = Some(CyclicHandle { stop, handle });
        self.sink.event(&ChannelEvent::CyclicSendStarted { interval });
        Ok(())
    }
}

impl<S: DatagramSocket> Drop for Channel<S> {
    fn drop(&mut self) {
        self.stop_receiving();
        self.stop_cyclic_send();
    }
}

impl<S: DatagramSocket> std::fmt::Debug for Channel<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("config", &self.config)
            .field("log_len", &self.log.len())
            .finish()
    }
}
