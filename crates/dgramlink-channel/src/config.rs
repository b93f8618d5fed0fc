use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use dgramlink_codec::ElementFormat;
use serde::{Deserialize, Serialize};

/// Default bounded wait of the receive loop. Bounds stop latency: a stop
/// request is observed within at most one timeout interval.
pub const DEFAULT_RECV_TIMEOUT: Duration = Duration::from_secs(3);

/// Default cyclic send interval.
pub const DEFAULT_SEND_INTERVAL: Duration = Duration::from_secs(1);

/// Construction-time channel configuration. Immutable once the channel is
/// built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelConfig {
    /// Local address the socket binds to. Port 0 requests an ephemeral port.
    pub bind_addr: SocketAddr,
    /// Fixed destination for `send_once` and the cyclic send loop.
    pub target: SocketAddr,
    /// Element format applied to every payload unless overridden per call.
    #[serde(default)]
    pub format: ElementFormat,
    /// Bounded wait of each receive call.
    #[serde(default = "default_recv_timeout")]
    pub recv_timeout: Duration,
    /// Emit per-datagram data events at info level (hex dump of received
    /// payloads, sent lengths).
    #[serde(default)]
    pub printing: bool,
}

fn default_recv_timeout() -> Duration {
    DEFAULT_RECV_TIMEOUT
}

impl ChannelConfig {
    /// Configuration for a peer at `target`, bound locally on the same port
    /// on all interfaces (the conventional single-port peer setup).
    pub fn new(target: SocketAddr) -> Self {
        Self {
            bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), target.port()),
            target,
            format: ElementFormat::default(),
            recv_timeout: DEFAULT_RECV_TIMEOUT,
            printing: false,
        }
    }

    /// Override the local bind address.
    pub fn with_bind_addr(mut self, bind_addr: SocketAddr) -> Self {
        self.bind_addr = bind_addr;
        self
    }

    /// Override the default element format.
    pub fn with_format(mut self, format: ElementFormat) -> Self {
        self.format = format;
        self
    }

    /// Override the receive timeout.
    pub fn with_recv_timeout(mut self, recv_timeout: Duration) -> Self {
        self.recv_timeout = recv_timeout;
        self
    }

    /// Enable per-datagram data events.
    pub fn with_printing(mut self, printing: bool) -> Self {
        self.printing = printing;
        self
    }
}
