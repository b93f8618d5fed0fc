use std::net::SocketAddr;
use std::time::Duration;

use crate::error::Result;

/// A bound datagram endpoint.
///
/// This is the seam the channel loops run against. The production
/// implementation is [`crate::UdpTransport`]; tests substitute scripted
/// doubles. All methods take `&self` so one endpoint can be shared by a
/// receive loop and any number of senders without extra locking — concurrent
/// sends and receives are independent at the transport level.
pub trait DatagramSocket: Send + Sync {
    /// Send one datagram to `target`. Returns the number of bytes written.
    fn send_to(&self, payload: &[u8], target: SocketAddr) -> Result<usize>;

    /// Wait up to `timeout` for one inbound datagram.
    ///
    /// On success returns the payload length and the sender's address.
    /// Returns [`crate::TransportError::Timeout`] if the window elapsed
    /// with nothing received.
    fn recv_timeout(&self, buf: &mut [u8], timeout: Duration) -> Result<(usize, SocketAddr)>;

    /// The local address this endpoint is bound to.
    fn local_addr(&self) -> Result<SocketAddr>;
}
