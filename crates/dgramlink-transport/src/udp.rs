use std::io::ErrorKind;
use std::net::{SocketAddr, UdpSocket};
use std::time::Duration;

use tracing::{debug, info};

use crate::error::{Result, TransportError};
use crate::traits::DatagramSocket;

/// Largest datagram the transport will hand back: 64 KiB.
///
/// Receive buffers should be at least this large or inbound datagrams get
/// truncated by the OS.
pub const MAX_DATAGRAM_SIZE: usize = 64 * 1024;

/// UDP datagram transport.
///
/// Wraps a bound `std::net::UdpSocket`. Broadcast is enabled at bind time so
/// x.y.z.255-style targets work without extra socket setup.
pub struct UdpTransport {
    socket: UdpSocket,
    local: SocketAddr,
}

impl UdpTransport {
    /// Bind a UDP socket to `addr`.
    ///
    /// Port 0 requests an ephemeral port; the actual port is available via
    /// [`DatagramSocket::local_addr`] afterwards.
    pub fn bind(addr: SocketAddr) -> Result<Self> {
        let bind_err = |source| TransportError::Bind { addr, source };

        let socket = UdpSocket::bind(addr).map_err(bind_err)?;
        socket.set_broadcast(true).map_err(bind_err)?;
        let local = socket.local_addr().map_err(bind_err)?;

        info!(%local, "udp socket bound");
        Ok(Self { socket, local })
    }
}

impl DatagramSocket for UdpTransport {
    fn send_to(&self, payload: &[u8], target: SocketAddr) -> Result<usize> {
        let written = self
            .socket
            .send_to(payload, target)
            .map_err(|source| TransportError::Send { target, source })?;
        debug!(len = written, %target, "datagram sent");
        Ok(written)
    }

    fn recv_timeout(&self, buf: &mut [u8], timeout: Duration) -> Result<(usize, SocketAddr)> {
        // A zero timeout would mean "block forever" to the OS; clamp it to
        // the smallest bounded wait instead.
        let timeout = timeout.max(Duration::from_millis(1));
        self.socket.set_read_timeout(Some(timeout))?;

        match self.socket.recv_from(buf) {
            Ok((len, source)) => {
                debug!(len, %source, "datagram received");
                Ok((len, source))
            }
            // Timeout surfaces as WouldBlock on Unix and TimedOut on Windows.
            Err(err) if matches!(err.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => {
                Err(TransportError::Timeout)
            }
            Err(err) => Err(TransportError::Recv(err)),
        }
    }

    fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.local)
    }
}

impl std::fmt::Debug for UdpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UdpTransport")
            .field("local", &self.local)
            .finish()
    }
}
