//! UDP datagram transport abstraction.
//!
//! Provides a bound socket endpoint with three primitives:
//! - send a datagram to an arbitrary target
//! - receive a datagram with a bounded wait
//! - report the bound local address
//!
//! This is the lowest layer of dgramlink. The channel loops are written
//! against the [`DatagramSocket`] trait so they can run over the real
//! [`UdpTransport`] or a scripted test double.

pub mod error;
pub mod traits;
pub mod udp;

pub use error::{Result, TransportError};
pub use traits::DatagramSocket;
pub use udp::{UdpTransport, MAX_DATAGRAM_SIZE};
