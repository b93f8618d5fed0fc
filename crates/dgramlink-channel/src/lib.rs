//! Bidirectional UDP datagram channel.
//!
//! This is the "just works" layer. A [`Channel`] owns one bound socket and
//! runs up to two loops on their own OS threads:
//! - a receive loop that decodes every inbound datagram and appends it to a
//!   shared append-only log
//! - a cyclic send loop that retransmits a fixed payload at a fixed interval
//!
//! Both loops are cooperative: they poll a one-way stop flag once per
//! iteration and recover from every transport and codec error. The only way
//! a loop terminates is an explicit stop request (or channel drop).

pub mod buffer;
pub mod channel;
pub mod config;
pub mod error;
pub mod report;

mod cyclic;
mod lifecycle;
mod receive;

#[cfg(test)]
mod testutil;

pub use buffer::{RecvLog, RecvRecord};
pub use channel::Channel;
pub use config::{ChannelConfig, DEFAULT_RECV_TIMEOUT, DEFAULT_SEND_INTERVAL};
pub use error::{ChannelError, Result};
pub use report::{ChannelEvent, EventSink, NullSink, TracingSink};

pub use dgramlink_codec::ElementFormat;
pub use dgramlink_transport::{DatagramSocket, UdpTransport};
