use std::net::SocketAddr;

/// Errors that can occur in datagram transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Failed to bind to the specified address.
    #[error("failed to bind to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    /// Failed to send a datagram to the target.
    #[error("failed to send to {target}: {source}")]
    Send {
        target: SocketAddr,
        source: std::io::Error,
    },

    /// An I/O error occurred while receiving.
    #[error("receive error: {0}")]
    Recv(#[from] std::io::Error),

    /// The receive window elapsed without a datagram arriving.
    ///
    /// This is an expected outcome of every bounded receive, not a failure;
    /// loops treat it as "poll the stop flag and go around again".
    #[error("receive timed out")]
    Timeout,
}

impl TransportError {
    /// Whether this error is a receive timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, TransportError::Timeout)
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;
