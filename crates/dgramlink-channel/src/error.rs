/// Errors that can occur in channel operations.
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// Transport-level error.
    #[error("transport error: {0}")]
    Transport(#[from] dgramlink_transport::TransportError),

    /// Encoding produced zero bytes, so there is nothing to send.
    #[error("encoded payload is empty ({skipped} value(s) out of range); send aborted")]
    EmptyEncode {
        /// How many input values were dropped for being out of range.
        skipped: usize,
    },

    /// Failed to spawn a loop thread.
    #[error("failed to spawn {name} thread: {source}")]
    Spawn {
        name: &'static str,
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ChannelError>;
