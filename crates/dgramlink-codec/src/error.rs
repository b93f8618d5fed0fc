/// Errors that can occur while decoding a payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CodecError {
    /// The raw payload length is not a multiple of the element width.
    #[error("payload length {len} is not a multiple of element width {width}")]
    Misaligned { len: usize, width: usize },
}

pub type Result<T> = std::result::Result<T, CodecError>;
