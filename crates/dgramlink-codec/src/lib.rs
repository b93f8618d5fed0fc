//! Fixed-width integer payload codec.
//!
//! A datagram payload is interpreted purely positionally: every element is
//! one fixed-width integer of the declared [`ElementFormat`]. No header, no
//! length prefix, no checksum beyond what the transport provides.
//!
//! Encoding is partial by design: a value that does not fit the declared
//! width is skipped and reported, never an error. Decoding is
//! all-or-nothing: a payload whose length is not a multiple of the element
//! width fails as a whole.

pub mod codec;
pub mod error;
pub mod format;

pub use codec::{decode, encode, SkippedValue};
pub use error::{CodecError, Result};
pub use format::ElementFormat;
