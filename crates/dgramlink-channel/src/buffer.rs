use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

/// One entry of the receive log.
///
/// Decode failures are recorded in arrival position rather than silently
/// dropped, so the log reflects everything the socket consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecvRecord {
    /// A successfully decoded datagram.
    Payload {
        values: Vec<i64>,
        source: SocketAddr,
    },
    /// A datagram whose length did not fit the element format.
    DecodeFailure { len: usize, source: SocketAddr },
}

impl RecvRecord {
    /// The sender address of this record.
    pub fn source(&self) -> SocketAddr {
        match self {
            RecvRecord::Payload { source, .. } | RecvRecord::DecodeFailure { source, .. } => {
                *source
            }
        }
    }

    /// The decoded values, if this record decoded successfully.
    pub fn values(&self) -> Option<&[i64]> {
        match self {
            RecvRecord::Payload { values, .. } => Some(values),
            RecvRecord::DecodeFailure { .. } => None,
        }
    }
}

/// Append-only log of received payloads, shared between the receive loop and
/// any number of readers.
///
/// Entry order is decode-completion order and entries are never mutated or
/// reordered after append. Cloning the log clones the handle, not the
/// entries.
#[derive(Debug, Clone, Default)]
pub struct RecvLog {
    entries: Arc<Mutex<Vec<RecvRecord>>>,
}

impl RecvLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one record. Amortized O(1); the lock is held only for the push.
    pub fn append(&self, record: RecvRecord) {
        // A push cannot leave the Vec in a torn state, so a poisoned lock is
        // safe to recover rather than propagate a panic across threads.
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    /// Copy of the log, linearized at the append boundary.
    pub fn snapshot(&self) -> Vec<RecvRecord> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of records appended so far.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
