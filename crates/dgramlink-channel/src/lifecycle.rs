use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Loop lifecycle. `Stopped` is terminal; the state never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopState {
    Idle,
    Running,
    Stopped,
}

/// One-way stop signal shared between a channel and one loop thread.
///
/// Set exactly once by the owning channel, polled by the loop once per
/// iteration. Never reset.
#[derive(Debug, Clone, Default)]
pub(crate) struct StopFlag(Arc<AtomicBool>);

impl StopFlag {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub(crate) fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
