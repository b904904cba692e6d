//! Cooperative cancellation.
//! A one-way flag set by the controlling thread (or the Ctrl-C handler) and
//! polled by the reorganizer between filesystem operations.
//!
//! Notes:
//! - Relaxed atomics are sufficient for a one-way "stop" flag.
//! - `cancel()` is safe to call from signal handlers.
//! - There is no "uncancel": a fresh token is needed for a new run.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a cooperative stop (idempotent).
    #[inline]
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// Check whether a stop has been requested.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let other = token.clone();
        assert!(!other.is_cancelled());
        thread::spawn(move || token.cancel()).join().unwrap();
        assert!(other.is_cancelled());
        other.cancel();
        assert!(other.is_cancelled());
    }
}
