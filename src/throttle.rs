//! Inter-operation delays.
//!
//! Slow media and on-access virus scanners can lag behind rapid create/move/
//! delete bursts. Each delay is slept immediately before its operation; zero
//! disables it. Correctness never depends on these.

use std::thread;
use std::time::Duration;
use tracing::trace;

pub const WAIT_CREATE_DEFAULT: Duration = Duration::from_millis(20);
pub const WAIT_DELETE_DEFAULT: Duration = Duration::from_millis(50);
pub const WAIT_MOVE_DEFAULT: Duration = Duration::from_millis(10);
pub const WAIT_SWAP_DEFAULT: Duration = Duration::from_millis(200);

/// The operation about to be performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleOp {
    CreateDir,
    DeleteDir,
    Move,
    /// Renaming the temporary folder over the original
    Swap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationThrottle {
    pub create: Duration,
    pub delete: Duration,
    pub relocate: Duration,
    pub swap: Duration,
}

impl Default for OperationThrottle {
    fn default() -> Self {
        Self {
            create: WAIT_CREATE_DEFAULT,
            delete: WAIT_DELETE_DEFAULT,
            relocate: WAIT_MOVE_DEFAULT,
            swap: WAIT_SWAP_DEFAULT,
        }
    }
}

impl OperationThrottle {
    /// All delays off; for well-behaved systems and tests.
    pub const fn disabled() -> Self {
        Self {
            create: Duration::ZERO,
            delete: Duration::ZERO,
            relocate: Duration::ZERO,
            swap: Duration::ZERO,
        }
    }

    pub fn delay_for(&self, op: ThrottleOp) -> Duration {
        match op {
            ThrottleOp::CreateDir => self.create,
            ThrottleOp::DeleteDir => self.delete,
            ThrottleOp::Move => self.relocate,
            ThrottleOp::Swap => self.swap,
        }
    }

    /// Sleep before `op` if its delay is non-zero.
    pub fn pause(&self, op: ThrottleOp) {
        let d = self.delay_for(op);
        if !d.is_zero() {
            trace!(?op, delay_ms = d.as_millis() as u64, "throttle");
            thread::sleep(d);
        }
    }
}
