//! Shutdown token
//!
//! Set once from outside the loop, checked by the dispatcher at tick
//! boundaries.

use core::sync::atomic::{AtomicBool, Ordering};

/// One-shot shutdown request flag
#[derive(Debug, Default)]
pub struct ShutdownToken {
    requested: AtomicBool,
}

impl ShutdownToken {
    pub const fn new() -> Self {
        Self {
            requested: AtomicBool::new(false),
        }
    }

    /// Request shutdown
    ///
    /// Returns true only for the call that actually set the flag.
    pub fn request(&self) -> bool {
        self.requested
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// True once shutdown has been requested
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }

    /// Clear the flag
    pub fn reset(&self) {
        self.requested.store(false, Ordering::SeqCst);
    }
}
