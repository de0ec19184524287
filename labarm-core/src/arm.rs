//! Arm model
//!
//! A carrying flag plus the human-readable status of the last outcome. The
//! model performs no validation; the dispatcher checks preconditions.

use core::fmt::{self, Write};

use heapless::String;
use labarm_protocol::text::truncate;

/// Maximum status text length in bytes
pub const STATUS_CAPACITY: usize = 128;

/// Status text after a successful operation
pub const IDLE_STATUS: &str = "idle";

/// Status text buffer
pub type Status = String<STATUS_CAPACITY>;

/// Arm state
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ArmState {
    carrying: bool,
    status: Status,
}

impl ArmState {
    /// Empty-handed and idle
    pub fn new() -> Self {
        let mut arm = Self {
            carrying: false,
            status: String::new(),
        };
        arm.set_status(IDLE_STATUS);
        arm
    }

    /// True if the arm holds a sample
    pub fn carrying(&self) -> bool {
        self.carrying
    }

    /// Current status text
    pub fn status(&self) -> &str {
        &self.status
    }

    /// True if the status is the idle text
    pub fn is_idle(&self) -> bool {
        self.status == IDLE_STATUS
    }

    /// Set the carrying flag, returning the new value for relaying
    pub fn set_carrying(&mut self, carrying: bool) -> bool {
        self.carrying = carrying;
        self.carrying
    }

    /// Replace the status text
    ///
    /// Text longer than [`STATUS_CAPACITY`] is cut at a character boundary.
    pub fn set_status(&mut self, text: &str) {
        self.status.clear();
        let _ = Truncating(&mut self.status).write_str(text);
    }

    /// Replace the status text with formatted output
    pub fn set_status_fmt(&mut self, args: fmt::Arguments<'_>) {
        self.status.clear();
        let _ = Truncating(&mut self.status).write_fmt(args);
    }
}

impl Default for ArmState {
    fn default() -> Self {
        Self::new()
    }
}

/// Writer that drops whatever does not fit
struct Truncating<'a>(&'a mut Status);

impl Write for Truncating<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = STATUS_CAPACITY - self.0.len();
        // Cannot fail: the prefix fits in the remaining capacity
        let _ = self.0.push_str(truncate(s, room));
        Ok(())
    }
}
