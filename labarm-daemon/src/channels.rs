//! Process-wide shutdown coordination
//!
//! The signal thread sets the token and fires the wake signal; the tick
//! source wakes early so the dispatcher sees the request at the next tick
//! boundary.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use labarm_core::ShutdownToken;

/// Set once a termination signal arrives
pub static SHUTDOWN: ShutdownToken = ShutdownToken::new();

/// Wakes the tick source when shutdown is requested
pub static SHUTDOWN_WAKE: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Request shutdown and wake the loop
///
/// Returns true for the first request only.
pub fn request_shutdown() -> bool {
    let first = SHUTDOWN.request();
    SHUTDOWN_WAKE.signal(());
    first
}
