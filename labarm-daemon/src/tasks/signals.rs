//! Termination signal handling
//!
//! SIGHUP, SIGINT, SIGTERM and SIGQUIT are blocked for the whole process
//! and collected synchronously by one dedicated thread with `sigwait`.
//! [`block_shutdown_signals`] must run before any other thread is spawned
//! so every thread inherits the mask.

use std::io;
use std::thread::{self, JoinHandle};

use tracing::{error, info, warn};

use crate::channels::request_shutdown;

/// Signals that request a graceful stop
pub const SHUTDOWN_SIGNALS: [libc::c_int; 4] =
    [libc::SIGHUP, libc::SIGINT, libc::SIGTERM, libc::SIGQUIT];

/// Human-readable signal name
pub fn signal_name(signal: libc::c_int) -> &'static str {
    match signal {
        libc::SIGHUP => "SIGHUP",
        libc::SIGINT => "SIGINT",
        libc::SIGTERM => "SIGTERM",
        libc::SIGQUIT => "SIGQUIT",
        _ => "unknown",
    }
}

fn shutdown_sigset() -> libc::sigset_t {
    // SAFETY: sigset_t is plain data and sigemptyset fully initializes it
    unsafe {
        let mut set: libc::sigset_t = std::mem::zeroed();
        libc::sigemptyset(&mut set);
        for signal in SHUTDOWN_SIGNALS {
            libc::sigaddset(&mut set, signal);
        }
        set
    }
}

/// Block the shutdown signals on the calling thread
pub fn block_shutdown_signals() -> io::Result<()> {
    let set = shutdown_sigset();
    // SAFETY: `set` is initialized; the old mask is not requested
    let rc = unsafe { libc::pthread_sigmask(libc::SIG_BLOCK, &set, std::ptr::null_mut()) };
    if rc != 0 {
        return Err(io::Error::from_raw_os_error(rc));
    }
    Ok(())
}

/// Start the thread that turns signals into a shutdown request
pub fn spawn_signal_listener() -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("signals".into())
        .spawn(|| {
            let set = shutdown_sigset();
            loop {
                let mut signal: libc::c_int = 0;
                // SAFETY: both pointers refer to live locals
                let rc = unsafe { libc::sigwait(&set, &mut signal) };
                if rc != 0 {
                    error!(error = %io::Error::from_raw_os_error(rc), "sigwait failed");
                    return;
                }

                let name = signal_name(signal);
                if request_shutdown() {
                    info!(signal = name, "Shutdown requested");
                } else {
                    warn!(signal = name, "Shutdown already in progress");
                }
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_names() {
        assert_eq!(signal_name(libc::SIGINT), "SIGINT");
        assert_eq!(signal_name(libc::SIGTERM), "SIGTERM");
        assert_eq!(signal_name(libc::SIGHUP), "SIGHUP");
        assert_eq!(signal_name(libc::SIGQUIT), "SIGQUIT");
        assert_eq!(signal_name(libc::SIGUSR1), "unknown");
    }

    #[test]
    fn test_sigset_contains_shutdown_signals() {
        let set = shutdown_sigset();
        for signal in SHUTDOWN_SIGNALS {
            // SAFETY: `set` is initialized
            assert_eq!(unsafe { libc::sigismember(&set, signal) }, 1);
        }
        // SAFETY: `set` is initialized
        assert_eq!(unsafe { libc::sigismember(&set, libc::SIGUSR1) }, 0);
    }
}
