//! Tick source for the dispatch loop
//!
//! Fires every configured period, or immediately when shutdown is
//! requested so the loop does not wait out a full period.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Ticker};
use labarm_core::traits::TickSource;
use labarm_core::ShutdownToken;
use tracing::{debug, trace};

/// Periodic ticker that also wakes on shutdown
pub struct ShutdownAwareTicker<'a> {
    ticker: Ticker,
    shutdown: &'a ShutdownToken,
    wake: &'a Signal<CriticalSectionRawMutex, ()>,
}

impl<'a> ShutdownAwareTicker<'a> {
    pub fn new(
        period_ms: u32,
        shutdown: &'a ShutdownToken,
        wake: &'a Signal<CriticalSectionRawMutex, ()>,
    ) -> Self {
        Self {
            ticker: Ticker::every(Duration::from_millis(period_ms.max(1).into())),
            shutdown,
            wake,
        }
    }
}

impl TickSource for ShutdownAwareTicker<'_> {
    async fn next_tick(&mut self) {
        if self.shutdown.is_requested() {
            return;
        }

        match select(self.ticker.next(), self.wake.wait()).await {
            Either::First(()) => trace!("Tick"),
            Either::Second(()) => debug!("Tick interrupted by shutdown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_time::Instant;

    #[test]
    fn test_returns_immediately_after_shutdown() {
        let token = ShutdownToken::new();
        let wake = Signal::new();
        token.request();

        let mut ticks = ShutdownAwareTicker::new(60_000, &token, &wake);
        let start = Instant::now();
        block_on(ticks.next_tick());
        assert!(start.elapsed().as_millis() < 1000);
    }

    #[test]
    fn test_wake_signal_cuts_period_short() {
        let token = ShutdownToken::new();
        let wake = Signal::new();
        wake.signal(());

        let mut ticks = ShutdownAwareTicker::new(60_000, &token, &wake);
        let start = Instant::now();
        block_on(ticks.next_tick());
        assert!(start.elapsed().as_millis() < 1000);
    }

    #[test]
    fn test_ticks_at_period() {
        let token = ShutdownToken::new();
        let wake = Signal::new();

        let mut ticks = ShutdownAwareTicker::new(20, &token, &wake);
        let start = Instant::now();
        block_on(ticks.next_tick());
        block_on(ticks.next_tick());
        assert!(start.elapsed().as_millis() >= 20);
    }
}
