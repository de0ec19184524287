//! Simulated arm
//!
//! Stands in for real motion hardware: every transfer simply takes its
//! configured transit time.

use embassy_time::Timer;
use labarm_core::traits::{ArmActuator, Motion};
use tracing::{debug, info};

/// Arm that sleeps through each transit
#[derive(Debug, Default)]
pub struct SimulatedArm {
    transits: u32,
}

impl SimulatedArm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed transits
    pub fn transits(&self) -> u32 {
        self.transits
    }
}

impl ArmActuator for SimulatedArm {
    async fn transit(&mut self, motion: Motion) {
        info!(
            op = motion.kind.name(),
            station = motion.target.station,
            spot = motion.target.spot,
            duration_ms = motion.duration_ms,
            "Arm in transit"
        );

        Timer::after_millis(motion.duration_ms.into()).await;

        self.transits = self.transits.wrapping_add(1);
        debug!(transits = self.transits, "Transit complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_time::Instant;
    use labarm_core::{Target, TransferKind};

    #[test]
    fn test_transit_takes_its_duration() {
        let mut arm = SimulatedArm::new();
        let motion = Motion {
            kind: TransferKind::Take,
            target: Target::new(0, 0),
            duration_ms: 30,
        };

        let start = Instant::now();
        block_on(arm.transit(motion));

        assert!(start.elapsed().as_millis() >= 30);
        assert_eq!(arm.transits(), 1);
    }
}
