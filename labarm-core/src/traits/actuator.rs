//! Arm actuator trait

use crate::operation::{Target, TransferKind};

/// One physical transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Motion {
    /// Take or put
    pub kind: TransferKind,
    /// Spot the arm travels to
    pub target: Target,
    /// Transit time in milliseconds
    pub duration_ms: u32,
}

/// Something that physically moves samples
///
/// `transit` resolves once the motion is complete. The dispatcher awaits
/// it before doing anything else, so no second operation can start while
/// the arm is moving.
#[allow(async_fn_in_trait)]
pub trait ArmActuator {
    /// Perform one transfer
    async fn transit(&mut self, motion: Motion);
}
