//! Dispatcher timing and policy configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default tick period (ms)
pub const DEFAULT_TICK_MS: u32 = 1000;

/// Transit time of the basic arm (ms)
pub const BASIC_TRANSIT_MS: u32 = 2000;

/// Transit time of the simulated arm (ms)
pub const SIMULATOR_TRANSIT_MS: u32 = 5000;

/// What to do when a take/put conflicts with the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ConflictPolicy {
    /// Report the conflict and skip the transit and the mutation
    #[default]
    Abort,
    /// Report the conflict, then move and mutate anyway
    Advisory,
}

/// Dispatcher configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatcherConfig {
    /// Tick period in milliseconds
    pub tick_ms: u32,
    /// Duration of one take/put transit in milliseconds
    pub transit_ms: u32,
    /// Conflict handling
    #[cfg_attr(feature = "serde", serde(rename = "on_conflict"))]
    pub conflict: ConflictPolicy,
}

impl DispatcherConfig {
    /// Basic arm: 2 s transit
    pub const fn basic() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            transit_ms: BASIC_TRANSIT_MS,
            conflict: ConflictPolicy::Abort,
        }
    }

    /// Simulated arm: 5 s transit
    pub const fn simulator() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            transit_ms: SIMULATOR_TRANSIT_MS,
            conflict: ConflictPolicy::Abort,
        }
    }

    /// Same timing with a different conflict policy
    pub const fn with_conflict(mut self, conflict: ConflictPolicy) -> Self {
        self.conflict = conflict;
        self
    }
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self::simulator()
    }
}
