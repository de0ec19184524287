//! Configuration types
//!
//! Board-agnostic configuration structures. The daemon fills these from a
//! TOML document compiled into the binary.

pub mod dispatcher;
pub mod layout;

pub use dispatcher::*;
pub use layout::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Complete machine configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MachineConfig {
    /// Dispatcher timing and conflict handling
    #[cfg_attr(feature = "serde", serde(default))]
    pub dispatcher: DispatcherConfig,
    /// Station layout
    #[cfg_attr(feature = "serde", serde(default, rename = "station"))]
    pub layout: StationLayout,
}

impl MachineConfig {
    /// Check every part of the configuration
    pub fn validate(&self) -> Result<(), LayoutError> {
        self.layout.validate()
    }
}
