//! Machine configuration compiled into the binary

use labarm_core::config::MachineConfig;
use tracing::{info, warn};

use super::ConfigError;

/// Embedded default configuration
/// Edit arm.toml and rebuild to customize
pub const EMBEDDED_CONFIG: &str = include_str!("../../arm.toml");

/// Parse and validate a TOML machine configuration
pub fn parse_machine_config(text: &str) -> Result<MachineConfig, ConfigError> {
    let config: MachineConfig = toml::from_str(text)?;
    config.validate()?;
    Ok(config)
}

/// Load the embedded configuration, falling back to built-in defaults
pub fn load_machine_config() -> MachineConfig {
    match parse_machine_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                stations = config.layout.len(),
                tick_ms = config.dispatcher.tick_ms,
                transit_ms = config.dispatcher.transit_ms,
                on_conflict = ?config.dispatcher.conflict,
                "Loaded embedded machine configuration"
            );
            config
        }
        Err(e) => {
            warn!(error = %e, "Embedded machine configuration invalid, using defaults");
            MachineConfig::default()
        }
    }
}
