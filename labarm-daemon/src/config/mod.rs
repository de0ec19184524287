//! Daemon configuration
//!
//! Two sources: the machine layout compiled into the binary as TOML, and the
//! command server endpoint taken from the environment.

pub mod env;
pub mod machine;

pub use env::Endpoint;
pub use machine::load_machine_config;

use labarm_core::config::LayoutError;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse machine config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid station layout: {0}")]
    Layout(LayoutError),

    #[error("invalid port {0:?}")]
    InvalidPort(String),
}

impl From<LayoutError> for ConfigError {
    fn from(e: LayoutError) -> Self {
        ConfigError::Layout(e)
    }
}
