//! Command server endpoint from the environment

use std::fmt;

use super::ConfigError;

/// Host variable
pub const HOST_VAR: &str = "HOST";
/// Port variable
pub const PORT_VAR: &str = "PORT";

pub const DEFAULT_HOST: &str = "http://localhost";
pub const DEFAULT_PORT: u16 = 5000;

/// Where the command server listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Read `HOST` and `PORT`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(
            std::env::var(HOST_VAR).ok().as_deref(),
            std::env::var(PORT_VAR).ok().as_deref(),
        )
    }

    /// Apply defaults to raw values; empty counts as unset
    pub fn resolve(host: Option<&str>, port: Option<&str>) -> Result<Self, ConfigError> {
        let host = match host.map(str::trim) {
            Some(host) if !host.is_empty() => host,
            _ => DEFAULT_HOST,
        };
        let port = match port.map(str::trim) {
            Some(port) if !port.is_empty() => port
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.to_string()))?,
            _ => DEFAULT_PORT,
        };
        Ok(Self {
            host: host.to_string(),
            port,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `HOST:PORT` as configured
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// `host:port` suitable for a socket connect (no scheme, no path)
    pub fn socket_address(&self) -> String {
        let host = self
            .host
            .split_once("://")
            .map_or(self.host.as_str(), |(_, rest)| rest);
        let host = host.split('/').next().unwrap_or(host);
        format!("{}:{}", host, self.port)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.address())
    }
}
