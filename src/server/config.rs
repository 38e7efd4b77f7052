//! Environment-driven configuration for both binaries.
//!
//! Every variable has a documented default so the services run with no
//! configuration at all in local compose setups.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use thiserror::Error;

/// Timeout applied to each outbound HTTP call.
pub const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// End-to-end deadline for one gateway request.
pub const GATEWAY_DEADLINE: Duration = Duration::from_secs(60);

const DEFAULT_GATEWAY_BIND: &str = "0.0.0.0:8080";
const DEFAULT_RESOLVER_BIND: &str = "0.0.0.0:8090";
const DEFAULT_RESOLVER_BASE_URL: &str = "http://localhost:8090";
const DEFAULT_DIRECTORY_BASE_URL: &str = "https://cep.awesomeapi.com.br";
const DEFAULT_WEATHER_BASE_URL: &str = "https://api.open-meteo.com";

/// Configuration failures detected at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} is not a valid socket address: {message}")]
    InvalidBindAddr { name: &'static str, message: String },
}

/// Edge gateway settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayConfig {
    pub bind_addr: SocketAddr,
    /// Base URL of the resolution service (`RESOLVER_BASE_URL`).
    pub resolver_base_url: String,
}

impl GatewayConfig {
    /// Read gateway settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `GATEWAY_BIND` does not parse as a
    /// socket address.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: bind_addr("GATEWAY_BIND", DEFAULT_GATEWAY_BIND)?,
            resolver_base_url: var_or("RESOLVER_BASE_URL", DEFAULT_RESOLVER_BASE_URL),
        })
    }
}

/// Resolution service settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverConfig {
    pub bind_addr: SocketAddr,
    /// Base URL of the postal-code directory (`DIRECTORY_BASE_URL`).
    pub directory_base_url: String,
    /// Base URL of the weather service (`WEATHER_BASE_URL`).
    pub weather_base_url: String,
}

impl ResolverConfig {
    /// Read resolver settings from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `RESOLVER_BIND` does not parse as a
    /// socket address.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: bind_addr("RESOLVER_BIND", DEFAULT_RESOLVER_BIND)?,
            directory_base_url: var_or("DIRECTORY_BASE_URL", DEFAULT_DIRECTORY_BASE_URL),
            weather_base_url: var_or("WEATHER_BASE_URL", DEFAULT_WEATHER_BASE_URL),
        })
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_owned())
}

fn bind_addr(name: &'static str, default: &str) -> Result<SocketAddr, ConfigError> {
    var_or(name, default)
        .parse()
        .map_err(|error: std::net::AddrParseError| ConfigError::InvalidBindAddr {
            name,
            message: error.to_string(),
        })
}
