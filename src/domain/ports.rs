//! Driven ports at the edges of the hexagon.
//!
//! Each trait exposes a strongly typed error enum so adapters map their
//! failures into predictable variants instead of returning
//! `anyhow::Result`. Upstream HTTP statuses are carried as `u16` to keep
//! the domain free of any particular `http` crate version.

use async_trait::async_trait;
use thiserror::Error;

use super::cep::Cep;
use super::temperature::{Celsius, TemperatureReport};

/// Address record produced by the postal-code directory.
///
/// Coordinates stay as the upstream's strings; the weather port decides
/// whether they parse as numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CepAddress {
    pub city: String,
    pub latitude: String,
    pub longitude: String,
}

/// Errors surfaced while looking up a CEP in the directory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CepDirectoryError {
    /// The directory has no record for this CEP. Covers both an upstream
    /// 404 and the upstream's 200-with-empty-echo quirk.
    #[error("directory has no record for this CEP")]
    NotFound,
    /// Network transport failed before a response arrived.
    #[error("directory transport failed: {message}")]
    Transport { message: String },
    /// The directory answered with an unexpected status.
    #[error("directory returned status {status}")]
    UpstreamStatus { status: u16 },
    /// The directory response body could not be decoded.
    #[error("directory response decode failed: {message}")]
    Decode { message: String },
}

/// Port mapping a CEP to a city and geocoordinates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CepDirectory: Send + Sync {
    /// Look up one CEP.
    async fn lookup(&self, cep: &Cep) -> Result<CepAddress, CepDirectoryError>;
}

/// Errors surfaced while fetching the current temperature.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherSourceError {
    /// Coordinate strings did not parse as decimal numbers; no request
    /// was made.
    #[error("invalid coordinates: {message}")]
    InvalidCoordinates { message: String },
    /// Network transport failed before a response arrived.
    #[error("weather transport failed: {message}")]
    Transport { message: String },
    /// The weather service answered with a non-success status.
    #[error("weather service returned status {status}")]
    UpstreamStatus { status: u16 },
    /// The weather response body could not be decoded.
    #[error("weather response decode failed: {message}")]
    Decode { message: String },
}

/// Port returning the current Celsius reading for coordinates.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherSource: Send + Sync {
    /// Fetch the current temperature at the given coordinates.
    async fn current_celsius(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> Result<Celsius, WeatherSourceError>;
}

/// Errors surfaced by the gateway's client for the resolution service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemperatureResolverError {
    /// The resolver answered with a non-success status; `message` is the
    /// error text already collapsed by the resolver, relayed verbatim.
    #[error("resolver returned status {status}: {message}")]
    Upstream { status: u16, message: String },
    /// Transport failure or an unreadable resolver response.
    #[error("resolver call failed: {message}")]
    Transport { message: String },
}

/// Port the gateway uses to resolve a validated CEP to a temperature.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TemperatureResolver: Send + Sync {
    /// Resolve one CEP end to end.
    async fn resolve(&self, cep: &Cep) -> Result<TemperatureReport, TemperatureResolverError>;
}
