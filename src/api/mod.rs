//! Inbound HTTP adapters for the gateway and resolver services.

pub mod error;
pub mod gateway;
pub mod health;
pub mod resolver;

pub use error::{ApiError, ApiResult, ErrorBody};
pub use resolver::TemperatureResponse;
