//! HTTP error payloads and mapping from domain errors.
//!
//! Clients only ever see `{"error": "<message>"}` with the HTTP status
//! as the failure signal. The 422 and 404 messages are fixed by the
//! service contract; adapters' raw errors never leak past this module.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::InvalidCep;
use crate::domain::ports::TemperatureResolverError;
use crate::domain::resolution::ResolutionError;

/// Fixed body for malformed CEP input.
pub const INVALID_ZIPCODE: &str = "invalid zipcode";

/// Fixed body for any failed resolution.
pub const ZIPCODE_NOT_FOUND: &str = "can not find zipcode";

/// Wire shape of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    #[schema(example = "invalid zipcode")]
    pub error: String,
}

/// Error returned by HTTP handlers, carrying the outward status and
/// message verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// 422 with the contract-fixed validation message.
    pub fn invalid_zipcode() -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: INVALID_ZIPCODE.to_owned(),
        }
    }

    /// 404 with the contract-fixed not-found message.
    pub fn zipcode_not_found() -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: ZIPCODE_NOT_FOUND.to_owned(),
        }
    }

    /// 500 carrying a gateway-side failure description.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    /// Relay a status and message the resolver already decided.
    ///
    /// Statuses outside the valid range degrade to 500.
    pub fn relayed(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message: message.into(),
        }
    }

    /// Outward HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Outward error message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl From<InvalidCep> for ApiError {
    fn from(_: InvalidCep) -> Self {
        Self::invalid_zipcode()
    }
}

impl From<ResolutionError> for ApiError {
    fn from(error: ResolutionError) -> Self {
        match error {
            ResolutionError::ZipcodeNotFound => Self::zipcode_not_found(),
        }
    }
}

impl From<TemperatureResolverError> for ApiError {
    fn from(error: TemperatureResolverError) -> Self {
        match error {
            TemperatureResolverError::Upstream { status, message } => {
                Self::relayed(status, message)
            }
            TemperatureResolverError::Transport { message } => Self::internal(message),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(ErrorBody {
            error: self.message.clone(),
        })
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;
