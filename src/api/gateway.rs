//! Edge gateway HTTP handler.
//!
//! ```text
//! POST /   body: {"cep": "<string>"}
//! ```
//!
//! Validates the CEP, forwards it to the resolution service through the
//! [`TemperatureResolver`] port, and relays whatever the resolver
//! decided. Only transport-level failures on the gateway's own hop
//! produce a 500 here.

use std::sync::Arc;
use std::time::Duration;

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use utoipa::ToSchema;

use crate::api::error::{ApiError, ApiResult, ErrorBody};
use crate::api::resolver::TemperatureResponse;
use crate::domain::Cep;
use crate::domain::ports::TemperatureResolver;
use crate::middleware::trace::current_trace_id;
use crate::server::config::GATEWAY_DEADLINE;

/// Inbound payload carrying the candidate CEP.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CepRequest {
    #[schema(example = "29902555")]
    pub cep: String,
}

/// Gateway-side state: the resolver port plus the end-to-end deadline.
pub struct GatewayState {
    resolver: Arc<dyn TemperatureResolver>,
    deadline: Duration,
}

impl GatewayState {
    /// Wire the gateway to a resolver with the default 60 s deadline.
    pub fn new(resolver: Arc<dyn TemperatureResolver>) -> Self {
        Self::with_deadline(resolver, GATEWAY_DEADLINE)
    }

    /// Override the end-to-end deadline (tests use short deadlines).
    pub fn with_deadline(resolver: Arc<dyn TemperatureResolver>, deadline: Duration) -> Self {
        Self { resolver, deadline }
    }
}

/// Validate a CEP and resolve it to a current temperature.
#[utoipa::path(
    post,
    path = "/",
    request_body = CepRequest,
    responses(
        (status = 200, description = "Resolved temperature", body = TemperatureResponse),
        (status = 404, description = "CEP could not be resolved", body = ErrorBody),
        (status = 422, description = "Malformed request or CEP", body = ErrorBody),
        (status = 500, description = "Resolver unreachable", body = ErrorBody)
    ),
    tags = ["gateway"],
    operation_id = "lookupCep"
)]
#[post("/")]
#[tracing::instrument(
    name = "lookup_cep",
    skip_all,
    fields(trace_id = %current_trace_id(), cep = %body.cep)
)]
pub async fn lookup_cep(
    state: web::Data<GatewayState>,
    body: web::Json<CepRequest>,
) -> ApiResult<web::Json<TemperatureResponse>> {
    let cep = Cep::parse(&body.cep).map_err(ApiError::from)?;
    let report = timeout(state.deadline, state.resolver.resolve(&cep))
        .await
        .map_err(|_| ApiError::internal("resolver call exceeded the request deadline"))?
        .map_err(ApiError::from)?;
    Ok(web::Json(report.into()))
}

/// Register gateway routes, mapping JSON decode failures to the fixed
/// 422 body instead of actix's default 400.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default().error_handler(|_, _| ApiError::invalid_zipcode().into()),
    )
    .service(lookup_cep);
}
