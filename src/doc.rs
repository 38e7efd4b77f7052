//! OpenAPI documents, one per binary, each served on `/api-doc.json`.

use actix_web::{get, web};
use utoipa::OpenApi;

/// Edge gateway API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CEP Weather Gateway",
        description = "Validates a CEP and resolves it to a current temperature."
    ),
    paths(
        crate::api::gateway::lookup_cep,
        crate::api::health::live,
        crate::api::health::ready,
    ),
    components(schemas(
        crate::api::gateway::CepRequest,
        crate::api::resolver::TemperatureResponse,
        crate::api::error::ErrorBody,
    ))
)]
pub struct GatewayApiDoc;

/// Resolution service API surface.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CEP Weather Resolver",
        description = "Resolves a validated CEP via directory and weather lookups."
    ),
    paths(
        crate::api::resolver::resolve,
        crate::api::health::live,
        crate::api::health::ready,
    ),
    components(schemas(
        crate::api::resolver::TemperatureResponse,
        crate::api::error::ErrorBody,
    ))
)]
pub struct ResolverApiDoc;

/// Serve the gateway document.
#[get("/api-doc.json")]
pub async fn gateway_api_doc() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(GatewayApiDoc::openapi())
}

/// Serve the resolver document. Register this before the `/{cep}` route
/// so the path is not captured as a CEP candidate.
#[get("/api-doc.json")]
pub async fn resolver_api_doc() -> web::Json<utoipa::openapi::OpenApi> {
    web::Json(ResolverApiDoc::openapi())
}
