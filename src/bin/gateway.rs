//! Edge gateway binary: validates CEPs and forwards them to the
//! resolution service.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use cep_weather::Trace;
use cep_weather::api::gateway::{self, GatewayState};
use cep_weather::api::health::{HealthState, live, ready};
use cep_weather::doc::gateway_api_doc;
use cep_weather::domain::ports::TemperatureResolver;
use cep_weather::outbound::ResolverHttpClient;
use cep_weather::server::GatewayConfig;
use cep_weather::server::config::UPSTREAM_TIMEOUT;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = GatewayConfig::from_env().map_err(std::io::Error::other)?;
    let resolver: Arc<dyn TemperatureResolver> = Arc::new(
        ResolverHttpClient::new(config.resolver_base_url.clone(), UPSTREAM_TIMEOUT)
            .map_err(std::io::Error::other)?,
    );
    let state = web::Data::new(GatewayState::new(resolver));

    let health_state = web::Data::new(HealthState::new());
    // Clone for server factory so readiness probe remains accessible.
    let server_health_state = health_state.clone();

    #[cfg(feature = "metrics")]
    let prometheus = cep_weather::server::make_metrics("cep_gateway");

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .configure(gateway::configure)
            .service(ready)
            .service(live)
            .service(gateway_api_doc);
        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());
        app
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    info!(addr = %config.bind_addr, resolver = %config.resolver_base_url, "gateway listening");
    server.run().await
}
