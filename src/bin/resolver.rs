//! Resolution service binary: CEP → directory lookup → weather lookup.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use cep_weather::Trace;
use cep_weather::api::health::{HealthState, live, ready};
use cep_weather::api::resolver;
use cep_weather::doc::resolver_api_doc;
use cep_weather::domain::ResolutionService;
use cep_weather::domain::ports::{CepDirectory, WeatherSource};
use cep_weather::outbound::{DirectoryHttpSource, WeatherHttpSource};
use cep_weather::server::ResolverConfig;
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

    let config = ResolverConfig::from_env().map_err(std::io::Error::other)?;
    let directory: Arc<dyn CepDirectory> = Arc::new(
        DirectoryHttpSource::new(config.directory_base_url.clone(), UPSTREAM_TIMEOUT)
            .map_err(std::io::Error::other)?,
    );
    let weather: Arc<dyn WeatherSource> = Arc::new(
        WeatherHttpSource::new(config.weather_base_url.clone(), UPSTREAM_TIMEOUT)
            .map_err(std::io::Error::other)?,
    );
    let service = web::Data::new(ResolutionService::new(directory, weather));

    let health_state = web::Data::new(HealthState::new());
    // Clone for server factory so readiness probe remains accessible.
    let server_health_state = health_state.clone();

    #[cfg(feature = "metrics")]
    let prometheus = cep_weather::server::make_metrics("cep_resolver");

    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(service.clone())
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .service(ready)
            .service(live)
            // Doc route must precede the `/{cep}` capture.
            .service(resolver_api_doc)
            .configure(resolver::configure);
        #[cfg(feature = "metrics")]
        let app = app.wrap(prometheus.clone());
        app
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    info!(addr = %config.bind_addr, "resolver listening");
    server.run().await
}
