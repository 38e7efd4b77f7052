//! Server wiring shared by the two binaries.

pub mod config;

pub use config::{GatewayConfig, ResolverConfig};

#[cfg(feature = "metrics")]
use actix_web_prom::{PrometheusMetrics, PrometheusMetricsBuilder};

/// Prometheus middleware exposing `/metrics`. Built once per binary and
/// cloned into each worker's app.
#[cfg(feature = "metrics")]
pub fn make_metrics(prefix: &str) -> PrometheusMetrics {
    PrometheusMetricsBuilder::new(prefix)
        .endpoint("/metrics")
        .build()
        .expect("configure Prometheus metrics")
}
