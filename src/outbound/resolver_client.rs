//! Gateway-side HTTP client for the resolution service.
//!
//! The resolver has already collapsed upstream failures into its own
//! status and `{"error": ...}` body, so this adapter only separates
//! "the resolver answered" (relayable) from "the gateway's own hop
//! failed" (internal).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::api::resolver::TemperatureResponse;
use crate::domain::Cep;
use crate::domain::TemperatureReport;
use crate::domain::ports::{TemperatureResolver, TemperatureResolverError};
use crate::middleware::trace::propagate;

/// HTTP implementation of the gateway's resolver port.
pub struct ResolverHttpClient {
    client: Client,
    base_url: String,
}

impl ResolverHttpClient {
    /// Build a client with an explicit per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { client, base_url })
    }
}

#[async_trait]
impl TemperatureResolver for ResolverHttpClient {
    #[tracing::instrument(name = "call_resolver", skip(self, cep), fields(cep = %cep))]
    async fn resolve(&self, cep: &Cep) -> Result<TemperatureReport, TemperatureResolverError> {
        let url = format!("{}/{}", self.base_url, cep);
        let response = propagate(self.client.get(url))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;

        if !status.is_success() {
            return Err(TemperatureResolverError::Upstream {
                status: status.as_u16(),
                message: extract_error_message(body.as_ref()),
            });
        }

        let payload: TemperatureResponse = serde_json::from_slice(body.as_ref()).map_err(
            |error| TemperatureResolverError::Transport {
                message: format!("invalid resolver payload: {error}"),
            },
        )?;
        Ok(payload.into())
    }
}

/// Best-effort extraction of the resolver's `error` field, falling back
/// to the raw body text.
fn extract_error_message(body: &[u8]) -> String {
    #[derive(serde::Deserialize)]
    struct ErrorDto {
        error: String,
    }

    match serde_json::from_slice::<ErrorDto>(body) {
        Ok(decoded) => decoded.error,
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    }
}

fn map_transport_error(error: reqwest::Error) -> TemperatureResolverError {
    TemperatureResolverError::Transport {
        message: error.to_string(),
    }
}
