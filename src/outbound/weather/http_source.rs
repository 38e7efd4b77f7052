//! Reqwest-backed weather adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::dto::WeatherResponseDto;
use crate::domain::Celsius;
use crate::domain::ports::{WeatherSource, WeatherSourceError};
use crate::middleware::trace::propagate;

/// Weather adapter requesting the current `temperature_2m` reading from
/// `{base}/v1/forecast`.
pub struct WeatherHttpSource {
    client: Client,
    base_url: String,
}

impl WeatherHttpSource {
    /// Build an adapter with an explicit per-request timeout.
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
impl WeatherSource for WeatherHttpSource {
    #[tracing::instrument(name = "weather_lookup", skip(self))]
    async fn current_celsius(
        &self,
        latitude: &str,
        longitude: &str,
    ) -> Result<Celsius, WeatherSourceError> {
        validate_coordinate(latitude)?;
        validate_coordinate(longitude)?;

        let url = format!("{}/v1/forecast", self.base_url);
        let request = self.client.get(url).query(&[
            ("latitude", latitude),
            ("longitude", longitude),
            ("current", "temperature_2m"),
        ]);
        let response = propagate(request).send().await.map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherSourceError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        parse_reading(body.as_ref())
    }
}

/// Coordinates arrive as the directory's strings; refuse to call the
/// weather service with anything that is not a decimal number.
fn validate_coordinate(raw: &str) -> Result<(), WeatherSourceError> {
    raw.parse::<f64>()
        .map(|_| ())
        .map_err(|error| WeatherSourceError::InvalidCoordinates {
            message: format!("{error}: {raw:?}"),
        })
}

fn parse_reading(body: &[u8]) -> Result<Celsius, WeatherSourceError> {
    let decoded: WeatherResponseDto =
        serde_json::from_slice(body).map_err(|error| WeatherSourceError::Decode {
            message: format!("invalid weather JSON payload: {error}"),
        })?;
    Ok(decoded.into_celsius())
}

fn map_transport_error(error: reqwest::Error) -> WeatherSourceError {
    WeatherSourceError::Transport {
        message: error.to_string(),
    }
}
