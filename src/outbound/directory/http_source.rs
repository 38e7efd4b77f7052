//! Reqwest-backed directory adapter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use super::dto::DirectoryResponseDto;
use crate::domain::Cep;
use crate::domain::ports::{CepAddress, CepDirectory, CepDirectoryError};
use crate::middleware::trace::propagate;

/// Directory adapter issuing one GET per lookup against
/// `{base}/json/{cep}`.
pub struct DirectoryHttpSource {
    client: Client,
    base_url: String,
}

impl DirectoryHttpSource {
    /// Build an adapter with an explicit per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: trimmed(base_url),
        })
    }
}

fn trimmed(base_url: impl Into<String>) -> String {
    let mut base_url = base_url.into();
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}

#[async_trait]
impl CepDirectory for DirectoryHttpSource {
    #[tracing::instrument(name = "directory_lookup", skip(self, cep), fields(cep = %cep))]
    async fn lookup(&self, cep: &Cep) -> Result<CepAddress, CepDirectoryError> {
        let url = format!("{}/json/{}", self.base_url, cep);
        let response = propagate(self.client.get(url))
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(CepDirectoryError::NotFound);
        }
        if !status.is_success() {
            return Err(CepDirectoryError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        parse_address(body.as_ref())
    }
}

fn parse_address(body: &[u8]) -> Result<CepAddress, CepDirectoryError> {
    let decoded: DirectoryResponseDto =
        serde_json::from_slice(body).map_err(|error| CepDirectoryError::Decode {
            message: format!("invalid directory JSON payload: {error}"),
        })?;
    decoded.into_address()
}

fn map_transport_error(error: reqwest::Error) -> CepDirectoryError {
    CepDirectoryError::Transport {
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    //! Non-network coverage for decode and mapping helpers.

    use super::*;

    #[test]
    fn parses_directory_payload_into_address() {
        let body = r#"{
            "cep": "29902555",
            "address_type": "Rua",
            "address_name": "dos Dourados",
            "state": "ES",
            "district": "Interlagos",
            "lat": "-19.3926107",
            "lng": "-40.0584979",
            "city": "Linhares",
            "city_ibge": "3203205",
            "ddd": "27"
        }"#;

        let address = parse_address(body.as_bytes()).expect("payload should decode");
        assert_eq!(address.city, "Linhares");
        assert_eq!(address.latitude, "-19.3926107");
        assert_eq!(address.longitude, "-40.0584979");
    }

    #[test]
    fn empty_cep_echo_is_not_found() {
        // 200-shaped error body really returned by the upstream.
        let body = r#"{"status": 404, "message": "CEP não encontrado"}"#;
        let error = parse_address(body.as_bytes()).expect_err("decode should fail");
        assert_eq!(error, CepDirectoryError::NotFound);
    }

    #[test]
    fn malformed_json_is_decode_error() {
        let error = parse_address(b"not json").expect_err("decode should fail");
        assert!(matches!(error, CepDirectoryError::Decode { .. }));
    }

    #[test]
    fn base_url_trailing_slash_is_normalised() {
        let source = DirectoryHttpSource::new(
            "https://cep.awesomeapi.com.br/",
            Duration::from_secs(10),
        )
        .expect("client should build");
        assert_eq!(source.base_url, "https://cep.awesomeapi.com.br");
    }
}
