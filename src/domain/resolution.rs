//! Two-hop resolution service: directory lookup, then weather.
//!
//! The weather call depends on the lookup's coordinates, so the calls
//! are strictly sequential. Every port failure collapses into
//! [`ResolutionError::ZipcodeNotFound`]; upstream detail is logged here
//! and never surfaced to callers.

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use super::cep::Cep;
use super::ports::{CepDirectory, WeatherSource};
use super::temperature::TemperatureReport;

/// Outcome of a failed resolution.
///
/// The single variant is deliberate: a missing directory record, an
/// unreachable upstream, and a garbled weather payload all present to
/// the client as an unknown zipcode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolutionError {
    #[error("can not find zipcode")]
    ZipcodeNotFound,
}

/// Orchestrates the directory and weather ports for one CEP.
pub struct ResolutionService<D: ?Sized, W: ?Sized> {
    directory: Arc<D>,
    weather: Arc<W>,
}

impl<D: ?Sized, W: ?Sized> Clone for ResolutionService<D, W> {
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
            weather: Arc::clone(&self.weather),
        }
    }
}

/// Trait-object form used as shared actix application state.
pub type SharedResolutionService = ResolutionService<dyn CepDirectory, dyn WeatherSource>;

impl<D: ?Sized, W: ?Sized> ResolutionService<D, W> {
    /// Create a service over the given port implementations.
    pub fn new(directory: Arc<D>, weather: Arc<W>) -> Self {
        Self { directory, weather }
    }
}

impl<D, W> ResolutionService<D, W>
where
    D: CepDirectory + ?Sized,
    W: WeatherSource + ?Sized,
{
    /// Resolve a validated CEP to a temperature report.
    ///
    /// # Errors
    ///
    /// Returns [`ResolutionError::ZipcodeNotFound`] if either upstream
    /// call fails for any reason.
    #[tracing::instrument(name = "resolution", skip(self, cep), fields(cep = %cep))]
    pub async fn resolve(&self, cep: &Cep) -> Result<TemperatureReport, ResolutionError> {
        let address = self.directory.lookup(cep).await.map_err(|error| {
            warn!(%error, "directory lookup failed");
            ResolutionError::ZipcodeNotFound
        })?;

        let reading = self
            .weather
            .current_celsius(&address.latitude, &address.longitude)
            .await
            .map_err(|error| {
                warn!(%error, city = %address.city, "weather lookup failed");
                ResolutionError::ZipcodeNotFound
            })?;

        Ok(TemperatureReport::from_celsius(address.city, reading))
    }
}

#[cfg(test)]
mod tests {
    //! Orchestration coverage with mocked ports.

    use super::*;
    use crate::domain::ports::{
        CepAddress, CepDirectoryError, MockCepDirectory, MockWeatherSource, WeatherSourceError,
    };
    use crate::domain::temperature::Celsius;
    use rstest::rstest;

    fn cep() -> Cep {
        Cep::parse("29902555").expect("valid CEP")
    }

    fn vitoria() -> CepAddress {
        CepAddress {
            city: "Vitória".to_owned(),
            latitude: "-20.31".to_owned(),
            longitude: "-40.33".to_owned(),
        }
    }

    fn service(
        directory: MockCepDirectory,
        weather: MockWeatherSource,
    ) -> ResolutionService<MockCepDirectory, MockWeatherSource> {
        ResolutionService::new(Arc::new(directory), Arc::new(weather))
    }

    #[tokio::test]
    async fn resolves_city_and_converts_units() {
        let mut directory = MockCepDirectory::new();
        directory
            .expect_lookup()
            .withf(|cep| cep.as_str() == "29902555")
            .times(1)
            .returning(|_| Ok(vitoria()));

        let mut weather = MockWeatherSource::new();
        weather
            .expect_current_celsius()
            .withf(|lat, lon| lat == "-20.31" && lon == "-40.33")
            .times(1)
            .returning(|_, _| Ok(Celsius(28.5)));

        let report = service(directory, weather)
            .resolve(&cep())
            .await
            .expect("resolution should succeed");

        assert_eq!(report.city, "Vitória");
        assert_eq!(report.celsius, 28.5);
        assert_eq!(report.fahrenheit, 28.5 * 1.8 + 32.0);
        assert_eq!(report.kelvin, 28.5 + 273.15);
    }

    #[rstest]
    #[case::not_found(CepDirectoryError::NotFound)]
    #[case::transport(CepDirectoryError::Transport { message: "connection refused".to_owned() })]
    #[case::upstream(CepDirectoryError::UpstreamStatus { status: 500 })]
    #[case::decode(CepDirectoryError::Decode { message: "not JSON".to_owned() })]
    #[tokio::test]
    async fn directory_failure_short_circuits_without_weather_call(
        #[case] error: CepDirectoryError,
    ) {
        let mut directory = MockCepDirectory::new();
        directory
            .expect_lookup()
            .times(1)
            .returning(move |_| Err(error.clone()));

        // No expectations: any weather call panics the mock.
        let weather = MockWeatherSource::new();

        let outcome = service(directory, weather).resolve(&cep()).await;
        assert_eq!(outcome, Err(ResolutionError::ZipcodeNotFound));
    }

    #[rstest]
    #[case::invalid_coordinates(WeatherSourceError::InvalidCoordinates {
        message: "invalid float literal".to_owned(),
    })]
    #[case::transport(WeatherSourceError::Transport { message: "timed out".to_owned() })]
    #[case::upstream(WeatherSourceError::UpstreamStatus { status: 503 })]
    #[case::decode(WeatherSourceError::Decode { message: "truncated body".to_owned() })]
    #[tokio::test]
    async fn weather_failure_still_reports_zipcode_not_found(#[case] error: WeatherSourceError) {
        let mut directory = MockCepDirectory::new();
        directory.expect_lookup().times(1).returning(|_| Ok(vitoria()));

        let mut weather = MockWeatherSource::new();
        weather
            .expect_current_celsius()
            .times(1)
            .returning(move |_, _| Err(error.clone()));

        let outcome = service(directory, weather).resolve(&cep()).await;
        assert_eq!(outcome, Err(ResolutionError::ZipcodeNotFound));
    }

    #[tokio::test]
    async fn repeated_resolution_yields_identical_reports() {
        let mut directory = MockCepDirectory::new();
        directory.expect_lookup().times(2).returning(|_| Ok(vitoria()));

        let mut weather = MockWeatherSource::new();
        weather
            .expect_current_celsius()
            .times(2)
            .returning(|_, _| Ok(Celsius(17.2)));

        let service = service(directory, weather);
        let first = service.resolve(&cep()).await.expect("first resolution");
        let second = service.resolve(&cep()).await.expect("second resolution");
        assert_eq!(first, second);
    }
}
