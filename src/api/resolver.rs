//! Resolution service HTTP handler.
//!
//! ```text
//! GET /{cep}
//! ```
//!
//! Re-validates the CEP even though the gateway already did; this
//! service is reachable on its own port and must not trust its caller.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::{ApiError, ApiResult, ErrorBody};
use crate::domain::{Cep, SharedResolutionService, TemperatureReport};
use crate::middleware::trace::current_trace_id;

/// Success payload: one temperature in all three scales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TemperatureResponse {
    #[schema(example = "Vitória")]
    pub city: String,
    #[serde(rename = "temp_C")]
    pub temp_c: f64,
    #[serde(rename = "temp_F")]
    pub temp_f: f64,
    #[serde(rename = "temp_K")]
    pub temp_k: f64,
}

impl From<TemperatureReport> for TemperatureResponse {
    fn from(report: TemperatureReport) -> Self {
        Self {
            city: report.city,
            temp_c: report.celsius,
            temp_f: report.fahrenheit,
            temp_k: report.kelvin,
        }
    }
}

impl From<TemperatureResponse> for TemperatureReport {
    fn from(response: TemperatureResponse) -> Self {
        Self {
            city: response.city,
            celsius: response.temp_c,
            fahrenheit: response.temp_f,
            kelvin: response.temp_k,
        }
    }
}

/// Resolve one CEP to a current temperature.
#[utoipa::path(
    get,
    path = "/{cep}",
    params(("cep" = String, Path, description = "Eight-digit CEP")),
    responses(
        (status = 200, description = "Resolved temperature", body = TemperatureResponse),
        (status = 404, description = "CEP could not be resolved", body = ErrorBody),
        (status = 422, description = "Malformed CEP", body = ErrorBody)
    ),
    tags = ["resolution"],
    operation_id = "resolveCep"
)]
#[get("/{cep}")]
#[tracing::instrument(
    name = "resolve_cep",
    skip_all,
    fields(trace_id = %current_trace_id(), cep = %path)
)]
pub async fn resolve(
    path: web::Path<String>,
    service: web::Data<SharedResolutionService>,
) -> ApiResult<web::Json<TemperatureResponse>> {
    let cep = Cep::parse(&path).map_err(ApiError::from)?;
    let report = service.resolve(&cep).await?;
    Ok(web::Json(report.into()))
}

/// Register resolver routes on an actix app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(resolve);
}

#[cfg(test)]
mod tests {
    //! Handler-level coverage with mocked ports.

    use std::sync::Arc;

    use super::*;
    use crate::domain::ResolutionService;
    use crate::domain::ports::{
        CepAddress, CepDirectory, CepDirectoryError, MockCepDirectory, MockWeatherSource,
        WeatherSource, WeatherSourceError,
    };
    use crate::domain::temperature::Celsius;
    use actix_web::{App, http::StatusCode, test};

    fn shared(
        directory: MockCepDirectory,
        weather: MockWeatherSource,
    ) -> web::Data<SharedResolutionService> {
        let directory: Arc<dyn CepDirectory> = Arc::new(directory);
        let weather: Arc<dyn WeatherSource> = Arc::new(weather);
        web::Data::new(ResolutionService::new(directory, weather))
    }

    async fn call(
        service: web::Data<SharedResolutionService>,
        uri: &str,
    ) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(App::new().app_data(service).configure(configure)).await;
        test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await
    }

    #[actix_web::test]
    async fn resolves_valid_cep_to_temperature_payload() {
        let mut directory = MockCepDirectory::new();
        directory.expect_lookup().times(1).returning(|_| {
            Ok(CepAddress {
                city: "Vitória".to_owned(),
                latitude: "-20.31".to_owned(),
                longitude: "-40.33".to_owned(),
            })
        });
        let mut weather = MockWeatherSource::new();
        weather
            .expect_current_celsius()
            .times(1)
            .returning(|_, _| Ok(Celsius(28.5)));

        let res = call(shared(directory, weather), "/29902555").await;
        assert_eq!(res.status(), StatusCode::OK);

        let body: TemperatureResponse = test::read_body_json(res).await;
        assert_eq!(body.city, "Vitória");
        assert_eq!(body.temp_c, 28.5);
        assert_eq!(body.temp_f, 28.5 * 1.8 + 32.0);
        assert_eq!(body.temp_k, 28.5 + 273.15);
    }

    #[actix_web::test]
    async fn invalid_cep_is_422_with_no_upstream_call() {
        // No expectations means any port call panics the mock.
        let res = call(
            shared(MockCepDirectory::new(), MockWeatherSource::new()),
            "/123",
        )
        .await;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body, serde_json::json!({ "error": "invalid zipcode" }));
    }

    #[actix_web::test]
    async fn unknown_cep_is_404_with_fixed_body() {
        let mut directory = MockCepDirectory::new();
        directory
            .expect_lookup()
            .times(1)
            .returning(|_| Err(CepDirectoryError::NotFound));

        let res = call(shared(directory, MockWeatherSource::new()), "/99999999").await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body, serde_json::json!({ "error": "can not find zipcode" }));
    }

    #[actix_web::test]
    async fn weather_failure_is_also_404() {
        let mut directory = MockCepDirectory::new();
        directory.expect_lookup().times(1).returning(|_| {
            Ok(CepAddress {
                city: "Vitória".to_owned(),
                latitude: "-20.31".to_owned(),
                longitude: "-40.33".to_owned(),
            })
        });
        let mut weather = MockWeatherSource::new();
        weather.expect_current_celsius().times(1).returning(|_, _| {
            Err(WeatherSourceError::UpstreamStatus { status: 503 })
        });

        let res = call(shared(directory, weather), "/29902555").await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body, serde_json::json!({ "error": "can not find zipcode" }));
    }

    #[actix_web::test]
    async fn handler_span_records_trace_id() {
        use crate::middleware::trace::{TRACEPARENT, Trace};

        let (logs, _guard) = crate::test_log::capture_spans();

        let mut directory = MockCepDirectory::new();
        directory
            .expect_lookup()
            .times(1)
            .returning(|_| Err(CepDirectoryError::NotFound));
        let service = shared(directory, MockWeatherSource::new());
        let app =
            test::init_service(App::new().app_data(service).wrap(Trace).configure(configure))
                .await;

        let req = test::TestRequest::get()
            .uri("/29902555")
            .insert_header((
                TRACEPARENT,
                "00-4bf92f3577b34da6a3ce929d0e0e4736-00f067aa0ba902b7-01",
            ))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let output = logs.contents();
        assert!(output.contains("resolve_cep"), "handler span missing: {output}");
        assert!(
            output.contains("4bf92f3577b34da6a3ce929d0e0e4736"),
            "trace_id field missing: {output}"
        );
    }

    #[actix_web::test]
    async fn wire_payload_uses_upper_case_scale_suffixes() {
        let mut directory = MockCepDirectory::new();
        directory.expect_lookup().times(1).returning(|_| {
            Ok(CepAddress {
                city: "Vitória".to_owned(),
                latitude: "-20.31".to_owned(),
                longitude: "-40.33".to_owned(),
            })
        });
        let mut weather = MockWeatherSource::new();
        weather
            .expect_current_celsius()
            .times(1)
            .returning(|_, _| Ok(Celsius(0.0)));

        let res = call(shared(directory, weather), "/29902555").await;
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(
            body,
            serde_json::json!({
                "city": "Vitória",
                "temp_C": 0.0,
                "temp_F": 32.0,
                "temp_K": 273.15,
            })
        );
    }
}
