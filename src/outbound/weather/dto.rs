//! DTO for decoding weather responses.
//!
//! Only the current reading is requested, so only `current` is decoded;
//! the rest of the forecast envelope is ignored.

use serde::Deserialize;

use crate::domain::Celsius;

#[derive(Debug, Deserialize)]
pub(super) struct WeatherResponseDto {
    pub(super) current: CurrentDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct CurrentDto {
    pub(super) temperature_2m: f64,
}

impl WeatherResponseDto {
    pub(super) fn into_celsius(self) -> Celsius {
        Celsius(self.current.temperature_2m)
    }
}
