//! Current-weather adapter (Open-Meteo).

mod dto;
mod http_source;

pub use http_source::WeatherHttpSource;
