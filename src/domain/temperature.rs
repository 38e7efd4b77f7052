//! Temperature unit conversion.
//!
//! The weather source reports a single authoritative Celsius reading;
//! Fahrenheit and Kelvin are always derived from it, never measured or
//! rounded independently.

/// Celsius reading returned by the weather source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Celsius(pub f64);

/// Resolved temperature for a city, in all three scales.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureReport {
    pub city: String,
    pub celsius: f64,
    pub fahrenheit: f64,
    pub kelvin: f64,
}

impl TemperatureReport {
    /// Derive the full report from one Celsius reading.
    ///
    /// # Examples
    /// ```
    /// use cep_weather::domain::{Celsius, TemperatureReport};
    ///
    /// let report = TemperatureReport::from_celsius("Vitória", Celsius(0.0));
    /// assert_eq!(report.fahrenheit, 32.0);
    /// assert_eq!(report.kelvin, 273.15);
    /// ```
    pub fn from_celsius(city: impl Into<String>, reading: Celsius) -> Self {
        let Celsius(celsius) = reading;
        Self {
            city: city.into(),
            celsius,
            fahrenheit: celsius * 1.8 + 32.0,
            kelvin: celsius + 273.15,
        }
    }
}
