//! Transport-agnostic core: CEP validation, unit conversion, driven
//! ports, and the two-hop resolution service.

pub mod cep;
pub mod ports;
pub mod resolution;
pub mod temperature;

pub use cep::{Cep, InvalidCep};
pub use resolution::{ResolutionError, ResolutionService, SharedResolutionService};
pub use temperature::{Celsius, TemperatureReport};
