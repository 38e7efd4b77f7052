//! CEP to temperature resolution services.
//!
//! Two HTTP services share this crate: an edge gateway that validates
//! Brazilian postal codes (CEPs) and a resolution service that turns a
//! validated CEP into a current temperature in Celsius, Fahrenheit, and
//! Kelvin by chaining a postal-code directory lookup and a weather
//! lookup. Trace context propagates across every hop via W3C
//! `traceparent` headers.

pub mod api;
pub mod doc;
pub mod domain;
pub mod middleware;
pub mod outbound;
pub mod server;

#[cfg(test)]
pub(crate) mod test_log;

pub use middleware::trace::Trace;
