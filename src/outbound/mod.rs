//! Outbound adapters implementing the domain ports over HTTP.
//!
//! Adapters are thin translators: request building, timeout, status and
//! decode mapping into port errors. They contain no business logic, and
//! each one stamps the current trace context onto its request.

pub mod directory;
pub mod resolver_client;
pub mod weather;

pub use directory::DirectoryHttpSource;
pub use resolver_client::ResolverHttpClient;
pub use weather::WeatherHttpSource;
