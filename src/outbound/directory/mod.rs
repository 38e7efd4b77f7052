//! Postal-code directory adapter (AwesomeAPI CEP).

mod dto;
mod http_source;

pub use http_source::DirectoryHttpSource;
