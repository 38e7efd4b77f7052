//! DTO for decoding directory responses.
//!
//! The upstream answers 200 with an error-shaped body for unknown CEPs;
//! the only reliable success signal is a non-empty `cep` echo field.

use serde::Deserialize;

use crate::domain::ports::{CepAddress, CepDirectoryError};

#[derive(Debug, Deserialize)]
pub(super) struct DirectoryResponseDto {
    #[serde(default)]
    pub(super) cep: String,
    #[serde(default)]
    pub(super) city: String,
    #[serde(default)]
    pub(super) lat: String,
    #[serde(default)]
    pub(super) lng: String,
}

impl DirectoryResponseDto {
    pub(super) fn into_address(self) -> Result<CepAddress, CepDirectoryError> {
        if self.cep.is_empty() {
            return Err(CepDirectoryError::NotFound);
        }
        Ok(CepAddress {
            city: self.city,
            latitude: self.lat,
            longitude: self.lng,
        })
    }
}
