//! Validated CEP newtype.
//!
//! A CEP is exactly eight ASCII digits. No normalisation is applied:
//! `"01310-100"` is rejected rather than stripped, matching the inbound
//! contract of both services. Both the gateway and the resolver validate
//! independently, so a caller reaching the resolver directly cannot
//! bypass the check.

use std::fmt;

use thiserror::Error;

/// Brazilian postal code, validated on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cep(String);

/// Rejection raised when a candidate CEP fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("CEP must be exactly 8 ASCII digits")]
pub struct InvalidCep;

impl Cep {
    /// Validate a raw string as a CEP.
    ///
    /// # Examples
    /// ```
    /// use cep_weather::domain::Cep;
    ///
    /// let cep = Cep::parse("29902555").expect("valid CEP");
    /// assert_eq!(cep.as_str(), "29902555");
    /// assert!(Cep::parse("2990-2555").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCep`] unless the input is exactly eight ASCII
    /// digits.
    pub fn parse(raw: &str) -> Result<Self, InvalidCep> {
        if raw.len() == 8 && raw.bytes().all(|byte| byte.is_ascii_digit()) {
            Ok(Self(raw.to_owned()))
        } else {
            Err(InvalidCep)
        }
    }

    /// Borrow the digits as a string slice.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Cep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for Cep {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
