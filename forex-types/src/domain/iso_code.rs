//! ISO currency code, the unique key for catalog and store entries.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A normalized ISO currency code (e.g. `USD`, `EUR`).
///
/// Stored uppercase; comparison and ordering are on the normalized form, so
/// catalogs and snapshots keyed by `IsoCode` iterate deterministically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IsoCode(String);

impl IsoCode {
    /// Creates a code from raw input, trimming and uppercasing.
    ///
    /// # Validation
    /// - Must be non-empty after trimming
    /// - Must be ASCII alphanumeric
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::InvalidIsoCode(raw.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the normalized code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IsoCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for IsoCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for IsoCode {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<IsoCode> for String {
    fn from(code: IsoCode) -> Self {
        code.0
    }
}
