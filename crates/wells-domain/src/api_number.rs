//! API number - the natural key of a well record

use serde::{Deserialize, Serialize};
use std::fmt;

/// API number of a well (e.g. `30-015-12345`)
///
/// Treated as an opaque identifier: no structure is assumed beyond
/// uniqueness. Surrounding whitespace is removed on construction.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiNumber(String);

impl ApiNumber {
    /// Parse an API number, rejecting empty input
    ///
    /// # Examples
    ///
    /// ```
    /// use wells_domain::ApiNumber;
    ///
    /// let api = ApiNumber::parse("  30-015-20001 ").unwrap();
    /// assert_eq!(api.as_str(), "30-015-20001");
    /// assert!(ApiNumber::parse("   ").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, String> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("API number cannot be empty".to_string());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Borrow the identifier as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ApiNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
