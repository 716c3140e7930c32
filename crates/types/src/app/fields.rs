// Path: crates/types/src/app/fields.rs

//! Validated scalar fields shared by account records and instructions.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The maximum UTF-8 encoded length of any entity name.
pub const MAX_NAME_LEN: usize = 28;

/// The inclusive upper bound of an address risk score.
pub const MAX_RISK: u8 = 10;

/// An entity name of at most [`MAX_NAME_LEN`] UTF-8 bytes.
///
/// Over-long names are rejected, never truncated.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Name(String);

impl Name {
    /// Validates and wraps a name.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.len() > MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong {
                len: name.len(),
                max: MAX_NAME_LEN,
            });
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the UTF-8 encoded length.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` for the empty name.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl TryFrom<String> for Name {
    type Error = ValidationError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Name {
    type Error = ValidationError;
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.0
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// A risk score in `0..=10`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Debug, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RiskScore(u8);

impl RiskScore {
    /// The lowest score.
    pub const MIN: RiskScore = RiskScore(0);
    /// The highest score.
    pub const MAX: RiskScore = RiskScore(MAX_RISK);

    /// Returns the raw score.
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for RiskScore {
    type Error = ValidationError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match u8::try_from(value) {
            Ok(v) if v <= MAX_RISK => Ok(Self(v)),
            _ => Err(ValidationError::RiskOutOfRange(value)),
        }
    }
}

impl TryFrom<u8> for RiskScore {
    type Error = ValidationError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::try_from(i64::from(value))
    }
}

impl From<RiskScore> for u8 {
    fn from(r: RiskScore) -> Self {
        r.0
    }
}

impl fmt::Display for RiskScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_boundary() {
        assert!(Name::new("").is_ok());
        assert!(Name::new("a".repeat(28)).is_ok());
        assert_eq!(
            Name::new("a".repeat(29)),
            Err(ValidationError::NameTooLong { len: 29, max: 28 })
        );
    }

    #[test]
    fn name_limit_counts_bytes_not_chars() {
        // 14 two-byte characters fit exactly; one more does not.
        assert!(Name::new("é".repeat(14)).is_ok());
        assert_eq!(
            Name::new("é".repeat(15)),
            Err(ValidationError::NameTooLong { len: 30, max: 28 })
        );
    }

    #[test]
    fn risk_boundary() {
        assert_eq!(RiskScore::try_from(0i64).map(u8::from), Ok(0));
        assert_eq!(RiskScore::try_from(10i64).map(u8::from), Ok(10));
        assert_eq!(
            RiskScore::try_from(-1i64),
            Err(ValidationError::RiskOutOfRange(-1))
        );
        assert_eq!(
            RiskScore::try_from(11i64),
            Err(ValidationError::RiskOutOfRange(11))
        );
        assert_eq!(
            RiskScore::try_from(255u8),
            Err(ValidationError::RiskOutOfRange(255))
        );
    }

    #[test]
    fn name_deserialization_validates() {
        let ok: Result<Name, _> = serde_json::from_str("\"hapi.one\"");
        assert!(ok.is_ok());
        let too_long = format!("\"{}\"", "x".repeat(29));
        let err: Result<Name, _> = serde_json::from_str(&too_long);
        assert!(err.is_err());
    }
}
