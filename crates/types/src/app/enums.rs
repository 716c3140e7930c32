// Path: crates/types/src/app/enums.rs

//! The single-byte enums stored in account records.
//!
//! Each enum converts from its raw `u8` with `TryFrom`, so an out-of-range value
//! cannot be represented past the decode boundary.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The leading discriminant of every account record.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[repr(u8)]
pub enum AccountType {
    /// Allocated but never written.
    Uninitialized = 0,
    /// A [`Community`](crate::app::Community) record.
    Community = 1,
    /// A [`Network`](crate::app::Network) record.
    Network = 2,
    /// A [`Reporter`](crate::app::Reporter) record.
    Reporter = 3,
    /// A [`Case`](crate::app::Case) record.
    Case = 4,
    /// An [`Address`](crate::app::Address) record.
    Address = 5,
}

impl AccountType {
    /// All account types in discriminant order.
    pub const ALL: [AccountType; 6] = [
        Self::Uninitialized,
        Self::Community,
        Self::Network,
        Self::Reporter,
        Self::Case,
        Self::Address,
    ];

    /// The human-readable name of the account type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Uninitialized => "Uninitialized",
            Self::Community => "Community",
            Self::Network => "Network",
            Self::Reporter => "Reporter",
            Self::Case => "Case",
            Self::Address => "Address",
        }
    }
}

impl TryFrom<u8> for AccountType {
    type Error = u8;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Uninitialized),
            1 => Ok(Self::Community),
            2 => Ok(Self::Network),
            3 => Ok(Self::Reporter),
            4 => Ok(Self::Case),
            5 => Ok(Self::Address),
            other => Err(other),
        }
    }
}

impl From<AccountType> for u8 {
    fn from(t: AccountType) -> Self {
        t as u8
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AccountType {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| unknown_name("account type", s))
    }
}

/// The permission level of a reporter.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum ReporterType {
    /// May not report anything.
    #[default]
    Inactive = 0,
    /// May report addresses.
    Tracer = 1,
    /// May report addresses and open cases.
    Full = 2,
    /// May report addresses, open cases and act on behalf of the community.
    Authority = 3,
}

impl ReporterType {
    /// All reporter types in discriminant order.
    pub const ALL: [ReporterType; 4] = [Self::Inactive, Self::Tracer, Self::Full, Self::Authority];

    /// The human-readable name of the reporter type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inactive => "Inactive",
            Self::Tracer => "Tracer",
            Self::Full => "Full",
            Self::Authority => "Authority",
        }
    }

    /// Whether this reporter may create and update cases.
    pub fn can_report_cases(self) -> bool {
        matches!(self, Self::Full | Self::Authority)
    }

    /// Whether this reporter may create and update addresses.
    pub fn can_report_addresses(self) -> bool {
        !matches!(self, Self::Inactive)
    }
}

impl TryFrom<u8> for ReporterType {
    type Error = ValidationError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(ValidationError::InvalidReporterType(value))
    }
}

impl From<ReporterType> for u8 {
    fn from(t: ReporterType) -> Self {
        t as u8
    }
}

impl fmt::Display for ReporterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReporterType {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| unknown_name("reporter type", s))
    }
}

/// The lifecycle status of a case.
#[derive(
    Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default, Serialize, Deserialize,
)]
#[repr(u8)]
pub enum CaseStatus {
    /// Under investigation.
    #[default]
    Open = 0,
    /// Investigation finished.
    Closed = 1,
}

impl CaseStatus {
    /// The human-readable name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
        }
    }
}

impl TryFrom<u8> for CaseStatus {
    type Error = ValidationError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Open),
            1 => Ok(Self::Closed),
            other => Err(ValidationError::InvalidStatus(other)),
        }
    }
}

impl From<CaseStatus> for u8 {
    fn from(s: CaseStatus) -> Self {
        s as u8
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseStatus {
    type Err = ValidationError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            _ => Err(unknown_name("case status", s)),
        }
    }
}

pub(crate) fn unknown_name(kind: &'static str, value: &str) -> ValidationError {
    ValidationError::UnknownName {
        kind,
        value: value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_accepts_only_defined_values() {
        assert_eq!(CaseStatus::try_from(0), Ok(CaseStatus::Open));
        assert_eq!(CaseStatus::try_from(1), Ok(CaseStatus::Closed));
        for raw in 2..=u8::MAX {
            assert_eq!(
                CaseStatus::try_from(raw),
                Err(ValidationError::InvalidStatus(raw))
            );
        }
    }

    #[test]
    fn reporter_type_permissions() {
        assert!(!ReporterType::Inactive.can_report_addresses());
        assert!(ReporterType::Tracer.can_report_addresses());
        assert!(!ReporterType::Tracer.can_report_cases());
        assert!(ReporterType::Full.can_report_cases());
        assert!(ReporterType::Authority.can_report_cases());
        assert_eq!(
            ReporterType::try_from(4),
            Err(ValidationError::InvalidReporterType(4))
        );
    }

    #[test]
    fn names_parse_back() {
        for t in ReporterType::ALL {
            assert_eq!(t.to_string().parse::<ReporterType>(), Ok(t));
        }
        assert_eq!("closed".parse::<CaseStatus>(), Ok(CaseStatus::Closed));
        assert_eq!(AccountType::try_from(6), Err(6));
        assert_eq!(AccountType::Address.to_string(), "Address");
        for t in AccountType::ALL {
            assert_eq!(t.as_str().parse::<AccountType>(), Ok(t));
        }
        assert_eq!(
            "ledger".parse::<AccountType>(),
            Err(ValidationError::UnknownName {
                kind: "account type",
                value: "ledger".into()
            })
        );
    }
}
