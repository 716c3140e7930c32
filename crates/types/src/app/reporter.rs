// Path: crates/types/src/app/reporter.rs

//! The reporter record. A reporter is keyed by its public key, not its name.

use super::{AccountType, Name, ReporterType};
use crate::codec::{expect_account_type, Account, Field, FieldKind, Layout, RawRecord, Reader, Writer};
use crate::error::CodecError;
use serde::{Deserialize, Serialize};

/// The reporter record exactly as stored on chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReporterRaw {
    /// Always [`AccountType::Reporter`] for a valid record.
    pub account_type: u8,
    /// The raw [`ReporterType`].
    pub reporter_type: u8,
    /// The reporter name.
    pub name: String,
}

impl RawRecord for ReporterRaw {
    const LAYOUT: Layout = Layout(&[
        Field::new("account_type", FieldKind::U8),
        Field::new("reporter_type", FieldKind::U8),
        Field::new("name", FieldKind::Name),
    ]);

    fn write(&self, w: &mut Writer) {
        w.put_u8(self.account_type);
        w.put_u8(self.reporter_type);
        w.put_name(&self.name);
    }

    fn read(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            account_type: r.read_u8()?,
            reporter_type: r.read_u8()?,
            name: r.read_name("name")?,
        })
    }
}

/// A reporter and its permission level.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reporter {
    /// The permission level.
    pub reporter_type: ReporterType,
    /// The reporter name.
    pub name: Name,
}

impl Reporter {
    /// Creates a reporter record.
    pub fn new(reporter_type: ReporterType, name: Name) -> Self {
        Self {
            reporter_type,
            name,
        }
    }
}

impl Account for Reporter {
    const ACCOUNT_TYPE: AccountType = AccountType::Reporter;
    type Raw = ReporterRaw;

    fn to_raw(&self) -> ReporterRaw {
        ReporterRaw {
            account_type: Self::ACCOUNT_TYPE.into(),
            reporter_type: self.reporter_type.into(),
            name: self.name.to_string(),
        }
    }

    fn from_raw(raw: ReporterRaw) -> Result<Self, CodecError> {
        expect_account_type(raw.account_type, Self::ACCOUNT_TYPE)?;
        let reporter_type = ReporterType::try_from(raw.reporter_type).map_err(|_| {
            CodecError::InvalidDiscriminant {
                field: "reporter_type",
                value: raw.reporter_type,
            }
        })?;
        Ok(Self {
            reporter_type,
            name: super::decoded_name("name", raw.name)?,
        })
    }
}
