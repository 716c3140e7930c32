// Path: crates/types/src/app/address.rs

//! The address record: a flagged address on a tracked network.

use super::{index_to_category, AccountType, Category, RiskScore};
use crate::codec::{expect_account_type, Account, Field, FieldKind, Layout, RawRecord, Reader, Writer};
use crate::error::CodecError;
use serde::{Deserialize, Serialize};

/// The address record exactly as stored on chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressRaw {
    /// Always [`AccountType::Address`] for a valid record.
    pub account_type: u8,
    /// Risk score, `0..=10`.
    pub risk: u8,
    /// The id of the case the address belongs to.
    pub case_id: u64,
    /// Index into the category table.
    pub category: u8,
}

impl RawRecord for AddressRaw {
    const LAYOUT: Layout = Layout(&[
        Field::new("account_type", FieldKind::U8),
        Field::new("risk", FieldKind::U8),
        Field::new("case_id", FieldKind::U64),
        Field::new("category", FieldKind::U8),
    ]);

    fn write(&self, w: &mut Writer) {
        w.put_u8(self.account_type);
        w.put_u8(self.risk);
        w.put_u64(self.case_id);
        w.put_u8(self.category);
    }

    fn read(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            account_type: r.read_u8()?,
            risk: r.read_u8()?,
            case_id: r.read_u64()?,
            category: r.read_u8()?,
        })
    }
}

/// A flagged address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Risk score.
    pub risk: RiskScore,
    /// The id of the case the address belongs to.
    pub case_id: u64,
    /// The single category assigned to the address.
    pub category: Category,
}

impl Address {
    /// Creates an address record.
    pub fn new(risk: RiskScore, case_id: u64, category: Category) -> Self {
        Self {
            risk,
            case_id,
            category,
        }
    }
}

impl Account for Address {
    const ACCOUNT_TYPE: AccountType = AccountType::Address;
    type Raw = AddressRaw;

    fn to_raw(&self) -> AddressRaw {
        AddressRaw {
            account_type: Self::ACCOUNT_TYPE.into(),
            risk: self.risk.into(),
            case_id: self.case_id,
            category: self.category.index(),
        }
    }

    fn from_raw(raw: AddressRaw) -> Result<Self, CodecError> {
        expect_account_type(raw.account_type, Self::ACCOUNT_TYPE)?;
        let risk = RiskScore::try_from(raw.risk).map_err(|_| CodecError::InvalidDiscriminant {
            field: "risk",
            value: raw.risk,
        })?;
        let category =
            index_to_category(raw.category).map_err(|_| CodecError::InvalidDiscriminant {
                field: "category",
                value: raw.category,
            })?;
        Ok(Self {
            risk,
            case_id: raw.case_id,
            category,
        })
    }
}
