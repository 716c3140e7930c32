// Path: crates/types/src/app/case.rs

//! The case record: an investigation grouping a set of risk categories.

use super::{AccountType, Category, CategoryMask, CaseStatus, Name, Pubkey};
use crate::codec::{expect_account_type, Account, Field, FieldKind, Layout, RawRecord, Reader, Writer};
use crate::error::CodecError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The case record exactly as stored on chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CaseRaw {
    /// Always [`AccountType::Case`] for a valid record.
    pub account_type: u8,
    /// The key of the reporter that opened the case.
    pub reporter_key: [u8; 32],
    /// The category bitmask.
    pub categories: u32,
    /// The raw [`CaseStatus`].
    pub status: u8,
    /// The case name.
    pub name: String,
}

impl RawRecord for CaseRaw {
    const LAYOUT: Layout = Layout(&[
        Field::new("account_type", FieldKind::U8),
        Field::new("reporter_key", FieldKind::PublicKey),
        Field::new("categories", FieldKind::U32),
        Field::new("status", FieldKind::U8),
        Field::new("name", FieldKind::Name),
    ]);

    fn write(&self, w: &mut Writer) {
        w.put_u8(self.account_type);
        w.put_key(&self.reporter_key);
        w.put_u32(self.categories);
        w.put_u8(self.status);
        w.put_name(&self.name);
    }

    fn read(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            account_type: r.read_u8()?,
            reporter_key: r.read_key()?,
            categories: r.read_u32()?,
            status: r.read_u8()?,
            name: r.read_name("name")?,
        })
    }
}

/// An investigation case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    /// The key of the reporter that opened the case.
    pub reporter_key: Pubkey,
    /// The categories the case covers. `Safe` is never a member.
    pub categories: BTreeSet<Category>,
    /// Lifecycle status.
    pub status: CaseStatus,
    /// The case name.
    pub name: Name,
}

impl Case {
    /// Creates a case record. `Safe` is dropped from the category set since it
    /// has no bit in the stored mask.
    pub fn new(
        reporter_key: Pubkey,
        categories: impl IntoIterator<Item = Category>,
        status: CaseStatus,
        name: Name,
    ) -> Self {
        Self {
            reporter_key,
            categories: categories
                .into_iter()
                .filter(|c| *c != Category::Safe)
                .collect(),
            status,
            name,
        }
    }

    /// The category set as a packed mask.
    pub fn category_mask(&self) -> CategoryMask {
        self.categories.iter().copied().collect()
    }
}

impl Account for Case {
    const ACCOUNT_TYPE: AccountType = AccountType::Case;
    type Raw = CaseRaw;

    fn to_raw(&self) -> CaseRaw {
        CaseRaw {
            account_type: Self::ACCOUNT_TYPE.into(),
            reporter_key: self.reporter_key.to_bytes(),
            categories: self.category_mask().bits(),
            status: self.status.into(),
            name: self.name.to_string(),
        }
    }

    fn from_raw(raw: CaseRaw) -> Result<Self, CodecError> {
        expect_account_type(raw.account_type, Self::ACCOUNT_TYPE)?;
        let status = CaseStatus::try_from(raw.status).map_err(|_| CodecError::InvalidDiscriminant {
            field: "status",
            value: raw.status,
        })?;
        Ok(Self {
            reporter_key: Pubkey::new(raw.reporter_key),
            categories: CategoryMask::from_raw(raw.categories)?.categories(),
            status,
            name: super::decoded_name("name", raw.name)?,
        })
    }
}
