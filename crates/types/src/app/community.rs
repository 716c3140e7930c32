// Path: crates/types/src/app/community.rs

//! The community record: the root tenant, owner of the case counter.

use super::{AccountType, Name, Pubkey};
use crate::codec::{expect_account_type, Account, Field, FieldKind, Layout, RawRecord, Reader, Writer};
use crate::error::CodecError;
use serde::{Deserialize, Serialize};

/// The community record exactly as stored on chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommunityRaw {
    /// Always [`AccountType::Community`] for a valid record.
    pub account_type: u8,
    /// The key allowed to manage the community.
    pub authority: [u8; 32],
    /// The id the next created case must use.
    pub next_case_id: u64,
    /// The community name.
    pub name: String,
}

impl RawRecord for CommunityRaw {
    const LAYOUT: Layout = Layout(&[
        Field::new("account_type", FieldKind::U8),
        Field::new("authority", FieldKind::PublicKey),
        Field::new("next_case_id", FieldKind::U64),
        Field::new("name", FieldKind::Name),
    ]);

    fn write(&self, w: &mut Writer) {
        w.put_u8(self.account_type);
        w.put_key(&self.authority);
        w.put_u64(self.next_case_id);
        w.put_name(&self.name);
    }

    fn read(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            account_type: r.read_u8()?,
            authority: r.read_key()?,
            next_case_id: r.read_u64()?,
            name: r.read_name("name")?,
        })
    }
}

/// A community.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    /// The key allowed to manage the community.
    pub authority: Pubkey,
    /// The id the next created case must use. Incremented by the program only.
    pub next_case_id: u64,
    /// The community name.
    pub name: Name,
}

impl Community {
    /// Creates a community record.
    pub fn new(authority: Pubkey, next_case_id: u64, name: Name) -> Self {
        Self {
            authority,
            next_case_id,
            name,
        }
    }
}

impl Account for Community {
    const ACCOUNT_TYPE: AccountType = AccountType::Community;
    type Raw = CommunityRaw;

    fn to_raw(&self) -> CommunityRaw {
        CommunityRaw {
            account_type: Self::ACCOUNT_TYPE.into(),
            authority: self.authority.to_bytes(),
            next_case_id: self.next_case_id,
            name: self.name.to_string(),
        }
    }

    fn from_raw(raw: CommunityRaw) -> Result<Self, CodecError> {
        expect_account_type(raw.account_type, Self::ACCOUNT_TYPE)?;
        Ok(Self {
            authority: Pubkey::new(raw.authority),
            next_case_id: raw.next_case_id,
            name: super::decoded_name("name", raw.name)?,
        })
    }
}
