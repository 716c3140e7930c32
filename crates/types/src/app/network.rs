// Path: crates/types/src/app/network.rs

//! The network record: a tracked chain scoped to one community.

use super::{AccountType, Name};
use crate::codec::{expect_account_type, Account, Field, FieldKind, Layout, RawRecord, Reader, Writer};
use crate::error::CodecError;
use serde::{Deserialize, Serialize};

/// The network record exactly as stored on chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetworkRaw {
    /// Always [`AccountType::Network`] for a valid record.
    pub account_type: u8,
    /// The network name.
    pub name: String,
}

impl RawRecord for NetworkRaw {
    const LAYOUT: Layout = Layout(&[
        Field::new("account_type", FieldKind::U8),
        Field::new("name", FieldKind::Name),
    ]);

    fn write(&self, w: &mut Writer) {
        w.put_u8(self.account_type);
        w.put_name(&self.name);
    }

    fn read(r: &mut Reader<'_>) -> Result<Self, CodecError> {
        Ok(Self {
            account_type: r.read_u8()?,
            name: r.read_name("name")?,
        })
    }
}

/// A tracked network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Network {
    /// The network name.
    pub name: Name,
}

impl Network {
    /// Creates a network record.
    pub fn new(name: Name) -> Self {
        Self { name }
    }
}

impl Account for Network {
    const ACCOUNT_TYPE: AccountType = AccountType::Network;
    type Raw = NetworkRaw;

    fn to_raw(&self) -> NetworkRaw {
        NetworkRaw {
            account_type: Self::ACCOUNT_TYPE.into(),
            name: self.name.to_string(),
        }
    }

    fn from_raw(raw: NetworkRaw) -> Result<Self, CodecError> {
        expect_account_type(raw.account_type, Self::ACCOUNT_TYPE)?;
        Ok(Self {
            name: super::decoded_name("name", raw.name)?,
        })
    }
}
