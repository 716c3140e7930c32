// Path: crates/types/src/app/mod.rs
//! Core application-level data structures: the five on-chain account records,
//! the enums they carry, and the category table.
//!
//! Every record has two forms. The `*Raw` struct mirrors the on-chain bytes
//! field-for-field with primitive types; the domain struct carries validated
//! types (`Pubkey`, `Name`, `RiskScore`, enums, category sets) and can only be
//! built through a total constructor. The [`Account`](crate::codec::Account)
//! trait maps between the two.

mod address;
mod case;
mod category;
mod community;
mod enums;
mod fields;
mod identity;
mod network;
mod reporter;

pub use address::*;
pub use case::*;
pub use category::*;
pub use community::*;
pub use enums::*;
pub use fields::*;
pub use identity::*;
pub use network::*;
pub use reporter::*;

use crate::error::CodecError;

/// Lifts a decoded string into a [`Name`], reporting over-long input as a codec error.
pub(crate) fn decoded_name(field: &'static str, raw: String) -> Result<Name, CodecError> {
    let len = raw.len();
    Name::new(raw).map_err(|_| CodecError::NameTooLong {
        field,
        len,
        max: MAX_NAME_LEN,
    })
}
