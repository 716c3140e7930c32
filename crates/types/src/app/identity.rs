// Path: crates/types/src/app/identity.rs

//! Defines the canonical `Pubkey` used for every address on the host chain, and
//! the identifiers of the programs the SDK talks to.
//!
//! A `Pubkey` is always 32 raw bytes. Its textual form is base58, which is also
//! how it serializes to JSON and TOML.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The length in bytes of every public key and derived address.
pub const PUBKEY_LEN: usize = 32;

/// A 32-byte public key or program-derived address.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Pubkey(pub [u8; PUBKEY_LEN]);

/// The deployed HAPI program: `hapiScWyxeZy36fqXD5CcRUYFCUdid26jXaakAtcdZ7`.
pub const HAPI_PROGRAM_ID: Pubkey = Pubkey([
    10, 101, 121, 204, 34, 17, 134, 59, 24, 79, 182, 129, 84, 19, 8, 42, 105, 231, 167, 100,
    176, 145, 108, 154, 62, 64, 112, 228, 22, 110, 100, 222,
]);

/// The system program, owner of every freshly allocated account.
pub const SYSTEM_PROGRAM_ID: Pubkey = Pubkey([0u8; PUBKEY_LEN]);

/// The rent sysvar: `SysvarRent111111111111111111111111111111111`.
pub const RENT_SYSVAR_ID: Pubkey = Pubkey([
    6, 167, 213, 23, 25, 44, 92, 81, 33, 140, 201, 76, 61, 74, 241, 127, 88, 218, 238, 8, 155,
    161, 253, 68, 227, 219, 217, 138, 0, 0, 0, 0,
]);

/// Errors from parsing a textual public key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParsePubkeyError {
    /// The input is not valid base58.
    #[error("Invalid base58 public key: {0}")]
    InvalidBase58(String),
    /// The input is not valid hex.
    #[error("Invalid hex public key: {0}")]
    InvalidHex(String),
    /// The decoded input has the wrong length.
    #[error("Public key must be at most {max} bytes, got {len}")]
    InvalidLength {
        /// The decoded length.
        len: usize,
        /// The accepted length.
        max: usize,
    },
}

impl Pubkey {
    /// Creates a key from its raw bytes.
    pub const fn new(bytes: [u8; PUBKEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Returns the raw bytes.
    pub fn to_bytes(self) -> [u8; PUBKEY_LEN] {
        self.0
    }

    /// Returns a key from a slice, which must be exactly 32 bytes.
    pub fn try_from_slice(bytes: &[u8]) -> Result<Self, ParsePubkeyError> {
        <[u8; PUBKEY_LEN]>::try_from(bytes)
            .map(Self)
            .map_err(|_| ParsePubkeyError::InvalidLength {
                len: bytes.len(),
                max: PUBKEY_LEN,
            })
    }

    /// Parses a hex string of up to 32 bytes and left-pads it with zeros.
    ///
    /// Addresses of foreign chains (a 20-byte EVM address, for instance) are
    /// registered this way. An optional `0x` prefix is accepted.
    pub fn from_hex_padded(s: &str) -> Result<Self, ParsePubkeyError> {
        let trimmed = s.strip_prefix("0x").unwrap_or(s);
        let bytes = hex::decode(trimmed).map_err(|e| ParsePubkeyError::InvalidHex(e.to_string()))?;
        if bytes.len() > PUBKEY_LEN {
            return Err(ParsePubkeyError::InvalidLength {
                len: bytes.len(),
                max: PUBKEY_LEN,
            });
        }
        let mut out = [0u8; PUBKEY_LEN];
        let offset = PUBKEY_LEN - bytes.len();
        if let Some(tail) = out.get_mut(offset..) {
            tail.copy_from_slice(&bytes);
        }
        Ok(Self(out))
    }

    /// Returns the base58 encoding of the key.
    pub fn to_base58(&self) -> String {
        bs58::encode(self.0).into_string()
    }
}

impl AsRef<[u8]> for Pubkey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; PUBKEY_LEN]> for Pubkey {
    fn from(bytes: [u8; PUBKEY_LEN]) -> Self {
        Self(bytes)
    }
}

impl fmt::Display for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl fmt::Debug for Pubkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pubkey({})", self.to_base58())
    }
}

impl FromStr for Pubkey {
    type Err = ParsePubkeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = bs58::decode(s)
            .into_vec()
            .map_err(|e| ParsePubkeyError::InvalidBase58(e.to_string()))?;
        Self::try_from_slice(&bytes)
    }
}

impl Serialize for Pubkey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_base58())
    }
}

impl<'de> Deserialize<'de> for Pubkey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Pubkey::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// The signature identifying a submitted transaction, in its base58 text form.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxSignature(pub String);

impl fmt::Display for TxSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_id_round_trips_through_base58() {
        assert_eq!(
            HAPI_PROGRAM_ID.to_string(),
            "hapiScWyxeZy36fqXD5CcRUYFCUdid26jXaakAtcdZ7"
        );
        let parsed: Pubkey = "hapiScWyxeZy36fqXD5CcRUYFCUdid26jXaakAtcdZ7".parse().unwrap();
        assert_eq!(parsed, HAPI_PROGRAM_ID);
    }

    #[test]
    fn well_known_ids_have_expected_text_form() {
        assert_eq!(
            RENT_SYSVAR_ID.to_string(),
            "SysvarRent111111111111111111111111111111111"
        );
        assert_eq!(
            SYSTEM_PROGRAM_ID.to_string(),
            "11111111111111111111111111111111"
        );
    }

    #[test]
    fn hex_padded_left_pads_short_addresses() {
        let key = Pubkey::from_hex_padded("0x5Aeda56215b167893e80B4fE645BA6d5Bab767DE").unwrap();
        assert_eq!(&key.0[..12], &[0u8; 12]);
        assert_eq!(key.0[12], 0x5a);
        assert_eq!(key.0[31], 0xde);
    }

    #[test]
    fn hex_padded_rejects_oversized_input() {
        let too_long = "00".repeat(33);
        assert_eq!(
            Pubkey::from_hex_padded(&too_long),
            Err(ParsePubkeyError::InvalidLength { len: 33, max: 32 })
        );
    }

    #[test]
    fn rejects_short_base58() {
        assert!(matches!(
            "abc".parse::<Pubkey>(),
            Err(ParsePubkeyError::InvalidLength { .. })
        ));
    }

    #[test]
    fn serializes_as_base58_string() {
        let json = serde_json::to_string(&HAPI_PROGRAM_ID).unwrap();
        assert_eq!(json, "\"hapiScWyxeZy36fqXD5CcRUYFCUdid26jXaakAtcdZ7\"");
        let back: Pubkey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, HAPI_PROGRAM_ID);
    }
}
