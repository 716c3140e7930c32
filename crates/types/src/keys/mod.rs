// Path: crates/types/src/keys/mod.rs
//! Defines the seed literals and seed paths that locate every entity on chain.
//!
//! An entity's address is never stored; it is always re-derived from its seed
//! path and the program id. The literals keep entities of different kinds from
//! colliding under the same parent.

use crate::app::{AccountType, Name, Pubkey};
use crate::derivation::find_program_address;
use crate::error::DerivationError;
use std::fmt;

/// The seed literal of a community.
pub const COMMUNITY_SEED: &[u8] = b"community";
/// The seed literal of a network.
pub const NETWORK_SEED: &[u8] = b"network";
/// The seed literal of a reporter.
pub const REPORTER_SEED: &[u8] = b"reporter";
/// The seed literal of a case.
pub const CASE_SEED: &[u8] = b"case";
/// The seed literal of an address.
pub const ADDRESS_SEED: &[u8] = b"address";

/// Encodes a case id as a seed: 8 bytes, little-endian.
///
/// The byte order is part of the on-chain address of every case. A big-endian
/// seed derives a different, valid-looking address.
pub fn case_id_seed(case_id: u64) -> [u8; 8] {
    case_id.to_le_bytes()
}

/// The seed path of one entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeedPath {
    /// `["community", name]`
    Community {
        /// The community name.
        name: Name,
    },
    /// `["network", community, name]`
    Network {
        /// The community address.
        community: Pubkey,
        /// The network name.
        name: Name,
    },
    /// `["reporter", community, reporter_key]`
    Reporter {
        /// The community address.
        community: Pubkey,
        /// The reporter's public key.
        reporter: Pubkey,
    },
    /// `["case", community, case_id_le]`
    Case {
        /// The community address.
        community: Pubkey,
        /// The case id.
        case_id: u64,
    },
    /// `["address", community, network, address]`
    Address {
        /// The community address.
        community: Pubkey,
        /// The network address.
        network: Pubkey,
        /// The raw 32-byte flagged address.
        address: Pubkey,
    },
}

impl SeedPath {
    /// The seeds, in order, without the bump.
    pub fn seeds(&self) -> Vec<Vec<u8>> {
        match self {
            Self::Community { name } => vec![COMMUNITY_SEED.to_vec(), name.as_str().as_bytes().to_vec()],
            Self::Network { community, name } => vec![
                NETWORK_SEED.to_vec(),
                community.as_ref().to_vec(),
                name.as_str().as_bytes().to_vec(),
            ],
            Self::Reporter {
                community,
                reporter,
            } => vec![
                REPORTER_SEED.to_vec(),
                community.as_ref().to_vec(),
                reporter.as_ref().to_vec(),
            ],
            Self::Case { community, case_id } => vec![
                CASE_SEED.to_vec(),
                community.as_ref().to_vec(),
                case_id_seed(*case_id).to_vec(),
            ],
            Self::Address {
                community,
                network,
                address,
            } => vec![
                ADDRESS_SEED.to_vec(),
                community.as_ref().to_vec(),
                network.as_ref().to_vec(),
                address.as_ref().to_vec(),
            ],
        }
    }

    /// The kind of account stored at the derived address.
    pub fn account_type(&self) -> AccountType {
        match self {
            Self::Community { .. } => AccountType::Community,
            Self::Network { .. } => AccountType::Network,
            Self::Reporter { .. } => AccountType::Reporter,
            Self::Case { .. } => AccountType::Case,
            Self::Address { .. } => AccountType::Address,
        }
    }

    /// Derives the address and bump under `program_id`.
    pub fn derive(&self, program_id: &Pubkey) -> Result<(Pubkey, u8), DerivationError> {
        let seeds = self.seeds();
        let refs: Vec<&[u8]> = seeds.iter().map(Vec::as_slice).collect();
        find_program_address(&refs, program_id)
    }
}

impl fmt::Display for SeedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Community { name } => write!(f, "community {name}"),
            Self::Network { community, name } => write!(f, "network {name} of {community}"),
            Self::Reporter {
                community,
                reporter,
            } => write!(f, "reporter {reporter} of {community}"),
            Self::Case { community, case_id } => write!(f, "case {case_id} of {community}"),
            Self::Address {
                community,
                network,
                address,
            } => write!(f, "address {address} on {network} of {community}"),
        }
    }
}

/// Derives a community address from its name.
pub fn find_community_address(
    program_id: &Pubkey,
    name: &Name,
) -> Result<(Pubkey, u8), DerivationError> {
    SeedPath::Community { name: name.clone() }.derive(program_id)
}

/// Derives a network address.
pub fn find_network_address(
    program_id: &Pubkey,
    community: &Pubkey,
    name: &Name,
) -> Result<(Pubkey, u8), DerivationError> {
    SeedPath::Network {
        community: *community,
        name: name.clone(),
    }
    .derive(program_id)
}

/// Derives a reporter address from the reporter's public key.
pub fn find_reporter_address(
    program_id: &Pubkey,
    community: &Pubkey,
    reporter: &Pubkey,
) -> Result<(Pubkey, u8), DerivationError> {
    SeedPath::Reporter {
        community: *community,
        reporter: *reporter,
    }
    .derive(program_id)
}

/// Derives a case address from its id.
pub fn find_case_address(
    program_id: &Pubkey,
    community: &Pubkey,
    case_id: u64,
) -> Result<(Pubkey, u8), DerivationError> {
    SeedPath::Case {
        community: *community,
        case_id,
    }
    .derive(program_id)
}

/// Derives the address record of a flagged address.
pub fn find_address_address(
    program_id: &Pubkey,
    community: &Pubkey,
    network: &Pubkey,
    address: &Pubkey,
) -> Result<(Pubkey, u8), DerivationError> {
    SeedPath::Address {
        community: *community,
        network: *network,
        address: *address,
    }
    .derive(program_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::HAPI_PROGRAM_ID;
    use crate::derivation::find_program_address;
    use proptest::prelude::*;

    fn key(s: &str) -> Pubkey {
        s.parse().unwrap()
    }

    fn name(s: &str) -> Name {
        Name::new(s).unwrap()
    }

    fn community() -> Pubkey {
        key("DgBtqgnzYRsUZP3PhX5rCLfNycTQQ8cp7eMseosUQ4Ja")
    }

    #[test]
    fn community_address() {
        let (address, bump) = find_community_address(&HAPI_PROGRAM_ID, &name("hapi.one")).unwrap();
        assert_eq!(address, community());
        assert_eq!(bump, 255);
    }

    #[test]
    fn reporter_address() {
        let reporter = key("DzMkTkH6ms7hEzyHisFnLLc2WDJfBb9TNNaPDQ7ADHhy");
        let (address, bump) = find_reporter_address(&HAPI_PROGRAM_ID, &community(), &reporter).unwrap();
        assert_eq!(address, key("GfwYi1NaoMFJUHzEXtTkXAQewxxqs7PbseAYnsfiNnS7"));
        assert_eq!(bump, 255);
    }

    #[test]
    fn case_addresses_use_little_endian_ids() {
        let expected = [
            (0, "63G8TLWGQpd26UZj7L9Qr9e3R1MPbybLcW3A7LXtG1Sk", 253),
            (1, "6vGsVQ1YMu5zkNUMJ5j5H1TVimfennBcYuYP9hXw1kB2", 255),
            (2, "HqvJ9EVws3tEUuptmXUZpPh3JcJJvoSPBk5LTgaoAtV9", 254),
        ];
        for (id, address, bump) in expected {
            assert_eq!(
                find_case_address(&HAPI_PROGRAM_ID, &community(), id).unwrap(),
                (key(address), bump),
                "case {id}"
            );
        }
    }

    #[test]
    fn big_endian_case_seed_derives_a_different_address() {
        let c = community();
        let be = 1u64.to_be_bytes();
        let (wrong, bump) = find_program_address(&[CASE_SEED, c.as_ref(), &be], &HAPI_PROGRAM_ID).unwrap();
        assert_eq!(wrong, key("6xBTWoqRkG9ThPzaixCdzGYuKoQnto6bK6M8CS7Rm1Zt"));
        assert_eq!(bump, 252);
        let (right, _) = find_case_address(&HAPI_PROGRAM_ID, &c, 1).unwrap();
        assert_ne!(wrong, right);
    }

    #[test]
    fn network_address() {
        let (address, bump) = find_network_address(&HAPI_PROGRAM_ID, &community(), &name("testcoin")).unwrap();
        assert_eq!(address, key("2viJmmn2pEfd6cogyqdDGWS9YkrVdnx87L994Qo3GwLx"));
        assert_eq!(bump, 253);
    }

    #[test]
    fn address_address_uses_four_seeds() {
        let network = key("2viJmmn2pEfd6cogyqdDGWS9YkrVdnx87L994Qo3GwLx");
        let flagged = key("2Yy2iSPJv4iEMyNkUX7ydFoufSmyPLMc8P9owJopFRew");
        let (address, bump) =
            find_address_address(&HAPI_PROGRAM_ID, &community(), &network, &flagged).unwrap();
        assert_eq!(address, key("C5Srms9M3eHy5XbzEgRgEEHFZ3rKxdAEaH2DZSSXLGDD"));
        assert_eq!(bump, 255);
    }

    #[test]
    fn kinds_do_not_collide() {
        let c = community();
        let n = name("x");
        let paths = [
            SeedPath::Community { name: n.clone() },
            SeedPath::Network {
                community: c,
                name: n,
            },
            SeedPath::Reporter {
                community: c,
                reporter: c,
            },
            SeedPath::Case {
                community: c,
                case_id: 0,
            },
            SeedPath::Address {
                community: c,
                network: c,
                address: c,
            },
        ];
        let mut derived: Vec<Pubkey> = paths
            .iter()
            .map(|p| p.derive(&HAPI_PROGRAM_ID).unwrap().0)
            .collect();
        derived.sort();
        derived.dedup();
        assert_eq!(derived.len(), paths.len());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn distinct_case_ids_derive_distinct_addresses(a in any::<u64>(), b in any::<u64>()) {
            prop_assume!(a != b);
            let c = community();
            let (x, _) = find_case_address(&HAPI_PROGRAM_ID, &c, a).unwrap();
            let (y, _) = find_case_address(&HAPI_PROGRAM_ID, &c, b).unwrap();
            prop_assert_ne!(x, y);
        }

        #[test]
        fn distinct_names_derive_distinct_communities(a in "[a-z.]{1,28}", b in "[a-z.]{1,28}") {
            prop_assume!(a != b);
            let (x, _) = find_community_address(&HAPI_PROGRAM_ID, &name(&a)).unwrap();
            let (y, _) = find_community_address(&HAPI_PROGRAM_ID, &name(&b)).unwrap();
            prop_assert_ne!(x, y);
        }
    }
}
