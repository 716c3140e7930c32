//! Known keys and account bytes of a `hapi.one` community.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hapi_types::app::{Name, Pubkey};
use rand::RngCore;

/// Authority of the `hapi.one` community.
pub const COMMUNITY_AUTHORITY: &str = "H6oepkMQSZxSGdQUGwtmSy6Z6f4ZuhvjJFsdiz7mpoKn";
/// Address of the `hapi.one` community.
pub const COMMUNITY_ADDRESS: &str = "DgBtqgnzYRsUZP3PhX5rCLfNycTQQ8cp7eMseosUQ4Ja";
/// An authority-level reporter registered in `hapi.one`.
pub const REPORTER_KEY: &str = "DzMkTkH6ms7hEzyHisFnLLc2WDJfBb9TNNaPDQ7ADHhy";
/// Address of the `testcoin` network of `hapi.one`.
pub const NETWORK_ADDRESS: &str = "2viJmmn2pEfd6cogyqdDGWS9YkrVdnx87L994Qo3GwLx";

/// `hapi.one`, authority [`COMMUNITY_AUTHORITY`], next case id 2.
pub const COMMUNITY_ACCOUNT: &str =
    "Ae83pQQEsYipbhD1URInU/iuiQbErgmDyScnrPJbOPlRAgAAAAAAAAAIAAAAaGFwaS5vbmUAAAAAAAAAAAAAAAAAAAAAAAAAAA==";
/// The `testcoin` network.
pub const NETWORK_ACCOUNT: &str = "AggAAAB0ZXN0Y29pbgAAAAAAAAAAAAAAAAAAAAAAAAAA";
/// Authority reporter `Alice`.
pub const REPORTER_ACCOUNT: &str = "AwMFAAAAQWxpY2UAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA==";
/// Open case `case0` with no categories, reported by [`REPORTER_KEY`].
pub const CASE_ACCOUNT: &str =
    "BMD9z4HkaJp54Mtk2ICY9TQpEGUqNA3cBwPb2xA4bcZ4AAAAAAAFAAAAY2FzZTAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA==";
/// Address with risk 5 in case 1, category `Theft`.
pub const ADDRESS_ACCOUNT: &str = "BQUBAAAAAAAAAA8=";

/// Decodes a base64 fixture. Panics on malformed input.
pub fn bytes(fixture: &str) -> Vec<u8> {
    match STANDARD.decode(fixture) {
        Ok(bytes) => bytes,
        Err(e) => panic!("malformed base64 fixture {fixture:?}: {e}"),
    }
}

/// Parses a base58 fixture key. Panics on malformed input.
pub fn key(fixture: &str) -> Pubkey {
    match fixture.parse() {
        Ok(key) => key,
        Err(e) => panic!("malformed key fixture {fixture:?}: {e}"),
    }
}

/// Builds a name. Panics when it does not fit.
pub fn name(s: &str) -> Name {
    match Name::new(s) {
        Ok(name) => name,
        Err(e) => panic!("bad fixture name {s:?}: {e}"),
    }
}

/// A fresh random key.
pub fn random_pubkey() -> Pubkey {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    Pubkey::new(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hapi_types::app::{Case, CaseStatus, Community, HAPI_PROGRAM_ID};
    use hapi_types::codec::Account;
    use hapi_types::keys::find_community_address;

    #[test]
    fn community_fixture_is_consistent() {
        let community = Community::decode(&bytes(COMMUNITY_ACCOUNT)).unwrap();
        assert_eq!(community.authority, key(COMMUNITY_AUTHORITY));
        let (address, _) = find_community_address(&HAPI_PROGRAM_ID, &community.name).unwrap();
        assert_eq!(address, key(COMMUNITY_ADDRESS));
    }

    #[test]
    fn case_fixture_is_consistent() {
        let case = Case::decode(&bytes(CASE_ACCOUNT)).unwrap();
        assert_eq!(case.reporter_key, key(REPORTER_KEY));
        assert_eq!(case.status, CaseStatus::Open);
        assert!(case.categories.is_empty());
        assert_eq!(case.name, name("case0"));
    }

    #[test]
    fn random_keys_differ() {
        assert_ne!(random_pubkey(), random_pubkey());
    }
}
