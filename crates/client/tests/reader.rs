// Path: crates/client/tests/reader.rs

use hapi_client::ReaderClient;
use hapi_test_utils::fixtures::{self, key, name};
use hapi_test_utils::{assert_err, assert_ok, MockLedger};
use hapi_types::app::{
    AccountType, Address, Case, CaseStatus, Category, Network, Pubkey, Reporter,
    ReporterType, RiskScore, HAPI_PROGRAM_ID,
};
use hapi_types::codec::Account;
use hapi_types::config::ClientConfig;
use hapi_types::error::{ClientError, CodecError, ValidationError};
use hapi_types::keys::{find_address_address, find_case_address, find_reporter_address};
use std::sync::Arc;

fn reader(ledger: &Arc<MockLedger>) -> ReaderClient {
    ReaderClient::new(HAPI_PROGRAM_ID, ledger.clone())
}

/// Loads the `hapi.one` fixture accounts into a fresh ledger.
async fn fixture_ledger() -> Arc<MockLedger> {
    let ledger = Arc::new(MockLedger::new(HAPI_PROGRAM_ID));
    let community = key(fixtures::COMMUNITY_ADDRESS);
    let network = key(fixtures::NETWORK_ADDRESS);
    let reporter = key(fixtures::REPORTER_KEY);

    ledger
        .set_account(community, fixtures::bytes(fixtures::COMMUNITY_ACCOUNT))
        .await;
    ledger
        .set_account(network, fixtures::bytes(fixtures::NETWORK_ACCOUNT))
        .await;
    let (address, _) = find_reporter_address(&HAPI_PROGRAM_ID, &community, &reporter).unwrap();
    ledger
        .set_account(address, fixtures::bytes(fixtures::REPORTER_ACCOUNT))
        .await;
    let (address, _) = find_case_address(&HAPI_PROGRAM_ID, &community, 0).unwrap();
    ledger
        .set_account(address, fixtures::bytes(fixtures::CASE_ACCOUNT))
        .await;
    ledger
}

#[tokio::test]
async fn reads_every_entity_kind() {
    let ledger = fixture_ledger().await;
    let reader = reader(&ledger).with_community(name("hapi.one"));

    let community = assert_ok!(reader.get_community(None).await);
    assert_eq!(community.account, key(fixtures::COMMUNITY_ADDRESS));
    assert_eq!(community.data.next_case_id, 2);
    assert_eq!(community.data.authority, key(fixtures::COMMUNITY_AUTHORITY));

    let network = assert_ok!(reader.get_network("testcoin", None).await);
    assert_eq!(network.account, key(fixtures::NETWORK_ADDRESS));
    assert_eq!(network.data, Network::new(name("testcoin")));

    let reporter = assert_ok!(
        reader
            .get_reporter(&key(fixtures::REPORTER_KEY), None)
            .await
    );
    assert_eq!(
        reporter.data,
        Reporter::new(ReporterType::Authority, name("Alice"))
    );

    let case = assert_ok!(reader.get_case(0, None).await);
    assert_eq!(case.data.name, name("case0"));
    assert_eq!(case.data.status, CaseStatus::Open);
    assert!(case.data.categories.is_empty());
}

#[tokio::test]
async fn reads_over_allocated_address_record() {
    let ledger = fixture_ledger().await;
    let reader = reader(&ledger);
    let flagged = key("2Yy2iSPJv4iEMyNkUX7ydFoufSmyPLMc8P9owJopFRew");
    let (address, _) = find_address_address(
        &HAPI_PROGRAM_ID,
        &key(fixtures::COMMUNITY_ADDRESS),
        &key(fixtures::NETWORK_ADDRESS),
        &flagged,
    )
    .unwrap();
    let mut data = fixtures::bytes(fixtures::ADDRESS_ACCOUNT);
    data.resize(128, 0);
    ledger.set_account(address, data).await;

    let view = assert_ok!(
        reader
            .get_address(&flagged, "testcoin", Some("hapi.one"))
            .await
    );
    assert_eq!(view.account, address);
    assert_eq!(
        view.data,
        Address::new(RiskScore::try_from(5u8).unwrap(), 1, Category::Theft)
    );
}

#[tokio::test]
async fn explicit_community_overrides_the_default() {
    let ledger = fixture_ledger().await;
    let reader = reader(&ledger).with_community(name("elsewhere"));

    let err = assert_err!(reader.get_community(None).await);
    assert!(matches!(
        err,
        ClientError::NotFound {
            kind: AccountType::Community,
            ..
        }
    ));
    assert_ok!(reader.get_community(Some("hapi.one")).await);
}

#[tokio::test]
async fn switch_community_changes_the_default() {
    let ledger = fixture_ledger().await;
    let mut reader = reader(&ledger);
    assert_eq!(
        reader.get_case(0, None).await,
        Err(ClientError::CommunityNotSpecified)
    );
    assert_ok!(reader.switch_community("hapi.one"));
    assert_eq!(reader.community(), Some(&name("hapi.one")));
    assert_ok!(reader.get_case(0, None).await);
}

#[tokio::test]
async fn missing_case_names_its_seed_path() {
    let ledger = fixture_ledger().await;
    let reader = reader(&ledger);
    let err = assert_err!(reader.get_case(7, Some("hapi.one")).await);
    assert_eq!(
        err,
        ClientError::NotFound {
            kind: AccountType::Case,
            key: format!("case 7 of {}", fixtures::COMMUNITY_ADDRESS),
        }
    );
}

#[tokio::test]
async fn wrong_record_type_is_a_decode_error() {
    let ledger = fixture_ledger().await;
    let reader = reader(&ledger);
    let (address, _) =
        find_case_address(&HAPI_PROGRAM_ID, &key(fixtures::COMMUNITY_ADDRESS), 1).unwrap();
    ledger
        .set_account(address, fixtures::bytes(fixtures::NETWORK_ACCOUNT))
        .await;

    let err = assert_err!(reader.get_case(1, Some("hapi.one")).await);
    assert_eq!(
        err,
        ClientError::Decode {
            kind: AccountType::Case,
            address: address.to_string(),
            source: CodecError::UnexpectedAccountType {
                expected: AccountType::Case,
                found: AccountType::Network,
            },
        }
    );
}

#[tokio::test]
async fn unknown_record_tag_is_a_decode_error() {
    let ledger = fixture_ledger().await;
    let reader = reader(&ledger);
    let (address, _) =
        find_case_address(&HAPI_PROGRAM_ID, &key(fixtures::COMMUNITY_ADDRESS), 3).unwrap();
    let mut data = vec![0u8; Case::size()];
    data[0] = 9;
    ledger.set_account(address, data).await;

    let err = assert_err!(reader.get_case(3, Some("hapi.one")).await);
    assert_eq!(
        err,
        ClientError::Decode {
            kind: AccountType::Case,
            address: address.to_string(),
            source: CodecError::InvalidDiscriminant {
                field: "account_type",
                value: 9,
            },
        }
    );
}

#[tokio::test]
async fn long_names_fail_before_any_fetch() {
    let ledger = fixture_ledger().await;
    let reader = reader(&ledger);
    let long = "n".repeat(29);
    assert_eq!(
        reader.get_network(&long, Some("hapi.one")).await,
        Err(ClientError::Validation(ValidationError::NameTooLong {
            len: 29,
            max: 28
        }))
    );
    assert_eq!(
        reader.get_community(Some(&long)).await,
        Err(ClientError::Validation(ValidationError::NameTooLong {
            len: 29,
            max: 28
        }))
    );
}

#[tokio::test]
async fn case_round_trips_through_the_ledger() {
    let ledger = Arc::new(MockLedger::new(HAPI_PROGRAM_ID));
    let community = key(fixtures::COMMUNITY_ADDRESS);
    let case = Case::new(
        Pubkey::new([9; 32]),
        [Category::Mixer, Category::Sanctions],
        CaseStatus::Closed,
        name("mixer ring"),
    );
    let (address, _) = find_case_address(&HAPI_PROGRAM_ID, &community, 5).unwrap();
    ledger.set_account(address, case.encode()).await;

    let view = assert_ok!(reader(&ledger).get_case(5, Some("hapi.one")).await);
    assert_eq!(view.data, case);
}

#[test]
fn from_config_takes_the_default_community() {
    let mut config = ClientConfig::new("http://localhost:8899");
    config.community_name = Some("hapi.one".into());
    let reader = assert_ok!(ReaderClient::from_config(&config));
    assert_eq!(reader.community(), Some(&name("hapi.one")));

    config.community_name = Some("c".repeat(29));
    let err = assert_err!(ReaderClient::from_config(&config));
    assert!(matches!(err, ClientError::InvalidConfig(_)), "{err:?}");
}
