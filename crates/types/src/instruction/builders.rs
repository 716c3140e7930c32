// Path: crates/types/src/instruction/builders.rs

//! Complete instructions: payload plus the account list the program expects.
//!
//! The first account is always the signer that pays for or authorizes the
//! operation. Instructions that allocate an account end with the system program
//! and the rent sysvar.

use super::HapiInstruction;
use crate::app::{
    CaseStatus, Category, CategoryMask, Name, Pubkey, ReporterType, RiskScore, RENT_SYSVAR_ID,
    SYSTEM_PROGRAM_ID,
};
use crate::error::DerivationError;
use crate::keys::{
    find_address_address, find_case_address, find_community_address, find_network_address,
    find_reporter_address,
};

/// An account referenced by an instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccountMeta {
    /// The account address.
    pub pubkey: Pubkey,
    /// Whether the transaction must carry this account's signature.
    pub is_signer: bool,
    /// Whether the program may write to the account.
    pub is_writable: bool,
}

impl AccountMeta {
    /// A writable account.
    pub fn new(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: true,
        }
    }

    /// A read-only account.
    pub fn new_readonly(pubkey: Pubkey, is_signer: bool) -> Self {
        Self {
            pubkey,
            is_signer,
            is_writable: false,
        }
    }
}

/// An unsigned program instruction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    /// The program to invoke.
    pub program_id: Pubkey,
    /// The accounts, in program order.
    pub accounts: Vec<AccountMeta>,
    /// The encoded [`HapiInstruction`].
    pub data: Vec<u8>,
}

impl Instruction {
    fn new(program_id: &Pubkey, accounts: Vec<AccountMeta>, ix: &HapiInstruction) -> Self {
        Self {
            program_id: *program_id,
            accounts,
            data: ix.encode(),
        }
    }

    /// The keys that must sign a transaction carrying this instruction.
    pub fn signers(&self) -> impl Iterator<Item = &Pubkey> {
        self.accounts
            .iter()
            .filter(|m| m.is_signer)
            .map(|m| &m.pubkey)
    }
}

fn system_rent() -> [AccountMeta; 2] {
    [
        AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
    ]
}

fn community_address(program_id: &Pubkey, community: &Name) -> Result<Pubkey, DerivationError> {
    Ok(find_community_address(program_id, community)?.0)
}

/// Builds `CreateCommunity`. The payer becomes the community authority.
pub fn create_community(
    program_id: &Pubkey,
    payer: &Pubkey,
    name: &Name,
) -> Result<Instruction, DerivationError> {
    let community = community_address(program_id, name)?;
    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new(community, false),
    ];
    accounts.extend(system_rent());
    Ok(Instruction::new(
        program_id,
        accounts,
        &HapiInstruction::CreateCommunity { name: name.clone() },
    ))
}

/// Builds `UpdateCommunity`. The community keeps its address; only the stored
/// name and authority change.
pub fn update_community(
    program_id: &Pubkey,
    authority: &Pubkey,
    community_name: &Name,
    new_authority: &Pubkey,
    new_name: &Name,
) -> Result<Instruction, DerivationError> {
    let community = community_address(program_id, community_name)?;
    let accounts = vec![
        AccountMeta::new_readonly(*authority, true),
        AccountMeta::new(community, false),
        AccountMeta::new_readonly(*new_authority, false),
    ];
    Ok(Instruction::new(
        program_id,
        accounts,
        &HapiInstruction::UpdateCommunity {
            name: new_name.clone(),
        },
    ))
}

/// Builds `CreateNetwork`.
pub fn create_network(
    program_id: &Pubkey,
    payer: &Pubkey,
    community_name: &Name,
    name: &Name,
) -> Result<Instruction, DerivationError> {
    let community = community_address(program_id, community_name)?;
    let (network, _) = find_network_address(program_id, &community, name)?;
    let mut accounts = vec![
        AccountMeta::new(*payer, true),
        AccountMeta::new(network, false),
        AccountMeta::new_readonly(community, false),
    ];
    accounts.extend(system_rent());
    Ok(Instruction::new(
        program_id,
        accounts,
        &HapiInstruction::CreateNetwork { name: name.clone() },
    ))
}

/// Builds `UpdateNetwork`.
pub fn update_network(
    program_id: &Pubkey,
    authority: &Pubkey,
    community_name: &Name,
    name: &Name,
) -> Result<Instruction, DerivationError> {
    let community = community_address(program_id, community_name)?;
    let (network, _) = find_network_address(program_id, &community, name)?;
    let accounts = vec![
        AccountMeta::new_readonly(*authority, true),
        AccountMeta::new_readonly(community, false),
        AccountMeta::new(network, false),
    ];
    Ok(Instruction::new(
        program_id,
        accounts,
        &HapiInstruction::UpdateNetwork,
    ))
}

/// Builds `CreateReporter`.
pub fn create_reporter(
    program_id: &Pubkey,
    payer: &Pubkey,
    community_name: &Name,
    reporter_key: &Pubkey,
    reporter_type: ReporterType,
    name: &Name,
) -> Result<Instruction, DerivationError> {
    let community = community_address(program_id, community_name)?;
    let (reporter, _) = find_reporter_address(program_id, &community, reporter_key)?;
    let mut accounts = vec![
        AccountMeta::new_readonly(*payer, true),
        AccountMeta::new(community, false),
        AccountMeta::new_readonly(*reporter_key, false),
        AccountMeta::new(reporter, false),
    ];
    accounts.extend(system_rent());
    Ok(Instruction::new(
        program_id,
        accounts,
        &HapiInstruction::CreateReporter {
            reporter_type,
            name: name.clone(),
        },
    ))
}

/// Builds `UpdateReporter`.
pub fn update_reporter(
    program_id: &Pubkey,
    authority: &Pubkey,
    community_name: &Name,
    reporter_key: &Pubkey,
    reporter_type: ReporterType,
    name: &Name,
) -> Result<Instruction, DerivationError> {
    let community = community_address(program_id, community_name)?;
    let (reporter, _) = find_reporter_address(program_id, &community, reporter_key)?;
    let accounts = vec![
        AccountMeta::new_readonly(*authority, true),
        AccountMeta::new(community, false),
        AccountMeta::new_readonly(*reporter_key, false),
        AccountMeta::new(reporter, false),
    ];
    Ok(Instruction::new(
        program_id,
        accounts,
        &HapiInstruction::UpdateReporter {
            reporter_type,
            name: name.clone(),
        },
    ))
}

/// Builds `CreateCase` for an explicit case id.
///
/// The program only accepts `case_id == community.next_case_id`; callers read
/// the community first.
pub fn create_case(
    program_id: &Pubkey,
    reporter_key: &Pubkey,
    community_name: &Name,
    case_id: u64,
    categories: CategoryMask,
    status: CaseStatus,
    name: &Name,
) -> Result<Instruction, DerivationError> {
    let community = community_address(program_id, community_name)?;
    let (reporter, _) = find_reporter_address(program_id, &community, reporter_key)?;
    let (case, _) = find_case_address(program_id, &community, case_id)?;
    let mut accounts = vec![
        AccountMeta::new(*reporter_key, true),
        AccountMeta::new(community, false),
        AccountMeta::new_readonly(reporter, false),
        AccountMeta::new(case, false),
    ];
    accounts.extend(system_rent());
    Ok(Instruction::new(
        program_id,
        accounts,
        &HapiInstruction::CreateCase {
            case_id,
            categories,
            status,
            name: name.clone(),
        },
    ))
}

/// Builds `UpdateCase`.
pub fn update_case(
    program_id: &Pubkey,
    reporter_key: &Pubkey,
    community_name: &Name,
    case_id: u64,
    categories: CategoryMask,
    status: CaseStatus,
) -> Result<Instruction, DerivationError> {
    let community = community_address(program_id, community_name)?;
    let (reporter, _) = find_reporter_address(program_id, &community, reporter_key)?;
    let (case, _) = find_case_address(program_id, &community, case_id)?;
    let accounts = vec![
        AccountMeta::new(*reporter_key, true),
        AccountMeta::new_readonly(community, false),
        AccountMeta::new_readonly(reporter, false),
        AccountMeta::new(case, false),
    ];
    Ok(Instruction::new(
        program_id,
        accounts,
        &HapiInstruction::UpdateCase { categories, status },
    ))
}

/// The addressing context shared by `CreateAddress` and `UpdateAddress`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddressTarget<'a> {
    /// The community name.
    pub community: &'a Name,
    /// The network name.
    pub network: &'a Name,
    /// The raw flagged address.
    pub address: Pubkey,
}

struct AddressAccounts {
    community: Pubkey,
    network: Pubkey,
    reporter: Pubkey,
    case: Pubkey,
    address: Pubkey,
}

fn address_accounts(
    program_id: &Pubkey,
    reporter_key: &Pubkey,
    target: &AddressTarget<'_>,
    case_id: u64,
) -> Result<AddressAccounts, DerivationError> {
    let community = community_address(program_id, target.community)?;
    let (network, _) = find_network_address(program_id, &community, target.network)?;
    let (reporter, _) = find_reporter_address(program_id, &community, reporter_key)?;
    let (case, _) = find_case_address(program_id, &community, case_id)?;
    let (address, _) = find_address_address(program_id, &community, &network, &target.address)?;
    Ok(AddressAccounts {
        community,
        network,
        reporter,
        case,
        address,
    })
}

/// Builds `CreateAddress`.
pub fn create_address(
    program_id: &Pubkey,
    reporter_key: &Pubkey,
    target: &AddressTarget<'_>,
    risk: RiskScore,
    case_id: u64,
    category: Category,
) -> Result<Instruction, DerivationError> {
    let a = address_accounts(program_id, reporter_key, target, case_id)?;
    let mut accounts = vec![
        AccountMeta::new(*reporter_key, true),
        AccountMeta::new(a.community, false),
        AccountMeta::new_readonly(a.network, false),
        AccountMeta::new_readonly(a.reporter, false),
        AccountMeta::new_readonly(a.case, false),
        AccountMeta::new(a.address, false),
    ];
    accounts.extend(system_rent());
    Ok(Instruction::new(
        program_id,
        accounts,
        &HapiInstruction::CreateAddress {
            address: target.address,
            risk,
            case_id,
            category,
        },
    ))
}

/// Builds `UpdateAddress`. `case_id` is the case the address moves to.
pub fn update_address(
    program_id: &Pubkey,
    reporter_key: &Pubkey,
    target: &AddressTarget<'_>,
    risk: RiskScore,
    case_id: u64,
    category: Category,
) -> Result<Instruction, DerivationError> {
    let a = address_accounts(program_id, reporter_key, target, case_id)?;
    let accounts = vec![
        AccountMeta::new(*reporter_key, true),
        AccountMeta::new_readonly(a.community, false),
        AccountMeta::new_readonly(a.network, false),
        AccountMeta::new_readonly(a.reporter, false),
        AccountMeta::new_readonly(a.case, false),
        AccountMeta::new(a.address, false),
    ];
    Ok(Instruction::new(
        program_id,
        accounts,
        &HapiInstruction::UpdateAddress {
            risk,
            case_id,
            category,
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::HAPI_PROGRAM_ID;

    fn key(s: &str) -> Pubkey {
        s.parse().unwrap()
    }

    fn name(s: &str) -> Name {
        Name::new(s).unwrap()
    }

    #[test]
    fn create_community_accounts() {
        let payer = Pubkey::new([7; 32]);
        let ix = create_community(&HAPI_PROGRAM_ID, &payer, &name("hapi.one")).unwrap();
        assert_eq!(ix.program_id, HAPI_PROGRAM_ID);
        assert_eq!(
            ix.accounts,
            vec![
                AccountMeta::new(payer, true),
                AccountMeta::new(key("DgBtqgnzYRsUZP3PhX5rCLfNycTQQ8cp7eMseosUQ4Ja"), false),
                AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
                AccountMeta::new_readonly(RENT_SYSVAR_ID, false),
            ]
        );
        assert_eq!(ix.data[0], 0);
        assert_eq!(ix.signers().collect::<Vec<_>>(), vec![&payer]);
    }

    #[test]
    fn create_case_targets_the_case_address_for_its_id() {
        let reporter = key("DzMkTkH6ms7hEzyHisFnLLc2WDJfBb9TNNaPDQ7ADHhy");
        let ix = create_case(
            &HAPI_PROGRAM_ID,
            &reporter,
            &name("hapi.one"),
            1,
            CategoryMask::empty(),
            CaseStatus::Open,
            &name("case1"),
        )
        .unwrap();
        assert_eq!(ix.accounts.len(), 6);
        assert_eq!(
            ix.accounts[2].pubkey,
            key("GfwYi1NaoMFJUHzEXtTkXAQewxxqs7PbseAYnsfiNnS7")
        );
        assert_eq!(
            ix.accounts[3],
            AccountMeta::new(key("6vGsVQ1YMu5zkNUMJ5j5H1TVimfennBcYuYP9hXw1kB2"), false)
        );
        assert!(matches!(
            HapiInstruction::decode(&ix.data),
            Ok(HapiInstruction::CreateCase { case_id: 1, .. })
        ));
    }

    #[test]
    fn address_builders_share_account_order() {
        let reporter = Pubkey::new([9; 32]);
        let community = name("hapi.one");
        let network = name("testcoin");
        let target = AddressTarget {
            community: &community,
            network: &network,
            address: key("2Yy2iSPJv4iEMyNkUX7ydFoufSmyPLMc8P9owJopFRew"),
        };
        let risk = RiskScore::try_from(5u8).unwrap();
        let create = create_address(&HAPI_PROGRAM_ID, &reporter, &target, risk, 1, Category::Theft).unwrap();
        let update = update_address(&HAPI_PROGRAM_ID, &reporter, &target, risk, 1, Category::Theft).unwrap();

        assert_eq!(create.accounts.len(), 8);
        assert_eq!(update.accounts.len(), 6);
        for (c, u) in create.accounts.iter().zip(update.accounts.iter()) {
            assert_eq!(c.pubkey, u.pubkey);
        }
        assert_eq!(
            create.accounts[5].pubkey,
            key("C5Srms9M3eHy5XbzEgRgEEHFZ3rKxdAEaH2DZSSXLGDD")
        );
        assert_eq!(
            create.accounts[2].pubkey,
            key("2viJmmn2pEfd6cogyqdDGWS9YkrVdnx87L994Qo3GwLx")
        );
    }

    #[test]
    fn update_network_has_no_fields() {
        let ix = update_network(
            &HAPI_PROGRAM_ID,
            &Pubkey::new([1; 32]),
            &name("hapi.one"),
            &name("testcoin"),
        )
        .unwrap();
        assert_eq!(ix.data, vec![3]);
        assert!(ix.accounts[2].is_writable);
    }
}
