// Path: crates/test_utils/src/ledger.rs

//! An in-memory ledger that runs HAPI instructions the way the deployed program
//! does.
//!
//! Transactions are atomic: every instruction runs against a staged copy of the
//! account map, and the copy is committed only if all of them succeed. A failed
//! transaction is reported from `submit` as a [`ChainError::Submission`] whose
//! reason is the program error message, like a failed preflight simulation.

use async_trait::async_trait;
use hapi_api::chain::{AccountFetcher, TransactionSubmitter};
use hapi_types::app::{
    Address, Case, Community, Name, Network, Pubkey, Reporter, ReporterType, TxSignature,
};
use hapi_types::codec::Account;
use hapi_types::error::{ChainError, DerivationError};
use hapi_types::instruction::{HapiInstruction, Instruction};
use hapi_types::keys::{
    find_address_address, find_case_address, find_community_address, find_network_address,
    find_reporter_address,
};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tokio::sync::Mutex;

/// Errors raised by the emulated program.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProgramError {
    /// The instruction targets another program.
    #[error("Incorrect program id")]
    IncorrectProgramId,
    /// The payload did not decode.
    #[error("Invalid instruction")]
    InvalidInstruction,
    /// An account slot the instruction needs is missing.
    #[error("Not enough account keys")]
    NotEnoughAccountKeys,
    /// A signer account did not sign.
    #[error("SignatureMissing")]
    SignatureMissing,
    /// The account to initialize already holds data.
    #[error("Already in use")]
    AlreadyInUse,
    /// An account passed in does not match its derived address.
    #[error("Invalid account address")]
    InvalidAccountAddress,
    /// An account that must exist is empty or holds another record type.
    #[error("Invalid Account type")]
    InvalidAccountType,
    /// The signer is not the community authority.
    #[error("InvalidCommunityAuthority")]
    InvalidCommunityAuthority,
    /// The reporter may not perform this operation.
    #[error("InvalidReporter")]
    InvalidReporter,
    /// The case id is not the community's next case id.
    #[error("CaseIDMismatch")]
    CaseIdMismatch,
}

#[derive(Debug, Default)]
struct LedgerState {
    accounts: HashMap<Pubkey, Vec<u8>>,
    landed: HashSet<TxSignature>,
    transactions: u64,
}

/// An in-memory HAPI program and account store.
#[derive(Debug)]
pub struct MockLedger {
    program_id: Pubkey,
    over_allocation: usize,
    state: Mutex<LedgerState>,
}

impl MockLedger {
    /// An empty ledger running `program_id`.
    pub fn new(program_id: Pubkey) -> Self {
        Self {
            program_id,
            over_allocation: 0,
            state: Mutex::new(LedgerState::default()),
        }
    }

    /// Allocates `extra` zero bytes past every record it creates, the way
    /// accounts sized for future growth look on chain.
    pub fn with_over_allocation(mut self, extra: usize) -> Self {
        self.over_allocation = extra;
        self
    }

    /// The program id this ledger emulates.
    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// Overwrites the raw bytes at `address`.
    pub async fn set_account(&self, address: Pubkey, data: Vec<u8>) {
        self.state.lock().await.accounts.insert(address, data);
    }

    /// The raw bytes at `address`.
    pub async fn account(&self, address: &Pubkey) -> Option<Vec<u8>> {
        self.state.lock().await.accounts.get(address).cloned()
    }

    /// The number of transactions that landed.
    pub async fn transaction_count(&self) -> u64 {
        self.state.lock().await.transactions
    }

    /// Runs `instructions` as one atomic transaction.
    pub async fn process(
        &self,
        instructions: &[Instruction],
        signers: &[Pubkey],
    ) -> Result<(), ProgramError> {
        let mut state = self.state.lock().await;
        self.apply(&mut state, instructions, signers)
    }

    fn apply(
        &self,
        state: &mut LedgerState,
        instructions: &[Instruction],
        signers: &[Pubkey],
    ) -> Result<(), ProgramError> {
        let mut staged = Staged {
            program_id: &self.program_id,
            over_allocation: self.over_allocation,
            accounts: state.accounts.clone(),
        };
        for ix in instructions {
            staged.execute(ix, signers)?;
        }
        state.accounts = staged.accounts;
        state.transactions += 1;
        Ok(())
    }
}

#[async_trait]
impl AccountFetcher for MockLedger {
    async fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, ChainError> {
        Ok(self.account(address).await)
    }
}

#[async_trait]
impl TransactionSubmitter for MockLedger {
    async fn submit(
        &self,
        instructions: Vec<Instruction>,
        signers: &[Pubkey],
    ) -> Result<TxSignature, ChainError> {
        let mut state = self.state.lock().await;
        if let Err(e) = self.apply(&mut state, &instructions, signers) {
            tracing::debug!(target: "hapi::mock", error = %e, "transaction rejected");
            return Err(ChainError::Submission {
                reason: e.to_string(),
            });
        }
        let signature = TxSignature(format!("mock-tx-{}", state.transactions));
        state.landed.insert(signature.clone());
        Ok(signature)
    }

    async fn confirm(&self, signature: &TxSignature) -> Result<(), ChainError> {
        if self.state.lock().await.landed.contains(signature) {
            Ok(())
        } else {
            Err(ChainError::Confirmation {
                signature: signature.to_string(),
                reason: "unknown signature".into(),
            })
        }
    }
}

struct Staged<'a> {
    program_id: &'a Pubkey,
    over_allocation: usize,
    accounts: HashMap<Pubkey, Vec<u8>>,
}

fn account(ix: &Instruction, index: usize) -> Result<Pubkey, ProgramError> {
    ix.accounts
        .get(index)
        .map(|m| m.pubkey)
        .ok_or(ProgramError::NotEnoughAccountKeys)
}

fn expect_address(
    actual: &Pubkey,
    derived: Result<(Pubkey, u8), DerivationError>,
) -> Result<(), ProgramError> {
    match derived {
        Ok((expected, _)) if expected == *actual => Ok(()),
        _ => Err(ProgramError::InvalidAccountAddress),
    }
}

impl Staged<'_> {
    fn load<T: Account>(&self, address: &Pubkey) -> Result<T, ProgramError> {
        let data = self
            .accounts
            .get(address)
            .ok_or(ProgramError::InvalidAccountType)?;
        T::decode(data).map_err(|_| ProgramError::InvalidAccountType)
    }

    fn store<T: Account>(&mut self, address: Pubkey, record: &T) {
        let mut data = record.encode();
        let len = data.len() + self.over_allocation;
        if let Some(existing) = self.accounts.get(&address) {
            data.resize(existing.len().max(data.len()), 0);
        } else {
            data.resize(len, 0);
        }
        self.accounts.insert(address, data);
    }

    fn ensure_empty(&self, address: &Pubkey) -> Result<(), ProgramError> {
        match self.accounts.get(address) {
            Some(data) if data.iter().any(|b| *b != 0) => Err(ProgramError::AlreadyInUse),
            _ => Ok(()),
        }
    }

    fn community_authority(
        &self,
        signer: &Pubkey,
        community: &Pubkey,
    ) -> Result<Community, ProgramError> {
        let data: Community = self.load(community)?;
        if data.authority != *signer {
            return Err(ProgramError::InvalidCommunityAuthority);
        }
        Ok(data)
    }

    fn reporter(
        &self,
        signer: &Pubkey,
        community: &Pubkey,
        reporter: &Pubkey,
    ) -> Result<Reporter, ProgramError> {
        match find_reporter_address(self.program_id, community, signer) {
            Ok((expected, _)) if expected == *reporter => {}
            _ => return Err(ProgramError::InvalidReporter),
        }
        self.load(reporter).map_err(|_| ProgramError::InvalidReporter)
    }

    fn execute(&mut self, ix: &Instruction, signers: &[Pubkey]) -> Result<(), ProgramError> {
        if ix.program_id != *self.program_id {
            return Err(ProgramError::IncorrectProgramId);
        }
        if ix.signers().any(|s| !signers.contains(s)) {
            return Err(ProgramError::SignatureMissing);
        }
        let payload =
            HapiInstruction::decode(&ix.data).map_err(|_| ProgramError::InvalidInstruction)?;
        let signer = account(ix, 0)?;

        match payload {
            HapiInstruction::CreateCommunity { name } => {
                let community = account(ix, 1)?;
                expect_address(&community, find_community_address(self.program_id, &name))?;
                self.ensure_empty(&community)?;
                self.store(community, &Community::new(signer, 0, name));
            }
            HapiInstruction::UpdateCommunity { name } => {
                let community = account(ix, 1)?;
                let mut data = self.community_authority(&signer, &community)?;
                if let Ok(new_authority) = account(ix, 2) {
                    data.authority = new_authority;
                }
                data.name = name;
                self.store(community, &data);
            }
            HapiInstruction::CreateNetwork { name } => {
                let network = account(ix, 1)?;
                let community = account(ix, 2)?;
                self.community_authority(&signer, &community)?;
                expect_address(
                    &network,
                    find_network_address(self.program_id, &community, &name),
                )?;
                self.ensure_empty(&network)?;
                self.store(network, &Network::new(name));
            }
            HapiInstruction::UpdateNetwork => {
                let community = account(ix, 1)?;
                let network = account(ix, 2)?;
                self.community_authority(&signer, &community)?;
                let _: Network = self.load(&network)?;
            }
            HapiInstruction::CreateReporter {
                reporter_type,
                name,
            } => {
                let community = account(ix, 1)?;
                let reporter_key = account(ix, 2)?;
                let reporter = account(ix, 3)?;
                self.community_authority(&signer, &community)?;
                expect_address(
                    &reporter,
                    find_reporter_address(self.program_id, &community, &reporter_key),
                )?;
                self.ensure_empty(&reporter)?;
                self.store(reporter, &Reporter::new(reporter_type, name));
            }
            HapiInstruction::UpdateReporter {
                reporter_type,
                name,
            } => {
                let community = account(ix, 1)?;
                let reporter_key = account(ix, 2)?;
                let reporter = account(ix, 3)?;
                self.community_authority(&signer, &community)?;
                expect_address(
                    &reporter,
                    find_reporter_address(self.program_id, &community, &reporter_key),
                )?;
                let _: Reporter = self.load(&reporter)?;
                self.store(reporter, &Reporter::new(reporter_type, name));
            }
            HapiInstruction::CreateCase {
                case_id,
                categories,
                status,
                name,
            } => {
                let community = account(ix, 1)?;
                let reporter = account(ix, 2)?;
                let case = account(ix, 3)?;
                let reporter_data = self.reporter(&signer, &community, &reporter)?;
                let mut community_data: Community = self.load(&community)?;
                expect_address(&case, find_case_address(self.program_id, &community, case_id))?;
                self.ensure_empty(&case)?;
                if !reporter_data.reporter_type.can_report_cases() {
                    return Err(ProgramError::InvalidReporter);
                }
                if case_id != community_data.next_case_id {
                    return Err(ProgramError::CaseIdMismatch);
                }
                community_data.next_case_id = community_data
                    .next_case_id
                    .checked_add(1)
                    .ok_or(ProgramError::CaseIdMismatch)?;
                self.store(community, &community_data);
                self.store(
                    case,
                    &Case::new(signer, categories.categories(), status, name),
                );
            }
            HapiInstruction::UpdateCase { categories, status } => {
                let community = account(ix, 1)?;
                let reporter = account(ix, 2)?;
                let case = account(ix, 3)?;
                let reporter_data = self.reporter(&signer, &community, &reporter)?;
                let mut case_data: Case = self.load(&case)?;
                let allowed = match reporter_data.reporter_type {
                    ReporterType::Authority => true,
                    ReporterType::Full => case_data.reporter_key == signer,
                    ReporterType::Tracer | ReporterType::Inactive => false,
                };
                if !allowed {
                    return Err(ProgramError::InvalidReporter);
                }
                case_data.categories = categories.categories();
                case_data.status = status;
                self.store(case, &case_data);
            }
            HapiInstruction::CreateAddress {
                address: raw,
                risk,
                case_id,
                category,
            } => {
                let address = self.address_accounts(ix, &signer, Some(&raw), case_id)?;
                self.ensure_empty(&address)?;
                self.store(address, &Address::new(risk, case_id, category));
            }
            HapiInstruction::UpdateAddress {
                risk,
                case_id,
                category,
            } => {
                let address = self.address_accounts(ix, &signer, None, case_id)?;
                let _: Address = self.load(&address)?;
                self.store(address, &Address::new(risk, case_id, category));
            }
        }
        Ok(())
    }

    /// Checks the account list shared by both address instructions and returns
    /// the address-record key. The record's derivation is only checked when the
    /// raw address travels in the payload.
    fn address_accounts(
        &self,
        ix: &Instruction,
        signer: &Pubkey,
        raw: Option<&Pubkey>,
        case_id: u64,
    ) -> Result<Pubkey, ProgramError> {
        let community = account(ix, 1)?;
        let network = account(ix, 2)?;
        let reporter = account(ix, 3)?;
        let case = account(ix, 4)?;
        let address = account(ix, 5)?;
        let reporter_data = self.reporter(signer, &community, &reporter)?;
        if !reporter_data.reporter_type.can_report_addresses() {
            return Err(ProgramError::InvalidReporter);
        }
        let _: Network = self.load(&network)?;
        expect_address(&case, find_case_address(self.program_id, &community, case_id))?;
        let _: Case = self.load(&case)?;
        if let Some(raw) = raw {
            expect_address(
                &address,
                find_address_address(self.program_id, &community, &network, raw),
            )?;
        }
        Ok(address)
    }
}

/// Creates the community, network and reporter accounts most tests start from.
pub async fn seed_community(
    ledger: &MockLedger,
    authority: &Pubkey,
    community: &Name,
    network: &Name,
    reporters: &[(Pubkey, ReporterType)],
) -> Result<(), ProgramError> {
    use hapi_types::instruction as ix;

    let program_id = ledger.program_id();
    let derive = |_: DerivationError| ProgramError::InvalidAccountAddress;
    let mut instructions = vec![
        ix::create_community(&program_id, authority, community).map_err(derive)?,
        ix::create_network(&program_id, authority, community, network).map_err(derive)?,
    ];
    for (i, (key, reporter_type)) in reporters.iter().enumerate() {
        let name =
            Name::new(format!("reporter-{i}")).map_err(|_| ProgramError::InvalidInstruction)?;
        instructions.push(
            ix::create_reporter(&program_id, authority, community, key, *reporter_type, &name)
                .map_err(derive)?,
        );
    }
    ledger.process(&instructions, &[*authority]).await
}
