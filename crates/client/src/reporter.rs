// Path: crates/client/src/reporter.rs

//! Case and address reporting.
//!
//! Case ids are allocated from the community's `next_case_id` counter, read
//! immediately before the create instruction is built. Two reporters reading
//! the same counter derive the same case address; the program accepts the
//! first and rejects the second as already in use.

use crate::reader::ReaderClient;
use crate::response::{ActionResponse, CaseCreated, CaseTransaction};
use hapi_api::chain::TransactionSubmitter;
use hapi_types::app::{
    Address, Case, CaseStatus, Category, CategoryMask, Name, Pubkey, RiskScore,
};
use hapi_types::codec::Account;
use hapi_types::error::ClientError;
use hapi_types::instruction::{self as ix, AddressTarget, Instruction};
use hapi_types::keys::SeedPath;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;
use tracing::debug;

/// Reports cases and addresses as a registered reporter.
///
/// Derefs to [`ReaderClient`] for reads.
#[derive(Debug, Clone)]
pub struct ReporterClient {
    reader: ReaderClient,
    submitter: Arc<dyn TransactionSubmitter>,
    reporter_key: Pubkey,
}

/// The validated inputs of an address report.
struct AddressReport {
    community: Name,
    network: Name,
    risk: RiskScore,
}

impl ReporterClient {
    /// Creates a client that signs as `reporter_key`.
    pub fn new(
        reader: ReaderClient,
        submitter: Arc<dyn TransactionSubmitter>,
        reporter_key: Pubkey,
    ) -> Self {
        Self {
            reader,
            submitter,
            reporter_key,
        }
    }

    /// The signing key.
    pub fn reporter_key(&self) -> &Pubkey {
        &self.reporter_key
    }

    /// Builds an unsigned `CreateCase` for the community's next case id.
    pub async fn create_case_transaction(
        &self,
        name: &str,
        status: CaseStatus,
        categories: &[Category],
        community: Option<&str>,
    ) -> Result<CaseTransaction, ClientError> {
        let community = self.resolve_community(community)?;
        let name = Name::new(name)?;
        let case_id = self
            .get_community(Some(community.as_str()))
            .await?
            .data
            .next_case_id;
        debug!(target: "hapi::client", %community, case_id, "allocated case id");

        let instruction = ix::create_case(
            self.program_id(),
            &self.reporter_key,
            &community,
            case_id,
            mask(categories),
            status,
            &name,
        )?;
        Ok(CaseTransaction {
            instruction,
            case_id,
        })
    }

    /// Opens a case under the community's next case id.
    pub async fn create_case(
        &self,
        name: &str,
        status: CaseStatus,
        categories: &[Category],
        community: Option<&str>,
    ) -> Result<CaseCreated<Case>, ClientError> {
        let community = self.resolve_community(community)?;
        let CaseTransaction {
            instruction,
            case_id,
        } = self
            .create_case_transaction(name, status, categories, Some(community.as_str()))
            .await?;
        let path = self.case_path(&community, case_id)?;
        let response = self.submit(instruction, path).await?;
        Ok(CaseCreated { response, case_id })
    }

    /// Builds an unsigned `UpdateCase`.
    pub fn update_case_transaction(
        &self,
        case_id: u64,
        status: CaseStatus,
        categories: &[Category],
        community: Option<&str>,
    ) -> Result<Instruction, ClientError> {
        let community = self.resolve_community(community)?;
        Ok(ix::update_case(
            self.program_id(),
            &self.reporter_key,
            &community,
            case_id,
            mask(categories),
            status,
        )?)
    }

    /// Replaces a case's categories and status.
    pub async fn update_case(
        &self,
        case_id: u64,
        status: CaseStatus,
        categories: &[Category],
        community: Option<&str>,
    ) -> Result<ActionResponse<Case>, ClientError> {
        let community = self.resolve_community(community)?;
        let instruction =
            self.update_case_transaction(case_id, status, categories, Some(community.as_str()))?;
        let path = self.case_path(&community, case_id)?;
        self.submit(instruction, path).await
    }

    /// Builds an unsigned `CreateAddress`.
    pub fn create_address_transaction(
        &self,
        network: &str,
        address: &Pubkey,
        case_id: u64,
        category: Category,
        risk: i64,
        community: Option<&str>,
    ) -> Result<Instruction, ClientError> {
        let report = self.address_report(network, risk, community)?;
        let target = AddressTarget {
            community: &report.community,
            network: &report.network,
            address: *address,
        };
        Ok(ix::create_address(
            self.program_id(),
            &self.reporter_key,
            &target,
            report.risk,
            case_id,
            category,
        )?)
    }

    /// Flags `address` on `network` as part of a case.
    ///
    /// `risk` must lie in `0..=10`; it is checked before anything is sent.
    pub async fn create_address(
        &self,
        network: &str,
        address: &Pubkey,
        case_id: u64,
        category: Category,
        risk: i64,
        community: Option<&str>,
    ) -> Result<ActionResponse<Address>, ClientError> {
        let report = self.address_report(network, risk, community)?;
        let instruction = self.create_address_transaction(
            network,
            address,
            case_id,
            category,
            risk,
            Some(report.community.as_str()),
        )?;
        let path = self.address_path(&report, address)?;
        self.submit(instruction, path).await
    }

    /// Builds an unsigned `UpdateAddress`.
    pub fn update_address_transaction(
        &self,
        network: &str,
        address: &Pubkey,
        case_id: u64,
        category: Category,
        risk: i64,
        community: Option<&str>,
    ) -> Result<Instruction, ClientError> {
        let report = self.address_report(network, risk, community)?;
        let target = AddressTarget {
            community: &report.community,
            network: &report.network,
            address: *address,
        };
        Ok(ix::update_address(
            self.program_id(),
            &self.reporter_key,
            &target,
            report.risk,
            case_id,
            category,
        )?)
    }

    /// Re-scores a flagged address, possibly moving it to another case.
    pub async fn update_address(
        &self,
        network: &str,
        address: &Pubkey,
        case_id: u64,
        category: Category,
        risk: i64,
        community: Option<&str>,
    ) -> Result<ActionResponse<Address>, ClientError> {
        let report = self.address_report(network, risk, community)?;
        let instruction = self.update_address_transaction(
            network,
            address,
            case_id,
            category,
            risk,
            Some(report.community.as_str()),
        )?;
        let path = self.address_path(&report, address)?;
        self.submit(instruction, path).await
    }

    fn address_report(
        &self,
        network: &str,
        risk: i64,
        community: Option<&str>,
    ) -> Result<AddressReport, ClientError> {
        Ok(AddressReport {
            community: self.resolve_community(community)?,
            network: Name::new(network)?,
            risk: RiskScore::try_from(risk)?,
        })
    }

    fn case_path(&self, community: &Name, case_id: u64) -> Result<SeedPath, ClientError> {
        Ok(SeedPath::Case {
            community: self.community_address(community)?,
            case_id,
        })
    }

    fn address_path(
        &self,
        report: &AddressReport,
        address: &Pubkey,
    ) -> Result<SeedPath, ClientError> {
        let community = self.community_address(&report.community)?;
        let (network, _) = SeedPath::Network {
            community,
            name: report.network.clone(),
        }
        .derive(self.program_id())?;
        Ok(SeedPath::Address {
            community,
            network,
            address: *address,
        })
    }

    async fn submit<T: Account>(
        &self,
        instruction: Instruction,
        path: SeedPath,
    ) -> Result<ActionResponse<T>, ClientError> {
        self.reader
            .submit_and_fetch(
                self.submitter.as_ref(),
                &self.reporter_key,
                instruction,
                path,
            )
            .await
    }
}

fn mask(categories: &[Category]) -> CategoryMask {
    categories.iter().copied().collect()
}

impl Deref for ReporterClient {
    type Target = ReaderClient;

    fn deref(&self) -> &ReaderClient {
        &self.reader
    }
}

impl DerefMut for ReporterClient {
    fn deref_mut(&mut self) -> &mut ReaderClient {
        &mut self.reader
    }
}
