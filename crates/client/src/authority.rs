// Path: crates/client/src/authority.rs

//! Community administration: communities, networks and reporters.

use crate::reader::ReaderClient;
use crate::response::ActionResponse;
use hapi_api::chain::TransactionSubmitter;
use hapi_types::app::{Community, Name, Network, Pubkey, Reporter, ReporterType};
use hapi_types::codec::Account;
use hapi_types::error::ClientError;
use hapi_types::instruction as ix;
use hapi_types::keys::SeedPath;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

/// Signs community administration as the community authority.
///
/// Derefs to [`ReaderClient`] for reads.
#[derive(Debug, Clone)]
pub struct AuthorityClient {
    reader: ReaderClient,
    submitter: Arc<dyn TransactionSubmitter>,
    payer: Pubkey,
}

impl AuthorityClient {
    /// Creates a client that signs as `payer`.
    pub fn new(
        reader: ReaderClient,
        submitter: Arc<dyn TransactionSubmitter>,
        payer: Pubkey,
    ) -> Self {
        Self {
            reader,
            submitter,
            payer,
        }
    }

    /// The signing key.
    pub fn payer(&self) -> &Pubkey {
        &self.payer
    }

    /// Creates a community owned by the payer.
    pub async fn create_community(
        &self,
        name: &str,
    ) -> Result<ActionResponse<Community>, ClientError> {
        let name = Name::new(name)?;
        let instruction = ix::create_community(self.program_id(), &self.payer, &name)?;
        self.submit(instruction, SeedPath::Community { name }).await
    }

    /// Renames a community and hands it to `new_authority`.
    ///
    /// The community stays at the address derived from its original name.
    pub async fn update_community(
        &self,
        new_authority: &Pubkey,
        new_name: &str,
        community: Option<&str>,
    ) -> Result<ActionResponse<Community>, ClientError> {
        let community = self.resolve_community(community)?;
        let new_name = Name::new(new_name)?;
        let instruction = ix::update_community(
            self.program_id(),
            &self.payer,
            &community,
            new_authority,
            &new_name,
        )?;
        self.submit(instruction, SeedPath::Community { name: community })
            .await
    }

    /// Registers a network.
    pub async fn create_network(
        &self,
        name: &str,
        community: Option<&str>,
    ) -> Result<ActionResponse<Network>, ClientError> {
        let community = self.resolve_community(community)?;
        let name = Name::new(name)?;
        let instruction = ix::create_network(self.program_id(), &self.payer, &community, &name)?;
        let path = SeedPath::Network {
            community: self.community_address(&community)?,
            name,
        };
        self.submit(instruction, path).await
    }

    /// Touches a network. The instruction carries no fields.
    pub async fn update_network(
        &self,
        name: &str,
        community: Option<&str>,
    ) -> Result<ActionResponse<Network>, ClientError> {
        let community = self.resolve_community(community)?;
        let name = Name::new(name)?;
        let instruction = ix::update_network(self.program_id(), &self.payer, &community, &name)?;
        let path = SeedPath::Network {
            community: self.community_address(&community)?,
            name,
        };
        self.submit(instruction, path).await
    }

    /// Registers `reporter_key` as a reporter.
    pub async fn create_reporter(
        &self,
        reporter_key: &Pubkey,
        reporter_type: ReporterType,
        name: &str,
        community: Option<&str>,
    ) -> Result<ActionResponse<Reporter>, ClientError> {
        let community = self.resolve_community(community)?;
        let name = Name::new(name)?;
        let instruction = ix::create_reporter(
            self.program_id(),
            &self.payer,
            &community,
            reporter_key,
            reporter_type,
            &name,
        )?;
        self.submit(instruction, self.reporter_path(&community, reporter_key)?)
            .await
    }

    /// Changes a reporter's type and name. Setting [`ReporterType::Inactive`]
    /// revokes its permissions.
    pub async fn update_reporter(
        &self,
        reporter_key: &Pubkey,
        reporter_type: ReporterType,
        name: &str,
        community: Option<&str>,
    ) -> Result<ActionResponse<Reporter>, ClientError> {
        let community = self.resolve_community(community)?;
        let name = Name::new(name)?;
        let instruction = ix::update_reporter(
            self.program_id(),
            &self.payer,
            &community,
            reporter_key,
            reporter_type,
            &name,
        )?;
        self.submit(instruction, self.reporter_path(&community, reporter_key)?)
            .await
    }

    fn reporter_path(&self, community: &Name, reporter: &Pubkey) -> Result<SeedPath, ClientError> {
        Ok(SeedPath::Reporter {
            community: self.community_address(community)?,
            reporter: *reporter,
        })
    }

    async fn submit<T: Account>(
        &self,
        instruction: ix::Instruction,
        path: SeedPath,
    ) -> Result<ActionResponse<T>, ClientError> {
        self.reader
            .submit_and_fetch(self.submitter.as_ref(), &self.payer, instruction, path)
            .await
    }
}

impl Deref for AuthorityClient {
    type Target = ReaderClient;

    fn deref(&self) -> &ReaderClient {
        &self.reader
    }
}

impl DerefMut for AuthorityClient {
    fn deref_mut(&mut self) -> &mut ReaderClient {
        &mut self.reader
    }
}
