// Path: crates/client/src/reader.rs

//! The read path: derive an address, fetch its bytes, decode the record.

use crate::response::{ActionResponse, ViewResponse};
use crate::rpc::RpcAccountFetcher;
use hapi_api::chain::{AccountFetcher, TransactionSubmitter};
use hapi_telemetry::Timer;
use hapi_types::app::{Address, Case, Community, Name, Network, Pubkey, Reporter};
use hapi_types::codec::Account;
use hapi_types::config::ClientConfig;
use hapi_types::error::{ClientError, ConfigError, ValidationError};
use hapi_types::instruction::Instruction;
use hapi_types::keys::SeedPath;
use hapi_types::prelude::OptionExt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Reads HAPI entities through an [`AccountFetcher`].
///
/// The client carries an optional default community. Every operation also
/// takes an explicit community override; when neither is present the call
/// fails with [`ClientError::CommunityNotSpecified`] before any I/O.
#[derive(Debug, Clone)]
pub struct ReaderClient {
    program_id: Pubkey,
    fetcher: Arc<dyn AccountFetcher>,
    community: Option<Name>,
}

impl ReaderClient {
    /// Creates a reader for `program_id` with no default community.
    pub fn new(program_id: Pubkey, fetcher: Arc<dyn AccountFetcher>) -> Self {
        Self {
            program_id,
            fetcher,
            community: None,
        }
    }

    /// Creates a reader that fetches over JSON-RPC as `config` describes.
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        let invalid = |e: ConfigError| ClientError::InvalidConfig(e.to_string());
        config.validate().map_err(invalid)?;
        let community = config.community().map_err(invalid)?;
        let fetcher = RpcAccountFetcher::new(config)?;
        let mut reader = Self::new(config.program_id, Arc::new(fetcher));
        reader.community = community;
        Ok(reader)
    }

    /// Sets the default community.
    pub fn with_community(mut self, community: Name) -> Self {
        self.community = Some(community);
        self
    }

    /// Replaces the default community.
    pub fn switch_community(&mut self, community: &str) -> Result<&mut Self, ValidationError> {
        self.community = Some(Name::new(community)?);
        Ok(self)
    }

    /// The default community, if any.
    pub fn community(&self) -> Option<&Name> {
        self.community.as_ref()
    }

    /// The program the reader derives addresses under.
    pub fn program_id(&self) -> &Pubkey {
        &self.program_id
    }

    /// Picks the override if given, else the default community.
    pub(crate) fn resolve_community(&self, community: Option<&str>) -> Result<Name, ClientError> {
        match community {
            Some(name) => Ok(Name::new(name)?),
            None => self
                .community
                .clone()
                .required(ClientError::CommunityNotSpecified),
        }
    }

    pub(crate) fn community_address(&self, community: &Name) -> Result<Pubkey, ClientError> {
        let path = SeedPath::Community {
            name: community.clone(),
        };
        Ok(path.derive(&self.program_id)?.0)
    }

    /// Derives `path`, fetches the account and decodes it as `T`.
    pub(crate) async fn fetch<T: Account>(
        &self,
        path: SeedPath,
    ) -> Result<ViewResponse<T>, ClientError> {
        let (address, _) = path.derive(&self.program_id)?;
        debug!(target: "hapi::client", %path, %address, "fetching account");

        let data = {
            let _timer = Timer::new("get_account_data");
            self.fetcher.get_account_data(&address).await?
        };
        let Some(data) = data else {
            warn!(target: "hapi::client", %path, %address, "account not found");
            return Err(ClientError::NotFound {
                kind: T::ACCOUNT_TYPE,
                key: path.to_string(),
            });
        };

        let data = T::decode(&data).map_err(|source| ClientError::Decode {
            kind: T::ACCOUNT_TYPE,
            address: address.to_string(),
            source,
        })?;
        Ok(ViewResponse {
            account: address,
            data,
        })
    }

    /// Submits `instruction` signed by `signer`, waits for confirmation and
    /// re-reads the record at `path`.
    pub(crate) async fn submit_and_fetch<T: Account>(
        &self,
        submitter: &dyn TransactionSubmitter,
        signer: &Pubkey,
        instruction: Instruction,
        path: SeedPath,
    ) -> Result<ActionResponse<T>, ClientError> {
        debug!(target: "hapi::client", %path, %signer, "submitting transaction");
        let tx_hash = {
            let _timer = Timer::new("submit_and_confirm");
            submitter
                .submit_and_confirm(vec![instruction], &[*signer])
                .await
                .map_err(|e| {
                    warn!(target: "hapi::client", %path, error = %e, "transaction failed");
                    e
                })?
        };
        let view = self.fetch(path).await?;
        Ok(ActionResponse::new(tx_hash, view))
    }

    /// Reads a community.
    pub async fn get_community(
        &self,
        community: Option<&str>,
    ) -> Result<ViewResponse<Community>, ClientError> {
        let name = self.resolve_community(community)?;
        self.fetch(SeedPath::Community { name }).await
    }

    /// Reads a network of a community.
    pub async fn get_network(
        &self,
        network: &str,
        community: Option<&str>,
    ) -> Result<ViewResponse<Network>, ClientError> {
        let community = self.resolve_community(community)?;
        let name = Name::new(network)?;
        let community = self.community_address(&community)?;
        self.fetch(SeedPath::Network { community, name }).await
    }

    /// Reads the reporter registered under `reporter`'s key.
    pub async fn get_reporter(
        &self,
        reporter: &Pubkey,
        community: Option<&str>,
    ) -> Result<ViewResponse<Reporter>, ClientError> {
        let community = self.resolve_community(community)?;
        let community = self.community_address(&community)?;
        self.fetch(SeedPath::Reporter {
            community,
            reporter: *reporter,
        })
        .await
    }

    /// Reads a case by id.
    pub async fn get_case(
        &self,
        case_id: u64,
        community: Option<&str>,
    ) -> Result<ViewResponse<Case>, ClientError> {
        let community = self.resolve_community(community)?;
        let community = self.community_address(&community)?;
        self.fetch(SeedPath::Case { community, case_id }).await
    }

    /// Reads the record of a flagged address on a network.
    ///
    /// Addresses of foreign chains go in as 32 bytes; see
    /// [`Pubkey::from_hex_padded`].
    pub async fn get_address(
        &self,
        address: &Pubkey,
        network: &str,
        community: Option<&str>,
    ) -> Result<ViewResponse<Address>, ClientError> {
        let community = self.resolve_community(community)?;
        let network = Name::new(network)?;
        let community = self.community_address(&community)?;
        let (network, _) = SeedPath::Network {
            community,
            name: network,
        }
        .derive(&self.program_id)?;
        self.fetch(SeedPath::Address {
            community,
            network,
            address: *address,
        })
        .await
    }
}
