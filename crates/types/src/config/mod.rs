// Path: crates/types/src/config/mod.rs

//! Shared configuration structures for the HAPI clients.
use crate::app::{Name, Pubkey, HAPI_PROGRAM_ID};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The read-commitment level requested from the RPC node.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    /// The node's most recent block, possibly not yet voted on.
    #[default]
    Processed,
    /// Voted on by a supermajority.
    Confirmed,
    /// Rooted; cannot be rolled back.
    Finalized,
}

impl Commitment {
    /// The value sent in JSON-RPC requests.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }
}

/// Configuration for a HAPI client.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// The JSON-RPC endpoint URL.
    pub endpoint: String,
    /// The read-commitment level.
    #[serde(default)]
    pub commitment: Commitment,
    /// The default community operations run against.
    #[serde(default)]
    pub community_name: Option<String>,
    /// The HAPI program id.
    #[serde(default = "default_program_id")]
    pub program_id: Pubkey,
    /// Per-request timeout, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_program_id() -> Pubkey {
    HAPI_PROGRAM_ID
}
fn default_request_timeout_secs() -> u64 {
    30
}

impl ClientConfig {
    /// A configuration for `endpoint` with every other field defaulted.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            commitment: Commitment::default(),
            community_name: None,
            program_id: default_program_id(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Checks values serde cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Invalid("endpoint must not be empty".into()));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be positive".into(),
            ));
        }
        self.community()?;
        Ok(())
    }

    /// The default community as a validated name, `None` when unset.
    pub fn community(&self) -> Result<Option<Name>, ConfigError> {
        self.community_name
            .as_deref()
            .map(Name::new)
            .transpose()
            .map_err(|e| ConfigError::Invalid(format!("community_name: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = ClientConfig::from_toml_str(r#"endpoint = "http://localhost:8899""#).unwrap();
        assert_eq!(config, ClientConfig::new("http://localhost:8899"));
        assert_eq!(config.commitment, Commitment::Processed);
        assert_eq!(config.program_id, HAPI_PROGRAM_ID);
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[test]
    fn full_config_parses() {
        let config = ClientConfig::from_toml_str(
            r#"
            endpoint = "https://api.devnet.solana.com"
            commitment = "finalized"
            community_name = "hapi.one"
            program_id = "11111111111111111111111111111111"
            request_timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.commitment, Commitment::Finalized);
        assert_eq!(config.community().unwrap().unwrap().as_str(), "hapi.one");
        assert_eq!(config.program_id, Pubkey::default());
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            ClientConfig::from_toml_str(r#"endpoint = """#),
            Err(ConfigError::Invalid(_))
        ));
        let long = format!(
            "endpoint = \"http://x\"\ncommunity_name = \"{}\"",
            "c".repeat(29)
        );
        assert!(matches!(
            ClientConfig::from_toml_str(&long),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            ClientConfig::from_toml_str(r#"endpoint = "x"
commitment = "eventually""#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn community_reports_an_invalid_name() {
        let mut config = ClientConfig::new("http://localhost:8899");
        assert_eq!(config.community().unwrap(), None);
        config.community_name = Some("c".repeat(29));
        assert!(matches!(config.community(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn load_reports_missing_file() {
        let err = ClientConfig::load("/nonexistent/hapi.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
