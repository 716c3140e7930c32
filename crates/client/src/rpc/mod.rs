// Path: crates/client/src/rpc/mod.rs
//! An [`AccountFetcher`] backed by a Solana JSON-RPC endpoint.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hapi_api::chain::AccountFetcher;
use hapi_types::app::Pubkey;
use hapi_types::config::{ClientConfig, Commitment};
use hapi_types::error::ChainError;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

#[derive(Deserialize)]
struct RpcResponse {
    result: Option<AccountInfoResult>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct AccountInfoResult {
    value: Option<AccountInfo>,
}

#[derive(Deserialize)]
struct AccountInfo {
    /// `[payload, encoding]`
    data: (String, String),
}

/// Fetches account data with `getAccountInfo`.
#[derive(Debug, Clone)]
pub struct RpcAccountFetcher {
    endpoint: String,
    commitment: Commitment,
    http: reqwest::Client,
}

impl RpcAccountFetcher {
    /// Builds a fetcher for `config.endpoint` at `config.commitment`.
    pub fn new(config: &ClientConfig) -> Result<Self, ChainError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| ChainError::Transport(e.to_string()))?;
        Ok(Self {
            endpoint: config.endpoint.clone(),
            commitment: config.commitment,
            http,
        })
    }

    /// The JSON-RPC endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body(&self, address: &Pubkey) -> serde_json::Value {
        json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getAccountInfo",
            "params": [
                address.to_string(),
                { "encoding": "base64", "commitment": self.commitment.as_str() }
            ]
        })
    }
}

/// Extracts the account bytes from a `getAccountInfo` response body.
pub(crate) fn parse_account_info(body: &str) -> Result<Option<Vec<u8>>, ChainError> {
    let response: RpcResponse = serde_json::from_str(body)
        .map_err(|e| ChainError::Transport(format!("malformed RPC response: {e}")))?;
    if let Some(err) = response.error {
        return Err(ChainError::Transport(format!(
            "RPC error {}: {}",
            err.code, err.message
        )));
    }
    let Some(info) = response.result.and_then(|r| r.value) else {
        return Ok(None);
    };
    let (payload, encoding) = info.data;
    if encoding != "base64" {
        return Err(ChainError::Transport(format!(
            "unexpected account encoding {encoding}"
        )));
    }
    STANDARD
        .decode(payload)
        .map(Some)
        .map_err(|e| ChainError::Transport(format!("invalid base64 account data: {e}")))
}

#[async_trait]
impl AccountFetcher for RpcAccountFetcher {
    async fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, ChainError> {
        debug!(target: "hapi::rpc", %address, endpoint = %self.endpoint, "getAccountInfo");
        let body = self
            .http
            .post(&self.endpoint)
            .json(&self.request_body(address))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ChainError::Transport(e.to_string()))?
            .text()
            .await
            .map_err(|e| ChainError::Transport(e.to_string()))?;
        parse_account_info(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_present_account() {
        let body = r#"{"jsonrpc":"2.0","result":{"context":{"slot":341},"value":{"data":["BQUBAAAAAAAAAA8=","base64"],"executable":false,"lamports":946560,"owner":"hapiScWyxeZy36fqXD5CcRUYFCUdid26jXaakAtcdZ7","rentEpoch":0}},"id":1}"#;
        assert_eq!(
            parse_account_info(body).unwrap(),
            Some(vec![5, 5, 1, 0, 0, 0, 0, 0, 0, 0, 15])
        );
    }

    #[test]
    fn missing_account_is_none() {
        let body = r#"{"jsonrpc":"2.0","result":{"context":{"slot":341},"value":null},"id":1}"#;
        assert_eq!(parse_account_info(body).unwrap(), None);
    }

    #[test]
    fn rpc_error_is_a_transport_error() {
        let body = r#"{"jsonrpc":"2.0","error":{"code":-32602,"message":"Invalid param: WrongSize"},"id":1}"#;
        assert_eq!(
            parse_account_info(body),
            Err(ChainError::Transport(
                "RPC error -32602: Invalid param: WrongSize".into()
            ))
        );
    }

    #[test]
    fn request_names_commitment_and_encoding() {
        let mut config = ClientConfig::new("http://localhost:8899");
        config.commitment = Commitment::Confirmed;
        let fetcher = RpcAccountFetcher::new(&config).unwrap();
        let body = fetcher.request_body(&Pubkey::default());
        assert_eq!(body["method"], "getAccountInfo");
        assert_eq!(body["params"][0], "11111111111111111111111111111111");
        assert_eq!(body["params"][1]["encoding"], "base64");
        assert_eq!(body["params"][1]["commitment"], "confirmed");
    }
}
