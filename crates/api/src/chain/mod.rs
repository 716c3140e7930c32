// Path: crates/api/src/chain/mod.rs
//! Defines the collaborator traits through which the SDK touches the chain.
//!
//! Implementations own transport concerns (retries, timeouts, commitment level);
//! callers above this boundary see only raw bytes, signatures and `ChainError`.

use async_trait::async_trait;
use hapi_types::app::{Pubkey, TxSignature};
use hapi_types::error::ChainError;
use hapi_types::instruction::Instruction;
use std::fmt::Debug;

/// Reads raw account data by address.
#[async_trait]
pub trait AccountFetcher: Send + Sync + Debug {
    /// Returns the bytes stored at `address`, or `None` if no account exists.
    ///
    /// The returned buffer may be longer than the logical record.
    async fn get_account_data(&self, address: &Pubkey) -> Result<Option<Vec<u8>>, ChainError>;
}

/// Submits transactions and reports their outcome.
#[async_trait]
pub trait TransactionSubmitter: Send + Sync + Debug {
    /// Signs and sends a transaction carrying `instructions`.
    ///
    /// `signers` lists the keys the implementation must sign with; it holds
    /// the keypairs, the SDK never does. A rejection carries the reason
    /// reported by the chain, unaltered.
    async fn submit(
        &self,
        instructions: Vec<Instruction>,
        signers: &[Pubkey],
    ) -> Result<TxSignature, ChainError>;

    /// Waits until `signature` lands and reports whether it succeeded.
    async fn confirm(&self, signature: &TxSignature) -> Result<(), ChainError>;

    /// Submits, then confirms.
    async fn submit_and_confirm(
        &self,
        instructions: Vec<Instruction>,
        signers: &[Pubkey],
    ) -> Result<TxSignature, ChainError> {
        let signature = self.submit(instructions, signers).await?;
        self.confirm(&signature).await?;
        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct Recorder {
        confirmed: Mutex<Vec<TxSignature>>,
        reject_confirm: bool,
    }

    #[async_trait]
    impl TransactionSubmitter for Recorder {
        async fn submit(
            &self,
            instructions: Vec<Instruction>,
            _signers: &[Pubkey],
        ) -> Result<TxSignature, ChainError> {
            Ok(TxSignature(format!("sig-{}", instructions.len())))
        }

        async fn confirm(&self, signature: &TxSignature) -> Result<(), ChainError> {
            if self.reject_confirm {
                return Err(ChainError::Confirmation {
                    signature: signature.to_string(),
                    reason: "custom program error: 0x3".into(),
                });
            }
            self.confirmed.lock().unwrap().push(signature.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn submit_and_confirm_confirms_the_submitted_signature() {
        let recorder = Recorder::default();
        let sig = recorder.submit_and_confirm(vec![], &[]).await.unwrap();
        assert_eq!(sig, TxSignature("sig-0".into()));
        assert_eq!(*recorder.confirmed.lock().unwrap(), vec![sig]);
    }

    #[tokio::test]
    async fn confirmation_failure_propagates_verbatim() {
        let recorder = Recorder {
            reject_confirm: true,
            ..Default::default()
        };
        let err = recorder.submit_and_confirm(vec![], &[]).await.unwrap_err();
        assert_eq!(
            err,
            ChainError::Confirmation {
                signature: "sig-0".into(),
                reason: "custom program error: 0x3".into()
            }
        );
    }
}
