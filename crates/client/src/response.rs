// Path: crates/client/src/response.rs
//! Envelopes returned by the entity-level client operations.

use hapi_types::app::{Pubkey, TxSignature};
use hapi_types::instruction::Instruction;
use serde::Serialize;

/// The result of a read: the decoded record and the address it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewResponse<T> {
    /// The derived account address.
    pub account: Pubkey,
    /// The decoded record.
    pub data: T,
}

/// The result of a write: the landed transaction and the record as re-read
/// after confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse<T> {
    /// The confirmed transaction signature.
    pub tx_hash: TxSignature,
    /// The derived account address.
    pub account: Pubkey,
    /// The record after the write.
    pub data: T,
}

impl<T> ActionResponse<T> {
    pub(crate) fn new(tx_hash: TxSignature, view: ViewResponse<T>) -> Self {
        Self {
            tx_hash,
            account: view.account,
            data: view.data,
        }
    }
}

/// A new case together with the id it was allocated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseCreated<T> {
    /// The write result.
    #[serde(flatten)]
    pub response: ActionResponse<T>,
    /// The case id read from the community counter.
    pub case_id: u64,
}

/// An unsigned case-creation instruction for signing elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseTransaction {
    /// The instruction to sign and submit.
    pub instruction: Instruction,
    /// The case id the instruction allocates.
    pub case_id: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_in_camel_case() {
        let response = CaseCreated {
            response: ActionResponse {
                tx_hash: TxSignature("5ig".into()),
                account: Pubkey::default(),
                data: 7u8,
            },
            case_id: 3,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["txHash"], "5ig");
        assert_eq!(json["account"], "11111111111111111111111111111111");
        assert_eq!(json["data"], 7);
        assert_eq!(json["caseId"], 3);
    }
}
