// Path: crates/api/src/lib.rs

//! # HAPI API Crate Lints
//!
//! This crate enforces a strict set of lints to ensure high-quality,
//! panic-free, and well-documented code. Panics are disallowed in non-test
//! code to promote robust error handling.
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::indexing_slicing
    )
)]
#![deny(missing_docs)]
//! # HAPI API
//!
//! The boundary between the SDK and the host chain. The SDK needs exactly two
//! capabilities from the outside world: fetch the raw bytes stored at an
//! address, and submit a signed transaction then wait for its outcome. Both are
//! expressed here as object-safe async traits so that the orchestration layer
//! can run against a live RPC node or an in-memory ledger alike.

/// Collaborator traits for account reads and transaction submission.
pub mod chain;
/// Re-exports all core error types from the central `hapi-types` crate.
pub mod error;

/// A curated set of the most commonly used traits and types.
pub mod prelude {
    pub use crate::chain::{AccountFetcher, TransactionSubmitter};
    pub use crate::error::{ChainError, ClientError, ErrorCode};
}
