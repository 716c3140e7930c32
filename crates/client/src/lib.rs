// Path: crates/client/src/lib.rs
//! # HAPI Client Crate Lints
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
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # HAPI Client
//!
//! Entity-level operations over the HAPI program. [`ReaderClient`] derives,
//! fetches and decodes records; [`AuthorityClient`] and [`ReporterClient`]
//! encode, submit and confirm instructions, then re-read the record they wrote.
//! Chain access goes through the collaborator traits of `hapi-api`;
//! [`RpcAccountFetcher`] is the JSON-RPC implementation of the read side.

pub mod authority;
pub mod reader;
pub mod reporter;
pub mod response;
pub mod rpc;

pub use authority::AuthorityClient;
pub use reader::ReaderClient;
pub use reporter::ReporterClient;
pub use response::{ActionResponse, CaseCreated, CaseTransaction, ViewResponse};
pub use rpc::RpcAccountFetcher;
