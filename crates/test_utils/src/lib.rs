// Path: crates/test_utils/src/lib.rs
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::unimplemented,
        clippy::todo,
        clippy::indexing_slicing
    )
)]

//! # HAPI Test Utilities
//!
//! An in-memory emulation of the HAPI program that implements both chain
//! collaborator traits, pinned byte fixtures, and
//! assertion macros shared by the workspace's tests.

pub mod assertions;
pub mod fixtures;
pub mod ledger;

pub use ledger::{MockLedger, ProgramError};

#[doc(hidden)]
pub use base64 as __base64;
