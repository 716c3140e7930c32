// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(
    not(test),
    deny(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::unimplemented,
        clippy::todo
    )
)]

//! # HAPI Types
//!
//! This crate is the foundational library of the HAPI SDK. It holds everything
//! that can be computed without touching the network: the category table, the
//! fixed binary layouts of every on-chain account, the seed paths and derivation
//! of account addresses, and the binary encoding of program instructions.
//!
//! ## Architectural Role
//!
//! As the base crate, `hapi-types` performs no I/O and is a dependency of every
//! other crate in the workspace. The orchestration layer (`hapi-client`) composes
//! these pure functions with the fetch and submit collaborators defined in
//! `hapi-api`.

/// A top-level, crate-wide `Result` type alias with a default error type.
pub type Result<T, E = crate::error::CoreError> = std::result::Result<T, E>;

/// Account records (wire and domain forms), the category table and shared enums.
pub mod app;
/// The fixed-layout binary codec shared by account records and instructions.
pub mod codec;
/// Client configuration loaded from TOML.
pub mod config;
/// Deterministic program address derivation.
pub mod derivation;
/// A unified set of all error types used across the SDK.
pub mod error;
/// Program instructions: tags, payload encoding and account-list builders.
pub mod instruction;
/// Seed literals and seed paths that locate every entity on chain.
pub mod keys;
/// A prelude containing useful extension traits like `OptionExt`.
pub mod prelude;
