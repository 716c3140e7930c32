// Path: crates/telemetry/src/lib.rs
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

//! # HAPI Telemetry
//!
//! This crate provides the observability infrastructure for the HAPI SDK:
//! initialization of global structured logging, and a scope timer that reports
//! the latency of network round trips through `tracing`.

/// The initialization routine for global structured logging.
pub mod init;
/// A simple RAII timer for measuring the duration of a scope.
pub mod time;

pub use init::{init_tracing, LogFormat};
pub use time::Timer;
