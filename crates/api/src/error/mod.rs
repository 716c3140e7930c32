// Path: crates/api/src/error/mod.rs
// Re-export all core error types from the central types crate.
pub use hapi_types::error::{
    ChainError, ClientError, CodecError, ConfigError, CoreError, DerivationError, ErrorCode,
    ValidationError,
};
pub use hapi_types::Result;
