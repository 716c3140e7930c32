// Path: crates/types/src/error/mod.rs
//! Core error types for the HAPI SDK.
//!
//! Every failure surfaces to the caller with its kind and the offending value;
//! nothing in the SDK retries or swallows an error.

use crate::app::AccountType;
use thiserror::Error;

/// A trait for assigning a stable, machine-readable string code to an error.
pub trait ErrorCode {
    /// Returns the unique, stable string identifier for this error variant.
    fn code(&self) -> &'static str;
}

/// Input rejected before any encoding or network interaction took place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A name exceeds the maximum encoded length.
    #[error("Name is {len} bytes long, the maximum is {max}")]
    NameTooLong {
        /// The UTF-8 encoded length of the rejected name.
        len: usize,
        /// The maximum allowed length.
        max: usize,
    },
    /// A risk score outside `0..=10`.
    #[error("Risk score {0} is outside the range 0..=10")]
    RiskOutOfRange(i64),
    /// A case status value that is neither `Open` nor `Closed`.
    #[error("Invalid case status: {0}")]
    InvalidStatus(u8),
    /// A category value, or bitmask bit, that is not part of the category table.
    #[error("Invalid category value: {0:#x}")]
    InvalidCategory(u32),
    /// A category tag that has no position in the category table.
    #[error("Unknown category: {0}")]
    UnknownCategory(u32),
    /// A category table index past the end of the table.
    #[error("Category index {0} is out of range")]
    IndexOutOfRange(u8),
    /// A reporter type value outside the known range.
    #[error("Invalid reporter type: {0}")]
    InvalidReporterType(u8),
    /// A display name that matches no variant of the named enum.
    #[error("Unknown {kind} name: {value}")]
    UnknownName {
        /// The enum being parsed, e.g. `category`.
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
}

impl ErrorCode for ValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::NameTooLong { .. } => "VALIDATION_NAME_TOO_LONG",
            Self::RiskOutOfRange(_) => "VALIDATION_RISK_OUT_OF_RANGE",
            Self::InvalidStatus(_) => "VALIDATION_INVALID_STATUS",
            Self::InvalidCategory(_) => "VALIDATION_INVALID_CATEGORY",
            Self::UnknownCategory(_) => "VALIDATION_UNKNOWN_CATEGORY",
            Self::IndexOutOfRange(_) => "VALIDATION_INDEX_OUT_OF_RANGE",
            Self::InvalidReporterType(_) => "VALIDATION_INVALID_REPORTER_TYPE",
            Self::UnknownName { .. } => "VALIDATION_UNKNOWN_NAME",
        }
    }
}

/// Errors raised while decoding an account record or an instruction payload.
///
/// A decode error means either a wire-format mismatch (wrong program id) or
/// corrupted storage. It is never defaulted away.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The buffer ended before the layout was complete.
    #[error("Buffer truncated: needed {needed} bytes, {remaining} remaining")]
    TruncatedBuffer {
        /// Bytes required by the next field (or by the whole minimum layout).
        needed: usize,
        /// Bytes left in the buffer.
        remaining: usize,
    },
    /// An enum-typed field held a value outside its known range.
    #[error("Invalid {field} discriminant: {value}")]
    InvalidDiscriminant {
        /// The field being decoded.
        field: &'static str,
        /// The raw value found on the wire.
        value: u8,
    },
    /// A record of one account type was decoded as another.
    #[error("Expected a {expected} account, found {found}")]
    UnexpectedAccountType {
        /// The account type the caller asked for.
        expected: AccountType,
        /// The account type stored in the leading byte.
        found: AccountType,
    },
    /// A string field contained malformed UTF-8.
    #[error("Invalid UTF-8 in {field}: {source}")]
    InvalidUtf8 {
        /// The field being decoded.
        field: &'static str,
        /// The underlying UTF-8 error.
        #[source]
        source: std::str::Utf8Error,
    },
    /// A stored name declared a length larger than any valid name.
    #[error("Encoded {field} is {len} bytes long, the maximum is {max}")]
    NameTooLong {
        /// The field being decoded.
        field: &'static str,
        /// The declared length prefix.
        len: usize,
        /// The maximum allowed length.
        max: usize,
    },
    /// A category bitmask with bits that map to no category.
    #[error("Category bitmask {0:#x} contains bits outside the category table")]
    InvalidCategoryBits(u32),
}

impl ErrorCode for CodecError {
    fn code(&self) -> &'static str {
        match self {
            Self::TruncatedBuffer { .. } => "CODEC_TRUNCATED_BUFFER",
            Self::InvalidDiscriminant { .. } => "CODEC_INVALID_DISCRIMINANT",
            Self::UnexpectedAccountType { .. } => "CODEC_UNEXPECTED_ACCOUNT_TYPE",
            Self::InvalidUtf8 { .. } => "CODEC_INVALID_UTF8",
            Self::NameTooLong { .. } => "CODEC_NAME_TOO_LONG",
            Self::InvalidCategoryBits(_) => "CODEC_INVALID_CATEGORY_BITS",
        }
    }
}

/// Errors raised by the program address derivation primitive.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DerivationError {
    /// A single seed is longer than the host chain allows.
    #[error("Seed {index} is {len} bytes long, the maximum is {max}")]
    MaxSeedLengthExceeded {
        /// Position of the seed in the seed path.
        index: usize,
        /// Length of the offending seed.
        len: usize,
        /// The maximum seed length.
        max: usize,
    },
    /// The seed path has more elements than the host chain allows.
    #[error("{count} seeds supplied, the maximum is {max}")]
    TooManySeeds {
        /// Number of seeds supplied (bump included).
        count: usize,
        /// The maximum number of seeds.
        max: usize,
    },
    /// The hashed seeds landed on the ed25519 curve.
    #[error("Derived address lies on the ed25519 curve")]
    OnCurve,
    /// Every bump value produced an on-curve point.
    #[error("No bump seed produced a valid program address")]
    NoViableBump,
}

impl ErrorCode for DerivationError {
    fn code(&self) -> &'static str {
        match self {
            Self::MaxSeedLengthExceeded { .. } => "DERIVATION_MAX_SEED_LENGTH",
            Self::TooManySeeds { .. } => "DERIVATION_TOO_MANY_SEEDS",
            Self::OnCurve => "DERIVATION_ON_CURVE",
            Self::NoViableBump => "DERIVATION_NO_VIABLE_BUMP",
        }
    }
}

/// Errors reported by the fetch and submit collaborators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// The request never reached the chain, or its response was unreadable.
    #[error("Transport error: {0}")]
    Transport(String),
    /// The chain or the program rejected the transaction. The reason is the
    /// program-reported message, passed through verbatim.
    #[error("Transaction rejected: {reason}")]
    Submission {
        /// The rejection reason reported by the chain.
        reason: String,
    },
    /// The transaction landed but failed during execution.
    #[error("Transaction {signature} failed: {reason}")]
    Confirmation {
        /// The signature of the failed transaction.
        signature: String,
        /// The failure reason reported by the chain.
        reason: String,
    },
}

impl ErrorCode for ChainError {
    fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "CHAIN_TRANSPORT",
            Self::Submission { .. } => "CHAIN_SUBMISSION_REJECTED",
            Self::Confirmation { .. } => "CHAIN_CONFIRMATION_FAILED",
        }
    }
}

/// Errors raised while loading a client configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// The path that failed to load.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The configuration is not valid TOML or does not match the schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// The configuration parsed but holds an unusable value.
    #[error("Invalid config: {0}")]
    Invalid(String),
}

impl ErrorCode for ConfigError {
    fn code(&self) -> &'static str {
        match self {
            Self::Io { .. } => "CONFIG_IO",
            Self::Parse(_) => "CONFIG_PARSE",
            Self::Invalid(_) => "CONFIG_INVALID",
        }
    }
}

/// The union of errors produced by the pure (I/O-free) layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Binary decoding failed.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// Address derivation failed.
    #[error(transparent)]
    Derivation(#[from] DerivationError),
}

impl ErrorCode for CoreError {
    fn code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.code(),
            Self::Codec(e) => e.code(),
            Self::Derivation(e) => e.code(),
        }
    }
}

/// Errors returned by the entity-level client operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// Input validation failed; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The derived address holds no account.
    #[error("{kind} account not found: {key}")]
    NotFound {
        /// The kind of entity looked up.
        kind: AccountType,
        /// A human-readable description of the lookup key.
        key: String,
    },
    /// An account was found but its bytes did not decode.
    #[error("Failed to decode {kind} account at {address}: {source}")]
    Decode {
        /// The kind of entity being decoded.
        kind: AccountType,
        /// The base58 address of the account.
        address: String,
        /// The underlying codec error.
        #[source]
        source: CodecError,
    },
    /// A codec error outside of an account read.
    #[error(transparent)]
    Codec(#[from] CodecError),
    /// Address derivation failed.
    #[error(transparent)]
    Derivation(#[from] DerivationError),
    /// The fetch or submit collaborator failed.
    #[error(transparent)]
    Chain(#[from] ChainError),
    /// Neither the call nor the client context named a community.
    #[error("Community name not specified")]
    CommunityNotSpecified,
    /// The client configuration was rejected.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl From<CoreError> for ClientError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation(e) => Self::Validation(e),
            CoreError::Codec(e) => Self::Codec(e),
            CoreError::Derivation(e) => Self::Derivation(e),
        }
    }
}

impl ErrorCode for ClientError {
    fn code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.code(),
            Self::NotFound { .. } => "CLIENT_NOT_FOUND",
            Self::Decode { .. } => "CLIENT_DECODE_FAILED",
            Self::Codec(e) => e.code(),
            Self::Derivation(e) => e.code(),
            Self::Chain(e) => e.code(),
            Self::CommunityNotSpecified => "CLIENT_COMMUNITY_NOT_SPECIFIED",
            Self::InvalidConfig(_) => "CLIENT_INVALID_CONFIG",
        }
    }
}
