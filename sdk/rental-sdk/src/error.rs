use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// SDK-specific error types for rental marketplace operations
#[derive(Debug, Error)]
pub enum RentalSdkError {
    /// A caller-supplied address could not be parsed
    #[error("Invalid {field}: {reason}")]
    InvalidAddress { field: String, reason: String },

    /// A caller-supplied argument is out of range
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Seeds cannot produce a program address
    #[error("Invalid seeds for program address derivation")]
    InvalidSeeds,

    /// Account not found on-chain
    #[error("{entity} not found: {address}")]
    AccountNotFound {
        entity: &'static str,
        address: Pubkey,
    },

    /// Account exists but does not decode as the expected schema
    #[error("Invalid {entity} account data: {reason}")]
    InvalidAccountData {
        entity: &'static str,
        reason: String,
    },

    /// Caller identity does not match the on-chain record
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Connection or RPC error
    #[error("Connection error: {0}")]
    Connection(String),
}

/// Result type alias for SDK operations
pub type Result<T> = std::result::Result<T, RentalSdkError>;
