//! Chain-side types and the disbursement error taxonomy.

use alloy::primitives::U256;
use thiserror::Error;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors from the disbursement pipeline.
///
/// One variant per pipeline stage, so the HTTP boundary can map each failure
/// to the right status code and callers can tell retry-later failures
/// (connectivity, estimation) from do-not-retry ones (amount, balance) from
/// maybe-already-happened ones (broadcast).
#[derive(Debug, Error)]
pub enum ChainError {
    /// The amount string did not parse as a decimal number.
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    /// The endpoint could not be reached or a basic chain read failed.
    #[error("chain endpoint unreachable: {0}")]
    Connect(String),

    /// Operator key problem surfacing at request time.
    #[error("wallet error: {0}")]
    Wallet(String),

    /// The operator account cannot cover the requested amount.
    #[error("insufficient operator balance: have {available} wei, need {requested} wei")]
    InsufficientBalance { available: U256, requested: U256 },

    /// The operator's pending nonce could not be read.
    #[error("nonce fetch failed: {0}")]
    NonceFetch(String),

    /// Fee cap, tip cap, or gas estimation failed.
    #[error("fee estimation failed: {0}")]
    FeeEstimation(String),

    /// The assembled transaction could not be signed.
    #[error("transaction signing failed: {0}")]
    Signing(String),

    /// Submission failed; the transaction may or may not have been accepted.
    #[error("transaction broadcast failed: {0}")]
    Broadcast(String),
}

/// Result type for chain operations.
pub type ChainResult<T> = Result<T, ChainError>;
