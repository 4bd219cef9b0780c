//! Chain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Config / environment (operator key)
//!     → wallet.rs (key loading, address derivation, signing)
//!     → client.rs (per-request RPC connection with timeouts)
//!     → disburse.rs (the six-step withdrawal pipeline)
//! ```
//!
//! # Security Constraints
//! - The operator key is never logged or serialized
//! - All RPC calls have a configured timeout
//! - Nothing is retried; every failure surfaces to the caller

pub mod client;
pub mod disburse;
pub mod types;
pub mod wallet;

pub use client::ChainClient;
pub use disburse::{parse_amount, DisbursementEngine};
pub use types::{ChainError, ChainId, ChainResult};
pub use wallet::OperatorWallet;
