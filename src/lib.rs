//! Mantle testnet faucet service.
//!
//! A single-endpoint HTTP service that disburses small amounts of the native
//! token from an operator-controlled wallet, at most one withdrawal per
//! address per cooldown window.
//!
//! # Architecture Overview
//!
//! ```text
//! POST /mantle/request
//!     → http      (body binding, address validation, wire format)
//!     → ledger    (atomic cooldown claim per address)
//!     → chain     (balance → nonce/fees → gas estimate → sign → broadcast)
//!     → ledger commit + reply {tx_id, explorer_url}
//! ```
//!
//! The cooldown ledger is volatile; restarting the process resets every
//! address's withdrawal history.

pub mod chain;
pub mod config;
pub mod http;
pub mod ledger;
pub mod observability;

pub use chain::{ChainError, DisbursementEngine, OperatorWallet};
pub use config::FaucetConfig;
pub use http::FaucetServer;
pub use ledger::CooldownLedger;
