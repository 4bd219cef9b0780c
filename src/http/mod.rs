//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, the faucet handler)
//!     → request.rs (body binding, request id)
//!     → [ledger claim + disbursement pipeline]
//!     → response.rs (typed outcome → wire JSON)
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{WithdrawalRequest, X_REQUEST_ID};
pub use response::{ApiError, Grant};
pub use server::FaucetServer;
