//! The disbursement pipeline: validated request in, broadcast hash out.
//!
//! # Data Flow
//! ```text
//! amount string → wei
//!     → connect to the requested endpoint
//!     → operator balance check
//!     → nonce + fee caps + chain id        (under the submission lock)
//!     → gas estimate
//!     → build EIP-1559 transfer, sign, broadcast
//! ```
//!
//! Strictly sequential and nothing is retried: the first failing step aborts
//! the request with that stage's error. A signed-but-unbroadcast transaction
//! is simply discarded. The submission lock spans nonce acquisition through
//! broadcast so concurrent requests cannot observe the same pending nonce.

use alloy::network::TransactionBuilder;
use alloy::primitives::utils::parse_ether;
use alloy::primitives::{Address, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::chain::client::ChainClient;
use crate::chain::types::{ChainError, ChainResult};
use crate::chain::wallet::OperatorWallet;
use crate::observability::metrics;

/// Executes withdrawals from the operator account.
#[derive(Debug)]
pub struct DisbursementEngine {
    wallet: OperatorWallet,
    rpc_timeout: Duration,
    /// Serializes nonce acquisition through broadcast across all requests.
    submission: Mutex<()>,
}

/// Convert a decimal amount in ether to wei. Fractional digits beyond the
/// 18 the chain can represent are truncated, matching integer conversion
/// semantics rather than rounding.
pub fn parse_amount(amount: &str) -> ChainResult<U256> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err(ChainError::InvalidAmount(amount.to_string()));
    }

    let truncated = match trimmed.split_once('.') {
        Some((whole, frac)) if frac.len() > 18 => match frac.get(..18) {
            Some(head) => format!("{whole}.{head}"),
            None => trimmed.to_string(),
        },
        _ => trimmed.to_string(),
    };

    parse_ether(&truncated).map_err(|_| ChainError::InvalidAmount(amount.to_string()))
}

impl DisbursementEngine {
    /// Create an engine drawing from `wallet`.
    pub fn new(wallet: OperatorWallet, rpc_timeout: Duration) -> Self {
        Self {
            wallet,
            rpc_timeout,
            submission: Mutex::new(()),
        }
    }

    /// The address disbursements are drawn from.
    pub fn operator_address(&self) -> Address {
        self.wallet.address()
    }

    /// Run the full pipeline for one withdrawal and return the transaction
    /// hash. Callers decide what to do with the failure; nothing here
    /// retries.
    pub async fn disburse(
        &self,
        network: &str,
        recipient: Address,
        amount: &str,
    ) -> ChainResult<TxHash> {
        let value = parse_amount(amount)?;
        let client = ChainClient::connect(network, self.rpc_timeout)?;
        let from = self.wallet.address();

        let balance = client.balance(from).await?;
        if balance < value {
            tracing::warn!(
                operator = %from,
                %balance,
                requested = %value,
                "operator balance below requested amount"
            );
            return Err(ChainError::InsufficientBalance {
                available: balance,
                requested: value,
            });
        }

        // Everything that depends on the operator's pending nonce runs under
        // the submission lock; a concurrent request must see this one's
        // transaction reflected in the pending count before it reads its own.
        let _guard = self.submission.lock().await;

        let nonce = client.pending_nonce(from).await?;
        let gas_fee_cap = client.gas_price().await?;
        let gas_tip_cap = client.max_priority_fee().await?;
        let chain_id = client.chain_id().await?;

        let request = TransactionRequest::default()
            .with_from(from)
            .with_to(recipient)
            .with_value(value)
            .with_nonce(nonce)
            .with_chain_id(chain_id.0)
            .with_max_fee_per_gas(gas_fee_cap)
            .with_max_priority_fee_per_gas(gas_tip_cap);

        let gas_limit = client.estimate_gas(request.clone()).await?;
        let request = request.with_gas_limit(gas_limit);

        let envelope = request
            .build(&self.wallet.network_wallet())
            .await
            .map_err(|e| ChainError::Signing(format!("{e}")))?;

        let tx_hash = client.broadcast(envelope).await?;

        metrics::record_disbursed(value);
        tracing::info!(
            %tx_hash,
            %recipient,
            value = %value,
            nonce,
            gas_limit,
            endpoint = client.endpoint(),
            "disbursement broadcast"
        );

        Ok(tx_hash)
    }
}
