//! Chain RPC access with timeouts.
//!
//! # Responsibilities
//! - Build a provider for the endpoint named in the request body
//! - Query chain state (balance, nonce, fees, chain id)
//! - Estimate gas and submit signed transactions
//! - Bound every call with the configured timeout
//!
//! A client lives for one request; the faucet talks to whichever endpoint the
//! caller names, so nothing is cached across requests. Each method maps
//! transport failure and timeout to the pipeline-stage error its caller
//! reports.

use alloy::consensus::TxEnvelope;
use alloy::primitives::{Address, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::chain::types::{ChainError, ChainId, ChainResult};

/// RPC client for a single chain endpoint.
#[derive(Clone)]
pub struct ChainClient {
    provider: Arc<dyn Provider + Send + Sync>,
    timeout_duration: Duration,
    endpoint: String,
}

/// Resolve the endpoint named in a request to a URL. Bare hosts get an
/// `https://` scheme; full URLs pass through untouched.
fn endpoint_url(network: &str) -> ChainResult<url::Url> {
    let raw = if network.contains("://") {
        network.to_string()
    } else {
        format!("https://{network}")
    };
    raw.parse()
        .map_err(|e| ChainError::Connect(format!("invalid endpoint '{network}': {e}")))
}

impl ChainClient {
    /// Build a client for the given endpoint. The connection itself is lazy;
    /// the first read is what proves the endpoint reachable.
    pub fn connect(network: &str, timeout_duration: Duration) -> ChainResult<Self> {
        let url = endpoint_url(network)?;
        let provider = ProviderBuilder::new().connect_http(url.clone());

        tracing::debug!(endpoint = %url, "chain client ready");

        Ok(Self {
            provider: Arc::new(provider),
            timeout_duration,
            endpoint: url.to_string(),
        })
    }

    /// Current balance of `address`.
    pub async fn balance(&self, address: Address) -> ChainResult<U256> {
        match timeout(self.timeout_duration, self.provider.get_balance(address)).await {
            Ok(Ok(balance)) => Ok(balance),
            Ok(Err(e)) => Err(ChainError::Connect(format!("balance query failed: {e}"))),
            Err(_) => Err(self.timed_out("balance query", ChainError::Connect)),
        }
    }

    /// The operator's next usable sequence number, counting pending
    /// transactions.
    pub async fn pending_nonce(&self, address: Address) -> ChainResult<u64> {
        let fut = self.provider.get_transaction_count(address).pending();
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(nonce)) => Ok(nonce),
            Ok(Err(e)) => Err(ChainError::NonceFetch(format!("{e}"))),
            Err(_) => Err(self.timed_out("nonce query", ChainError::NonceFetch)),
        }
    }

    /// Suggested fee cap in wei per gas unit.
    pub async fn gas_price(&self) -> ChainResult<u128> {
        match timeout(self.timeout_duration, self.provider.get_gas_price()).await {
            Ok(Ok(price)) => Ok(price),
            Ok(Err(e)) => Err(ChainError::FeeEstimation(format!("gas price query failed: {e}"))),
            Err(_) => Err(self.timed_out("gas price query", ChainError::FeeEstimation)),
        }
    }

    /// Suggested priority fee (tip cap) in wei per gas unit.
    pub async fn max_priority_fee(&self) -> ChainResult<u128> {
        let fut = self.provider.get_max_priority_fee_per_gas();
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(tip)) => Ok(tip),
            Ok(Err(e)) => Err(ChainError::FeeEstimation(format!("tip cap query failed: {e}"))),
            Err(_) => Err(self.timed_out("tip cap query", ChainError::FeeEstimation)),
        }
    }

    /// The chain's numeric identifier.
    pub async fn chain_id(&self) -> ChainResult<ChainId> {
        match timeout(self.timeout_duration, self.provider.get_chain_id()).await {
            Ok(Ok(id)) => Ok(ChainId(id)),
            Ok(Err(e)) => Err(ChainError::Connect(format!("chain id query failed: {e}"))),
            Err(_) => Err(self.timed_out("chain id query", ChainError::Connect)),
        }
    }

    /// Estimate the gas units the transfer needs.
    pub async fn estimate_gas(&self, tx: TransactionRequest) -> ChainResult<u64> {
        match timeout(self.timeout_duration, self.provider.estimate_gas(tx)).await {
            Ok(Ok(gas)) => Ok(gas),
            Ok(Err(e)) => Err(ChainError::FeeEstimation(format!("gas estimation failed: {e}"))),
            Err(_) => Err(self.timed_out("gas estimation", ChainError::FeeEstimation)),
        }
    }

    /// Submit a signed transaction and return its hash.
    pub async fn broadcast(&self, envelope: TxEnvelope) -> ChainResult<TxHash> {
        let fut = self.provider.send_tx_envelope(envelope);
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(pending)) => Ok(*pending.tx_hash()),
            Ok(Err(e)) => Err(ChainError::Broadcast(format!("{e}"))),
            Err(_) => Err(self.timed_out("broadcast", ChainError::Broadcast)),
        }
    }

    /// The resolved endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn timed_out(&self, what: &str, stage: fn(String) -> ChainError) -> ChainError {
        stage(format!(
            "{what} timed out after {}s",
            self.timeout_duration.as_secs()
        ))
    }
}

impl std::fmt::Debug for ChainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainClient")
            .field("endpoint", &self.endpoint)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_host_gets_https_scheme() {
        let url = endpoint_url("rpc.sepolia.mantle.xyz").unwrap();
        assert_eq!(url.as_str(), "https://rpc.sepolia.mantle.xyz/");
    }

    #[test]
    fn test_full_url_passes_through() {
        let url = endpoint_url("http://127.0.0.1:8545").unwrap();
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.port(), Some(8545));
    }

    #[test]
    fn test_invalid_endpoint_is_connect_error() {
        let err = ChainClient::connect("not a host", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, ChainError::Connect(_)));
    }
}
