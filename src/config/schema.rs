//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the faucet.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root configuration for the faucet service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct FaucetConfig {
    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// Withdrawal cooldown policy.
    pub cooldown: CooldownConfig,

    /// Chain access and operator wallet settings.
    pub chain: ChainConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Total time budget for one request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Withdrawal cooldown policy. One process-wide window, keyed by
/// destination address.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CooldownConfig {
    /// Minimum time between two withdrawals to the same address, in hours.
    pub interval_hours: u64,
}

impl CooldownConfig {
    /// The cooldown window as a duration.
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.interval_hours * 3600)
    }
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self { interval_hours: 24 }
    }
}

/// Chain access and operator wallet settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// Per-RPC-call timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Operator private key, hex encoded. The `FAUCET_OPERATOR_KEY`
    /// environment variable takes precedence so keys can stay out of
    /// config files.
    pub private_key: Option<String>,

    /// Block explorer base; the transaction hash is appended to build the
    /// link returned to callers.
    pub explorer_url: String,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_timeout_secs: 10,
            private_key: None,
            explorer_url: "https://explorer.sepolia.mantle.xyz/tx/".to_string(),
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9100".to_string(),
        }
    }
}
