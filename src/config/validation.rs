//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (cooldown >= 1h, timeouts > 0)
//! - Check addresses and URLs parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is a pure function: FaucetConfig -> Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::FaucetConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid listener bind address '{address}': {reason}")]
    BindAddress { address: String, reason: String },

    #[error("cooldown interval must be at least 1 hour")]
    CooldownInterval,

    #[error("chain RPC timeout must be at least 1 second")]
    RpcTimeout,

    #[error("invalid explorer URL '{url}': {reason}")]
    ExplorerUrl { url: String, reason: String },

    #[error("invalid metrics address '{address}': {reason}")]
    MetricsAddress { address: String, reason: String },
}

/// Validate a deserialized configuration, collecting every problem found.
pub fn validate_config(config: &FaucetConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.listener.bind_address.parse::<SocketAddr>() {
        errors.push(ValidationError::BindAddress {
            address: config.listener.bind_address.clone(),
            reason: e.to_string(),
        });
    }

    if config.cooldown.interval_hours == 0 {
        errors.push(ValidationError::CooldownInterval);
    }

    if config.chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::RpcTimeout);
    }

    if let Err(e) = url::Url::parse(&config.chain.explorer_url) {
        errors.push(ValidationError::ExplorerUrl {
            url: config.chain.explorer_url.clone(),
            reason: e.to_string(),
        });
    }

    if config.observability.metrics_enabled {
        if let Err(e) = config.observability.metrics_address.parse::<SocketAddr>() {
            errors.push(ValidationError::MetricsAddress {
                address: config.observability.metrics_address.clone(),
                reason: e.to_string(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
