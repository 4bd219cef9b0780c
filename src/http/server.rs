//! HTTP server setup and the faucet request handler.
//!
//! # Responsibilities
//! - Create the Axum Router (faucet endpoint + health probe)
//! - Wire up middleware (request id, tracing, timeout)
//! - Sequence one withdrawal: validate → claim cooldown → disburse → record
//! - Decode typed outcomes into the wire format
//! - Serve with graceful shutdown

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::chain::{ChainError, DisbursementEngine, OperatorWallet};
use crate::config::FaucetConfig;
use crate::http::request::{request_id, WithdrawalRequest};
use crate::http::response::{ApiError, Grant};
use crate::ledger::CooldownLedger;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub ledger: Arc<CooldownLedger>,
    pub engine: Arc<DisbursementEngine>,
    pub cooldown_window: Duration,
    pub cooldown_hours: u64,
    pub explorer_url: String,
}

/// HTTP server for the faucet.
pub struct FaucetServer {
    router: Router,
    config: FaucetConfig,
}

impl FaucetServer {
    /// Build the server from a validated configuration. Fails if the
    /// operator key cannot be loaded; a bad key is a startup defect, not
    /// something to discover per request.
    pub fn new(config: FaucetConfig) -> Result<Self, ChainError> {
        let wallet = OperatorWallet::load(config.chain.private_key.as_deref())?;
        let engine = DisbursementEngine::new(
            wallet,
            Duration::from_secs(config.chain.rpc_timeout_secs),
        );

        let state = AppState {
            ledger: Arc::new(CooldownLedger::new()),
            engine: Arc::new(engine),
            cooldown_window: config.cooldown.window(),
            cooldown_hours: config.cooldown.interval_hours,
            explorer_url: config.chain.explorer_url.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &FaucetConfig, state: AppState) -> Router {
        Router::new()
            .route("/mantle/request", post(request_funds))
            .route("/health", get(health))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(axum::middleware::from_fn(request_id))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "faucet server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("faucet server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &FaucetConfig {
        &self.config
    }
}

async fn health() -> &'static str {
    "ok"
}

/// `POST /mantle/request`: validate the body, claim the cooldown slot, run
/// the disbursement, and reply. The ledger is only advanced after a
/// successful broadcast; every failure path releases the claim untouched.
async fn request_funds(
    State(state): State<AppState>,
    payload: Result<Json<WithdrawalRequest>, JsonRejection>,
) -> Result<Grant, ApiError> {
    let started = Instant::now();

    let Json(request) = payload.map_err(|rejection| {
        metrics::record_request("invalid_body", started);
        ApiError::Validation(rejection.body_text())
    })?;

    let address: alloy::primitives::Address = match request.address.parse() {
        Ok(address) => address,
        Err(_) => {
            tracing::debug!(address = %request.address, "rejected malformed address");
            metrics::record_request("invalid_address", started);
            return Err(ApiError::Validation(
                "Please check and enter a valid wallet address.".to_string(),
            ));
        }
    };

    let claim = match state
        .ledger
        .claim(address, state.cooldown_window, Instant::now())
    {
        Ok(claim) => claim,
        Err(reason) => {
            tracing::debug!(%address, %reason, "cooldown rejection");
            metrics::record_request("cooldown", started);
            return Err(ApiError::Cooldown(state.cooldown_hours));
        }
    };

    match state
        .engine
        .disburse(&request.network, address, &request.amount)
        .await
    {
        Ok(tx_hash) => {
            state.ledger.commit(claim, Instant::now());
            metrics::record_request("granted", started);

            let tx_id = format!("{tx_hash:#x}");
            let explorer_url = format!("{}{}", state.explorer_url, tx_id);
            Ok(Grant {
                tx_id,
                explorer_url,
            })
        }
        Err(err) => {
            state.ledger.release(claim);
            match &err {
                ChainError::InvalidAmount(_) => {
                    tracing::debug!(%address, error = %err, "rejected malformed amount");
                }
                ChainError::InsufficientBalance { .. } => {
                    tracing::warn!(%address, error = %err, "disbursement refused");
                }
                _ => {
                    tracing::error!(
                        %address,
                        network = %request.network,
                        error = %err,
                        "disbursement failed"
                    );
                }
            }
            metrics::record_request(outcome_label(&err), started);
            Err(err.into())
        }
    }
}

fn outcome_label(err: &ChainError) -> &'static str {
    match err {
        ChainError::InvalidAmount(_) => "invalid_amount",
        ChainError::Connect(_) => "connect_error",
        ChainError::Wallet(_) => "wallet_error",
        ChainError::InsufficientBalance { .. } => "insufficient_balance",
        ChainError::NonceFetch(_) => "nonce_error",
        ChainError::FeeEstimation(_) => "fee_error",
        ChainError::Signing(_) => "signing_error",
        ChainError::Broadcast(_) => "broadcast_error",
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
