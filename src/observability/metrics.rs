//! Metrics collection and exposition.
//!
//! # Metrics
//! - `faucet_requests_total` (counter): requests by outcome
//! - `faucet_request_duration_seconds` (histogram): end-to-end latency
//! - `faucet_disbursed_wei_total` (counter): total value granted

use alloy::primitives::U256;
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter, serving scrapes on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "failed to install metrics exporter"),
    }
}

/// Record a completed faucet request.
pub fn record_request(outcome: &'static str, started: Instant) {
    metrics::counter!("faucet_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("faucet_request_duration_seconds")
        .record(started.elapsed().as_secs_f64());
}

/// Record granted value. The counter is 64-bit; amounts beyond that saturate.
pub fn record_disbursed(wei: U256) {
    metrics::counter!("faucet_disbursed_wei_total")
        .increment(u64::try_from(wei).unwrap_or(u64::MAX));
}
