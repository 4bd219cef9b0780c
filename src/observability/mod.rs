//! Observability subsystem: structured logging lives in `main` (tracing
//! subscriber init); metric definitions and the Prometheus exporter live
//! here.

pub mod metrics;
