//! # gsr-observability
//!
//! Structured tracing with span definitions and event helpers, plus the
//! counters the recompute pipeline reports into.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{RecomputeMetrics, RecomputeMetricsSnapshot};
pub use tracing_setup::{events, init_tracing, init_tracing_with_filter};
