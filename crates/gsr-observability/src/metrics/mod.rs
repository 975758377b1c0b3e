//! Counters for the recompute pipeline.

mod recompute_metrics;

pub use recompute_metrics::{RecomputeMetrics, RecomputeMetricsSnapshot};
