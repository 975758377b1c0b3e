//! Recomputations, outcomes, swarm overrides, failures.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Lock-free counters shared across recompute workers.
#[derive(Debug, Default)]
pub struct RecomputeMetrics {
    recomputations: AtomicU64,
    persisted: AtomicU64,
    purged: AtomicU64,
    swarm_overrides: AtomicU64,
    failures: AtomicU64,
    reports_ingested: AtomicU64,
}

/// Point-in-time copy of [`RecomputeMetrics`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecomputeMetricsSnapshot {
    pub recomputations: u64,
    pub persisted: u64,
    pub purged: u64,
    pub swarm_overrides: u64,
    pub failures: u64,
    pub reports_ingested: u64,
}

impl RecomputeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_persisted(&self, swarm_override: bool) {
        self.recomputations.fetch_add(1, Ordering::Relaxed);
        self.persisted.fetch_add(1, Ordering::Relaxed);
        if swarm_override {
            self.swarm_overrides.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_purged(&self) {
        self.recomputations.fetch_add(1, Ordering::Relaxed);
        self.purged.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ingested(&self) {
        self.reports_ingested.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> RecomputeMetricsSnapshot {
        RecomputeMetricsSnapshot {
            recomputations: self.recomputations.load(Ordering::Relaxed),
            persisted: self.persisted.load(Ordering::Relaxed),
            purged: self.purged.load(Ordering::Relaxed),
            swarm_overrides: self.swarm_overrides.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
            reports_ingested: self.reports_ingested.load(Ordering::Relaxed),
        }
    }
}

impl RecomputeMetricsSnapshot {
    /// Fraction of recomputations that ended in a purge.
    pub fn purge_rate(&self) -> f64 {
        if self.recomputations == 0 {
            0.0
        } else {
            self.purged as f64 / self.recomputations as f64
        }
    }
}
