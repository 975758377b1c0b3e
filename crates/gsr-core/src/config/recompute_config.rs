use serde::{Deserialize, Serialize};

use super::defaults;

/// Recomputation pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecomputeConfig {
    /// Wall-clock budget for one read-compute-write cycle (milliseconds).
    pub deadline_ms: u64,
    /// Worker threads used by batch recomputation.
    pub batch_parallelism: usize,
}

impl Default for RecomputeConfig {
    fn default() -> Self {
        Self {
            deadline_ms: defaults::DEFAULT_RECOMPUTE_DEADLINE_MS,
            batch_parallelism: defaults::DEFAULT_BATCH_PARALLELISM,
        }
    }
}
