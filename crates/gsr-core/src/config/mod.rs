pub mod defaults;
mod observability_config;
mod privacy_config;
mod recompute_config;
mod scoring_config;
mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{GsrError, GsrResult};

pub use observability_config::ObservabilityConfig;
pub use privacy_config::PrivacyConfig;
pub use recompute_config::RecomputeConfig;
pub use scoring_config::ScoringConfig;
pub use storage_config::StorageConfig;

/// Top-level configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GsrConfig {
    pub scoring: ScoringConfig,
    pub storage: StorageConfig,
    pub privacy: PrivacyConfig,
    pub recompute: RecomputeConfig,
    pub observability: ObservabilityConfig,
}

impl GsrConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml(toml_str: &str) -> GsrResult<Self> {
        let config: Self =
            toml::from_str(toml_str).map_err(|e| GsrError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file on disk.
    pub fn from_file(path: &Path) -> GsrResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GsrError::ConfigError(format!("{}: {e}", path.display())))?;
        Self::from_toml(&content)
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> GsrResult<()> {
        let s = &self.scoring;
        if !(s.half_life_days.is_finite() && s.half_life_days > 0.0) {
            return Err(GsrError::ConfigError(format!(
                "scoring.half_life_days must be positive, got {}",
                s.half_life_days
            )));
        }
        if s.velocity_window_days == 0 {
            return Err(GsrError::ConfigError(
                "scoring.velocity_window_days must be at least 1".into(),
            ));
        }
        if !(0.0..=100.0).contains(&s.purge_threshold) {
            return Err(GsrError::ConfigError(format!(
                "scoring.purge_threshold must be within [0, 100], got {}",
                s.purge_threshold
            )));
        }
        if !(0.0..=100.0).contains(&s.swarm_score_floor) {
            return Err(GsrError::ConfigError(format!(
                "scoring.swarm_score_floor must be within [0, 100], got {}",
                s.swarm_score_floor
            )));
        }
        if self.recompute.batch_parallelism == 0 {
            return Err(GsrError::ConfigError(
                "recompute.batch_parallelism must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
