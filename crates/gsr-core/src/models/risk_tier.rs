use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Discrete risk classification derived from the numeric score.
///
/// Variant order is severity order, so `Ord` compares tiers by danger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskTier {
    #[default]
    Safe,
    Warning,
    Critical,
}

impl RiskTier {
    /// Lower bound (inclusive) of the warning tier.
    pub const WARNING_THRESHOLD: f64 = 20.0;
    /// Lower bound (inclusive) of the critical tier.
    pub const CRITICAL_THRESHOLD: f64 = 60.0;

    /// Total mapping from score to tier. Boundaries are closed at the lower end.
    pub fn from_score(score: f64) -> Self {
        if score >= Self::CRITICAL_THRESHOLD {
            Self::Critical
        } else if score >= Self::WARNING_THRESHOLD {
            Self::Warning
        } else {
            Self::Safe
        }
    }

    pub fn is_safe(self) -> bool {
        self == Self::Safe
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Safe => "SAFE",
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SAFE" => Ok(Self::Safe),
            "WARNING" => Ok(Self::Warning),
            "CRITICAL" => Ok(Self::Critical),
            other => Err(format!("unknown risk tier '{other}'")),
        }
    }
}
