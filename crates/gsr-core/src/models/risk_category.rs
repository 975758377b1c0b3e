use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// The kind of threat a report describes. Closed set: every variant has a weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskCategory {
    Spam,
    Fraud,
    Phishing,
    DebtCollection,
    Sales,
    /// Synthetic event: a client app blocked a call automatically.
    /// Feeds the velocity signal only, never the decayed sum.
    AutoBlock,
}

impl RiskCategory {
    /// Every category, including the synthetic automated-block event.
    pub const ALL: [RiskCategory; 6] = [
        Self::Spam,
        Self::Fraud,
        Self::Phishing,
        Self::DebtCollection,
        Self::Sales,
        Self::AutoBlock,
    ];

    /// Categories a human reporter may submit.
    pub const HUMAN: [RiskCategory; 5] = [
        Self::Spam,
        Self::Fraud,
        Self::Phishing,
        Self::DebtCollection,
        Self::Sales,
    ];

    /// Base severity weight fed into the decay model.
    pub fn base_weight(self) -> f64 {
        match self {
            Self::Fraud => 100.0,
            Self::Phishing => 90.0,
            Self::DebtCollection => 40.0,
            Self::Spam => 20.0,
            Self::Sales => 10.0,
            Self::AutoBlock => 0.0,
        }
    }

    /// True for the synthetic automated-block event.
    pub fn is_automated(self) -> bool {
        matches!(self, Self::AutoBlock)
    }

    /// Wire/storage name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spam => "SPAM",
            Self::Fraud => "FRAUD",
            Self::Phishing => "PHISHING",
            Self::DebtCollection => "DEBT_COLLECTION",
            Self::Sales => "SALES",
            Self::AutoBlock => "AUTO_BLOCK",
        }
    }
}

impl fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive parse; surrounding whitespace is ignored.
impl FromStr for RiskCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == upper)
            .ok_or_else(|| ValidationError::UnknownCategory {
                category: s.to_string(),
            })
    }
}
