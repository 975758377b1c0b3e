pub mod category;
pub mod consensus;
pub mod temporal;
pub mod velocity;

use chrono::{DateTime, Utc};

/// Context needed to score one phone number's history.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    /// The instant ages are measured against.
    pub now: DateTime<Utc>,
}

impl ScoringContext {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }
}

impl Default for ScoringContext {
    fn default() -> Self {
        Self { now: Utc::now() }
    }
}
