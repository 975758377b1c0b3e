/// Registry version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Seconds in one day, used by every age computation.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Upper bound of the score scale.
pub const MAX_SCORE: f64 = 100.0;

/// Country code used when a purge happens before any country is known.
pub const UNKNOWN_COUNTRY: &str = "XX";

/// Domain-separation context for deriving the reporter hashing key.
pub const IDENTITY_KEY_CONTEXT: &str = "gsr 2024-01 reporter identity v1";
