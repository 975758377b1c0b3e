// Single source of truth for all default values.

// --- Scoring ---
pub const DEFAULT_HALF_LIFE_DAYS: f64 = 110.0;
pub const DEFAULT_VELOCITY_WINDOW_DAYS: u32 = 7;
pub const DEFAULT_VELOCITY_THRESHOLD: u32 = 10;
pub const DEFAULT_SWARM_SCORE_FLOOR: f64 = 25.0;
pub const DEFAULT_PURGE_THRESHOLD: f64 = 5.0;
pub const DEFAULT_SCORE_TTL_SECS: u64 = 31_536_000; // 1 year

// --- Storage ---
pub const DEFAULT_DB_FILENAME: &str = "gsr.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;
pub const DEFAULT_BUSY_TIMEOUT_MS: u32 = 5_000;
pub const DEFAULT_REPORT_TTL_SECS: u64 = 47_304_000; // 18 months

// --- Privacy ---
pub const DEFAULT_SECRET_ENV: &str = "GSR_SALT_SECRET";
pub const DEFAULT_MAX_COMMENT_LEN: usize = 1_000;

// --- Recompute ---
pub const DEFAULT_RECOMPUTE_DEADLINE_MS: u64 = 10_000;
pub const DEFAULT_BATCH_PARALLELISM: usize = 4;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
