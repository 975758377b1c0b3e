use serde::{Deserialize, Serialize};

use super::defaults;

/// Privacy subsystem configuration.
///
/// Only the *name* of the environment variable holding the hashing secret
/// lives here. The secret itself is never serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrivacyConfig {
    /// Environment variable read once at startup for the hashing secret.
    pub secret_env: String,
    /// Maximum accepted comment length in characters.
    pub max_comment_len: usize,
}

impl Default for PrivacyConfig {
    fn default() -> Self {
        Self {
            secret_env: defaults::DEFAULT_SECRET_ENV.to_string(),
            max_comment_len: defaults::DEFAULT_MAX_COMMENT_LEN,
        }
    }
}
