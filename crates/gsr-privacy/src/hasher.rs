//! Keyed BLAKE3 identity hashing with a process-wide secret.

use std::fmt;
use std::sync::{Arc, OnceLock};

use gsr_core::constants::IDENTITY_KEY_CONTEXT;
use gsr_core::errors::{GsrError, GsrResult};
use gsr_core::traits::IIdentityHasher;

/// Hashes reporter identities with a key derived from a secret.
///
/// The 32-byte key comes from `blake3::derive_key`, so any secret length is
/// accepted and the key is domain-separated from other uses of the secret.
#[derive(Clone)]
pub struct Blake3IdentityHasher {
    key: [u8; 32],
}

impl Blake3IdentityHasher {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            key: blake3::derive_key(IDENTITY_KEY_CONTEXT, secret),
        }
    }

    /// Build from a secret string, rejecting empty secrets.
    pub fn from_secret(secret: &str) -> GsrResult<Self> {
        if secret.trim().is_empty() {
            return Err(GsrError::ConfigError(
                "identity hashing secret must not be empty".into(),
            ));
        }
        Ok(Self::new(secret.as_bytes()))
    }

    /// Read the secret from the named environment variable.
    pub fn from_env(var: &str) -> GsrResult<Self> {
        let secret = std::env::var(var)
            .map_err(|e| GsrError::ConfigError(format!("{var}: {e}")))?;
        Self::from_secret(&secret)
    }
}

impl IIdentityHasher for Blake3IdentityHasher {
    fn hash_identity(&self, raw_identity: &str) -> String {
        blake3::keyed_hash(&self.key, raw_identity.as_bytes())
            .to_hex()
            .to_string()
    }
}

// Never print the key.
impl fmt::Debug for Blake3IdentityHasher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blake3IdentityHasher").finish_non_exhaustive()
    }
}

static GLOBAL_HASHER: OnceLock<Arc<Blake3IdentityHasher>> = OnceLock::new();

/// Install the process-wide hasher. Only the first call takes effect;
/// returns false if a hasher was already installed.
pub fn init_global_hasher(hasher: Blake3IdentityHasher) -> bool {
    let installed = GLOBAL_HASHER.set(Arc::new(hasher)).is_ok();
    if !installed {
        tracing::warn!("identity hasher already initialized; ignoring re-initialization");
    }
    installed
}

/// The process-wide hasher, or `HashingNotInitialized`.
pub fn global_hasher() -> GsrResult<Arc<Blake3IdentityHasher>> {
    GLOBAL_HASHER
        .get()
        .cloned()
        .ok_or(GsrError::HashingNotInitialized)
}
