//! Cooperative cancellation token.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::{GsrError, GsrResult};

/// Cooperative cancellation signal.
///
/// Checked by the recomputation pipeline before every store call, so a
/// cancelled caller never starts a write it no longer wants.
pub trait Cancellable {
    /// Check if cancellation has been requested.
    fn is_cancelled(&self) -> bool;

    /// Request cancellation.
    fn cancel(&self);

    /// Fail with `GsrError::Cancelled` if cancellation was requested.
    fn check(&self, operation: &str) -> GsrResult<()> {
        if self.is_cancelled() {
            return Err(GsrError::Cancelled {
                operation: operation.to_string(),
            });
        }
        Ok(())
    }
}

/// Default implementation of a cancellation token. Clones share the flag.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a new cancellation token (not cancelled).
    pub fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl Default for CancellationToken {
    fn default() -> Self {
        Self::new()
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_flag() {
        let token = CancellationToken::new();
        let other = token.clone();
        assert!(token.check("op").is_ok());
        other.cancel();
        assert!(token.is_cancelled());
        assert!(matches!(
            token.check("op"),
            Err(GsrError::Cancelled { operation }) if operation == "op"
        ));
    }
}
