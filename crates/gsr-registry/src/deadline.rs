//! Wall-clock budget for one recomputation.

use std::time::{Duration, Instant};

use gsr_core::errors::{GsrError, GsrResult};

#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    budget: Duration,
}

impl Deadline {
    pub fn start(budget_ms: u64) -> Self {
        Self {
            started: Instant::now(),
            budget: Duration::from_millis(budget_ms),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    pub fn is_expired(&self) -> bool {
        self.elapsed() >= self.budget
    }

    /// Fail with `DeadlineExceeded` once the budget is spent.
    pub fn check(&self, operation: &str) -> GsrResult<()> {
        let elapsed = self.elapsed();
        if elapsed >= self.budget {
            return Err(GsrError::DeadlineExceeded {
                operation: operation.to_string(),
                elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
                budget_ms: u64::try_from(self.budget.as_millis()).unwrap_or(u64::MAX),
            });
        }
        Ok(())
    }
}
