//! Retry coordination for transient persistence conflicts
//!
//! Absorbs unique-constraint violations and optimistic-concurrency failures
//! by re-running the operation with linear backoff. Anything else propagates
//! immediately. Because the operation may run more than once, callers must
//! keep it idempotent - in practice by re-checking preconditions (existence
//! checks, state reads) inside the operation itself.

use std::future::Future;
use std::time::Duration;

use geoquiz_core::RepoResult;
use tracing::warn;

/// Default number of attempts before giving up
const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default base delay between attempts
const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(100);

/// Executes storage operations, retrying transient conflicts
#[derive(Debug, Clone)]
pub struct RetryCoordinator {
    max_attempts: u32,
    base_delay: Duration,
}

impl Default for RetryCoordinator {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryCoordinator {
    /// Create a coordinator with explicit bounds; `max_attempts` is clamped
    /// to at least 1
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Run `op`, retrying on `DomainError::is_transient()` failures.
    ///
    /// The delay before attempt `n + 1` is `base_delay * n`. The final
    /// attempt is issued outside the catch loop so a genuine failure
    /// propagates unchanged.
    pub async fn execute<T, F, Fut>(&self, op: F) -> RepoResult<T>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = RepoResult<T>>,
    {
        for attempt in 1..self.max_attempts {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() => {
                    warn!(attempt, error = %err, "transient conflict, retrying");
                    tokio::time::sleep(self.base_delay * attempt).await;
                }
                Err(err) => return Err(err),
            }
        }

        op().await
    }
}
