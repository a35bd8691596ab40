//! Process-wide mutual-exclusion gate
//!
//! Serializes a critical sequence across all callers in this process. Used
//! by registration to close the window between "email unused" and "insert
//! user". The lock is process-local; a multi-instance deployment would need
//! a distributed mutex behind the same injection seam.

use tokio::sync::{Mutex, MutexGuard};
use tracing::debug;

/// Named async mutex, held across await points
#[derive(Debug)]
pub struct Gate {
    name: &'static str,
    inner: Mutex<()>,
}

impl Gate {
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            inner: Mutex::new(()),
        }
    }

    /// Acquire exclusive entry; the guard releases the gate on drop
    pub async fn acquire(&self) -> MutexGuard<'_, ()> {
        debug!(gate = self.name, "acquiring gate");
        self.inner.lock().await
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_gate_serializes_critical_sections() {
        let gate = Arc::new(Gate::new("test"));
        let inside = Arc::new(AtomicU32::new(0));
        let max_inside = Arc::new(AtomicU32::new(0));

        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let gate = Arc::clone(&gate);
                let inside = Arc::clone(&inside);
                let max_inside = Arc::clone(&max_inside);
                tokio::spawn(async move {
                    let _guard = gate.acquire().await;
                    let now = inside.fetch_add(1, Ordering::SeqCst) + 1;
                    max_inside.fetch_max(now, Ordering::SeqCst);
                    tokio::task::yield_now().await;
                    inside.fetch_sub(1, Ordering::SeqCst);
                })
            })
            .collect();

        for task in tasks {
            task.await.unwrap();
        }

        assert_eq!(max_inside.load(Ordering::SeqCst), 1, "gate must admit one task at a time");
    }

    #[tokio::test]
    async fn test_gate_name() {
        assert_eq!(Gate::new("registration").name(), "registration");
    }
}
