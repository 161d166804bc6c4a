//! Admission gate
//!
//! Bounds the number of recognition jobs running at once. A request past
//! the limit waits until a running job gives its slot back; waiting is a
//! suspension point, so queued requests never pin an executor thread.

use std::sync::Arc;

use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

/// Errors from gate construction or acquisition
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("max parallel jobs must be at least 1, got {0}")]
    InvalidLimit(usize),

    #[error("admission gate closed")]
    Closed,
}

impl From<AcquireError> for GateError {
    fn from(_: AcquireError) -> Self {
        GateError::Closed
    }
}

/// Counting gate limiting concurrent recognition jobs
#[derive(Clone)]
pub struct AdmissionGate {
    semaphore: Arc<Semaphore>,
    limit: usize,
}

/// One of the gate's slots, held for the duration of a job.
///
/// Dropping the token returns the slot, so release happens exactly once
/// on every exit path, including task cancellation.
pub struct AdmissionToken {
    _permit: OwnedSemaphorePermit,
}

impl AdmissionGate {
    /// Create a gate admitting at most `limit` jobs at once
    pub fn new(limit: usize) -> Result<Self, GateError> {
        if limit < 1 {
            return Err(GateError::InvalidLimit(limit));
        }

        Ok(Self {
            semaphore: Arc::new(Semaphore::new(limit)),
            limit,
        })
    }

    /// Wait until a slot is free, then claim it.
    ///
    /// Waiters queue in arrival order, so no request starves as long as
    /// outstanding tokens keep being dropped. The semaphore is never
    /// closed at runtime; `Closed` is only reachable if that changes.
    pub async fn acquire(&self) -> Result<AdmissionToken, GateError> {
        let permit = self.semaphore.clone().acquire_owned().await?;
        Ok(AdmissionToken { _permit: permit })
    }

    /// Configured maximum number of concurrent jobs
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Slots currently free
    pub fn available(&self) -> usize {
        self.semaphore.available_permits()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;

    #[test]
    fn zero_limit_is_rejected() {
        assert!(matches!(
            AdmissionGate::new(0),
            Err(GateError::InvalidLimit(0))
        ));
    }

    #[tokio::test]
    async fn tokens_are_returned_on_drop() {
        let gate = AdmissionGate::new(1).unwrap();
        assert_eq!(gate.available(), 1);

        let token = gate.acquire().await.unwrap();
        assert_eq!(gate.available(), 0);

        drop(token);
        assert_eq!(gate.available(), 1);
    }

    #[tokio::test]
    async fn full_gate_blocks_until_release() {
        let gate = AdmissionGate::new(1).unwrap();
        let token = gate.acquire().await.unwrap();

        // Gate is full, a second acquire must not complete
        let blocked = tokio::time::timeout(Duration::from_millis(50), gate.acquire()).await;
        assert!(blocked.is_err());

        drop(token);
        let token = tokio::time::timeout(Duration::from_millis(50), gate.acquire())
            .await
            .expect("slot freed by drop")
            .unwrap();
        drop(token);
    }

    #[tokio::test]
    async fn cancelled_waiter_does_not_consume_a_slot() {
        let gate = AdmissionGate::new(1).unwrap();
        let token = gate.acquire().await.unwrap();

        // A waiter that gets dropped mid-wait must leave the queue clean
        let waiter = tokio::spawn({
            let gate = gate.clone();
            async move { gate.acquire().await }
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        waiter.abort();
        let _ = waiter.await;

        drop(token);
        assert_eq!(gate.available(), 1);
        let _token = gate.acquire().await.unwrap();
    }

    #[tokio::test]
    async fn concurrency_never_exceeds_limit() {
        let limit = 3;
        let gate = AdmissionGate::new(limit).unwrap();
        let running = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..20 {
            let gate = gate.clone();
            let running = running.clone();
            let peak = peak.clone();
            handles.push(tokio::spawn(async move {
                let _token = gate.acquire().await.unwrap();
                let now = running.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(10)).await;
                running.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert!(peak.load(Ordering::SeqCst) <= limit);
        assert_eq!(gate.available(), limit);
    }
}
