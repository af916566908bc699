//! Concurrency limiter for page fetches
//!
//! A fixed pool of fetch slots backed by a tokio semaphore. Holding a
//! `LimiterPermit` means holding a slot; dropping it gives the slot back, so a
//! slot is released on every exit path of the code that acquired it.

use std::sync::Arc;
use tokio::sync::{Semaphore, SemaphorePermit};

/// A bounded pool of fetch slots
///
/// Cloning shares the same pool.
#[derive(Debug, Clone)]
pub struct Limiter {
    semaphore: Arc<Semaphore>,
    capacity: usize,
}

/// One acquired fetch slot, released on drop
#[derive(Debug)]
pub struct LimiterPermit<'a> {
    _permit: SemaphorePermit<'a>,
}

impl Limiter {
    /// Creates a limiter with `capacity` slots
    ///
    /// Callers validate the capacity first; see `CrawlerConfig`.
    pub fn new(capacity: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Waits until a slot is free and takes it
    pub async fn acquire(&self) -> LimiterPermit<'_> {
        if self.semaphore.available_permits() == 0 {
            tracing::trace!("All {} fetch slots busy, waiting", self.capacity);
        }
        // The semaphore is private and never closed
        let permit = self
            .semaphore
            .acquire()
            .await
            .expect("fetch slot semaphore is never closed");
        LimiterPermit { _permit: permit }
    }

    /// Total number of slots
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of slots currently held
    pub fn in_use(&self) -> usize {
        self.capacity - self.semaphore.available_permits()
    }

}
