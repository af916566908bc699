//! Fetch adapter
//!
//! Gates every fetch behind the limiter and turns failures into empty link
//! lists, so workers always have something to deliver.

use crate::crawler::fetcher::Fetcher;
use crate::crawler::limiter::Limiter;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Wraps a `Fetcher` with the concurrency limiter and failure absorption
///
/// Every call takes one fetch slot for the duration of the underlying fetch.
/// Failures are logged and turned into an empty link list, so a broken page
/// simply contributes no links.
pub struct FetchAdapter {
    fetcher: Arc<dyn Fetcher>,
    limiter: Limiter,
    completed: AtomicUsize,
    failed: AtomicUsize,
}

impl FetchAdapter {
    /// Creates an adapter gating `fetcher` behind `limiter`
    pub fn new(fetcher: Arc<dyn Fetcher>, limiter: Limiter) -> Self {
        Self {
            fetcher,
            limiter,
            completed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        }
    }

    /// Fetches the links on a page, never failing
    ///
    /// On success the fetcher's list is returned untouched. On failure the
    /// error is logged and an empty list is returned.
    pub async fn fetch_links(&self, url: &str) -> Vec<String> {
        let permit = self.limiter.acquire().await;
        let result = self.fetcher.fetch(url).await;
        drop(permit);

        self.completed.fetch_add(1, Ordering::Relaxed);

        match result {
            Ok(links) => {
                tracing::debug!("Fetched {} ({} links)", url, links.len());
                links
            }
            Err(e) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("{}", e);
                Vec::new()
            }
        }
    }

    /// The limiter gating this adapter
    pub fn limiter(&self) -> &Limiter {
        &self.limiter
    }

    /// Number of fetches finished, successful or not
    pub fn completed_fetches(&self) -> usize {
        self.completed.load(Ordering::Relaxed)
    }

    /// Number of fetches that failed and were replaced by an empty list
    pub fn failed_fetches(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }
}
