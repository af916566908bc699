//! Crawl coordinator - the scheduling loop
//!
//! The coordinator owns everything one crawl needs: the visited set, the
//! sitemap accumulator, the fetch adapter and its limiter. It spawns one worker
//! task per newly discovered page and detects completion by counting.
//!
//! # Termination
//!
//! `outstanding` is the number of link lists that have been promised to the
//! scheduler but not yet consumed. It starts at 1 for the seed. Consuming a list
//! decrements it; spawning a worker increments it, and every worker delivers
//! exactly one list. When it reaches zero no worker is running and nothing is
//! queued, so the crawl is complete.

use crate::config::{validate_crawler_config, CrawlerConfig};
use crate::crawler::adapter::FetchAdapter;
use crate::crawler::fetcher::Fetcher;
use crate::crawler::limiter::Limiter;
use crate::output::CrawlStatistics;
use crate::state::{Sitemap, SitemapAccumulator, VisitedSet};
use crate::url::is_crawlable;
use crate::CrawlError;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc::{unbounded_channel, UnboundedSender};

/// A finished crawl: the sitemap and how it was obtained
#[derive(Debug, Clone)]
pub struct CrawlOutcome {
    pub sitemap: Sitemap,
    pub stats: CrawlStatistics,
}

/// Main crawler coordinator structure
///
/// Built fresh for each crawl and consumed by [`Coordinator::run`]. Independent
/// coordinators share nothing and may run concurrently.
pub struct Coordinator {
    root: String,
    adapter: Arc<FetchAdapter>,
    sitemap: Arc<SitemapAccumulator>,
    visited: VisitedSet,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `root` - The seed URL; also the prefix every crawled page must share
    /// * `fetcher` - Retrieves the links of one page
    /// * `config` - Crawler settings (fetch slot count)
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawlError)` - Empty seed or invalid slot count
    pub fn new(
        root: impl Into<String>,
        fetcher: Arc<dyn Fetcher>,
        config: &CrawlerConfig,
    ) -> crate::Result<Self> {
        let root = root.into();
        if root.is_empty() {
            return Err(CrawlError::EmptySeed);
        }
        validate_crawler_config(config)?;

        let limiter = Limiter::new(config.max_concurrent_fetches);

        Ok(Self {
            root,
            adapter: Arc::new(FetchAdapter::new(fetcher, limiter)),
            sitemap: Arc::new(SitemapAccumulator::new()),
            visited: VisitedSet::new(),
        })
    }

    /// Runs the crawl to completion
    ///
    /// This never fails: pages whose fetch fails are recorded with no links.
    /// There is no deadline; a fetch that never returns keeps the crawl waiting.
    pub async fn run(mut self) -> CrawlOutcome {
        let started_at = Utc::now();
        let start_time = Instant::now();
        tracing::info!("Starting crawl of {}", self.root);

        let (tx, mut rx) = unbounded_channel::<Vec<String>>();

        // The seed list stands in for the root's own discovery
        let mut outstanding: usize = 1;
        let mut links = vec![self.root.clone()];
        let mut pages_done: usize = 0;

        loop {
            outstanding -= 1;
            outstanding += self.schedule(&links, &tx);

            if outstanding == 0 {
                break;
            }

            links = match rx.recv().await {
                Some(links) => links,
                // Unreachable while `tx` is alive; kept so the loop can't spin
                None => break,
            };

            pages_done += 1;
            if pages_done % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages crawled, {} outstanding",
                    pages_done,
                    outstanding
                );
            }
        }

        drop(tx);

        let sitemap = match Arc::try_unwrap(self.sitemap) {
            Ok(accumulator) => accumulator.into_sitemap(),
            // A worker may still be dropping its handle after delivering
            Err(shared) => shared.snapshot(),
        };

        let stats = CrawlStatistics {
            root: self.root.clone(),
            started_at,
            elapsed: start_time.elapsed(),
            pages_discovered: self.visited.len(),
            pages_crawled: sitemap.len(),
            total_links: sitemap.total_links(),
            completed_fetches: self.adapter.completed_fetches(),
            failed_fetches: self.adapter.failed_fetches(),
            max_concurrent_fetches: self.adapter.limiter().capacity(),
        };

        tracing::info!(
            "Crawl completed: {} pages crawled in {:?} ({} failed fetches)",
            stats.pages_crawled,
            stats.elapsed,
            stats.failed_fetches
        );

        CrawlOutcome { sitemap, stats }
    }

    /// Spawns a worker for every eligible link and returns how many were spawned
    ///
    /// A link is eligible if it is crawlable under the root and has not been
    /// visited before. Only this method touches the visited set.
    fn schedule(&mut self, links: &[String], tx: &UnboundedSender<Vec<String>>) -> usize {
        let mut spawned = 0;

        for link in links {
            if !is_crawlable(&self.root, link) {
                tracing::trace!("Skipping {} (image or outside {})", link, self.root);
                continue;
            }
            if !self.visited.mark(link) {
                continue;
            }

            tracing::debug!("Scheduling {}", link);
            self.spawn_worker(link.clone(), tx.clone());
            spawned += 1;
        }

        spawned
    }

    fn spawn_worker(&self, url: String, tx: UnboundedSender<Vec<String>>) {
        let adapter = Arc::clone(&self.adapter);
        let delivery = Delivery::new(url, Arc::clone(&self.sitemap), tx);

        tokio::spawn(async move {
            let links = adapter.fetch_links(delivery.url()).await;
            delivery.complete(links);
        });
    }
}

/// A worker's obligation to report exactly one link list
///
/// Completing records the page in the sitemap and sends its links to the
/// scheduler. If the worker unwinds before completing, the drop records the page
/// with no links and sends an empty list, so the scheduler's count still
/// reaches zero.
struct Delivery {
    url: String,
    sitemap: Arc<SitemapAccumulator>,
    tx: UnboundedSender<Vec<String>>,
    delivered: bool,
}

impl Delivery {
    fn new(url: String, sitemap: Arc<SitemapAccumulator>, tx: UnboundedSender<Vec<String>>) -> Self {
        Self {
            url,
            sitemap,
            tx,
            delivered: false,
        }
    }

    fn url(&self) -> &str {
        &self.url
    }

    fn complete(mut self, links: Vec<String>) {
        self.deliver(links);
    }

    fn deliver(&mut self, links: Vec<String>) {
        self.delivered = true;
        self.sitemap.record(&self.url, links.clone());
        if self.tx.send(links).is_err() {
            tracing::debug!("Scheduler gone, dropping links from {}", self.url);
        }
    }
}

impl Drop for Delivery {
    fn drop(&mut self) {
        if !self.delivered {
            tracing::error!("Worker for {} stopped without a result", self.url);
            self.deliver(Vec::new());
        }
    }
}
