//! Crawler module for page fetching and crawl scheduling
//!
//! This module contains the core crawling logic, including:
//! - The `Fetcher` capability and its HTTP and fixed-table implementations
//! - HTML link extraction
//! - The fetch slot limiter and the adapter that applies it
//! - The coordinator that schedules workers and detects completion

mod adapter;
mod coordinator;
mod fetcher;
mod limiter;
mod parser;

pub use adapter::FetchAdapter;
pub use coordinator::{Coordinator, CrawlOutcome};
pub use fetcher::{build_http_client, Fetcher, HttpFetcher, StaticFetcher};
pub use limiter::{Limiter, LimiterPermit};
pub use parser::extract_links;

use crate::config::CrawlerConfig;
use crate::state::Sitemap;
use crate::Result;
use std::sync::Arc;

/// Crawls every page reachable from `root` and returns the sitemap
///
/// This is the main entry point for running a crawl. Only pages whose URL
/// starts with `root` and that are not images get fetched; every fetched page
/// is recorded along with all links found on it.
///
/// # Returns
///
/// * `Ok(Sitemap)` - Crawl completed
/// * `Err(CrawlError)` - The crawl could not be set up (empty seed, bad config)
///
/// # Example
///
/// ```
/// use sitemapper::config::CrawlerConfig;
/// use sitemapper::crawler::{crawl, StaticFetcher};
/// use std::sync::Arc;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let fetcher = StaticFetcher::new()
///     .with_page("http://golang.org", ["http://golang.org/doc/", "http://golang.org/gopher.png"])
///     .with_page("http://golang.org/doc/", ["http://golang.org"]);
///
/// let sitemap = crawl("http://golang.org", Arc::new(fetcher), &CrawlerConfig::default()).await?;
/// assert_eq!(sitemap.len(), 2);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(
    root: &str,
    fetcher: Arc<dyn Fetcher>,
    config: &CrawlerConfig,
) -> Result<Sitemap> {
    Ok(crawl_with_stats(root, fetcher, config).await?.sitemap)
}

/// Like [`crawl`], but also returns statistics about the run
pub async fn crawl_with_stats(
    root: &str,
    fetcher: Arc<dyn Fetcher>,
    config: &CrawlerConfig,
) -> Result<CrawlOutcome> {
    let coordinator = Coordinator::new(root, fetcher, config)?;
    Ok(coordinator.run().await)
}
