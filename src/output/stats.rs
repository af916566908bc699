//! Crawl statistics
//!
//! Summary numbers for one finished crawl, gathered by the coordinator and
//! printed by the command-line tool on request.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Serialize)]
pub struct CrawlStatistics {
    /// The seed URL
    pub root: String,

    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration of the crawl
    #[serde(serialize_with = "serialize_duration_secs")]
    pub elapsed: Duration,

    /// Number of URLs scheduled for crawling
    pub pages_discovered: usize,

    /// Number of pages recorded in the sitemap
    pub pages_crawled: usize,

    /// Total number of links recorded across all pages
    pub total_links: usize,

    /// Fetches that returned, successfully or not
    pub completed_fetches: usize,

    /// Fetches that failed and were recorded with no links
    pub failed_fetches: usize,

    /// Fetch slots available during the crawl
    pub max_concurrent_fetches: usize,
}

impl CrawlStatistics {
    /// Pages fetched per second of wall-clock time
    pub fn pages_per_second(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.pages_crawled as f64 / secs
        } else {
            0.0
        }
    }
}

fn serialize_duration_secs<S: serde::Serializer>(
    duration: &Duration,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Writes statistics in a human-readable block
pub fn write_statistics<W: Write>(stats: &CrawlStatistics, out: &mut W) -> io::Result<()> {
    writeln!(out, "=== Crawl Statistics ===")?;
    writeln!(out)?;
    writeln!(out, "  Root: {}", stats.root)?;
    writeln!(
        out,
        "  Started: {}",
        stats.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;
    writeln!(out, "  Duration: {:.2}s", stats.elapsed.as_secs_f64())?;
    writeln!(out, "  Pages crawled: {}", stats.pages_crawled)?;
    writeln!(out, "  Links recorded: {}", stats.total_links)?;
    writeln!(out, "  Fetches completed: {}", stats.completed_fetches)?;

    let failure_rate = if stats.pages_crawled > 0 {
        (stats.failed_fetches as f64 / stats.pages_crawled as f64) * 100.0
    } else {
        0.0
    };
    writeln!(
        out,
        "  Failed fetches: {} ({:.1}%)",
        stats.failed_fetches, failure_rate
    )?;
    writeln!(out, "  Fetch slots: {}", stats.max_concurrent_fetches)?;
    writeln!(out, "  Rate: {:.2} pages/sec", stats.pages_per_second())?;
    Ok(())
}

/// Prints statistics to stderr
pub fn print_statistics(stats: &CrawlStatistics) {
    let stderr = io::stderr();
    let mut handle = stderr.lock();
    if let Err(e) = write_statistics(stats, &mut handle) {
        tracing::warn!("Failed to print statistics: {}", e);
    }
}
