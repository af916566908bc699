//! Sitemapper: a concurrent single-domain sitemap crawler
//!
//! This crate crawls every page reachable from a seed URL without leaving the
//! seed's prefix, and records for each page the anchors and images found on it.
//! Fetches run in parallel, capped by a fixed number of slots, and the crawl
//! finishes once every scheduled page has reported back.

pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for crawler setup
///
/// A running crawl never fails: fetch problems are absorbed per page. These
/// errors only occur while building a crawl, its HTTP client or its
/// configuration.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Seed URL cannot be empty")]
    EmptySeed,

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors from retrieving a single page
///
/// The crawler logs these and carries on with an empty link list for the page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("getting {url}: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("getting {url}: {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("reading body of {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not find URL {url}")]
    NotFound { url: String },
}

/// Result type alias for crawler operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for fetch operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, crawl_with_stats, Coordinator, Fetcher, HttpFetcher, StaticFetcher};
pub use state::Sitemap;
