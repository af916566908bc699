//! Page fetchers
//!
//! A `Fetcher` turns a URL into the ordered list of links found on that page.
//! The crawl scheduler only ever sees the trait, so the network-backed
//! `HttpFetcher` and the table-backed `StaticFetcher` are interchangeable.

use crate::config::{HttpConfig, UserAgentConfig};
use crate::crawler::parser::extract_links;
use crate::{FetchError, FetchResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::time::Duration;

/// Retrieves the outbound links of a single page
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Returns the anchors and images found at `url`, in page order
    async fn fetch(&self, url: &str) -> FetchResult<Vec<String>>;
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are followed with reqwest's default policy. Timeouts are only set
/// when configured.
///
/// # Example
///
/// ```no_run
/// use sitemapper::config::{HttpConfig, UserAgentConfig};
/// use sitemapper::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), &HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    http: &HttpConfig,
) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(user_agent.header_value())
        .gzip(true)
        .brotli(true);

    if let Some(secs) = http.request_timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    if let Some(secs) = http.connect_timeout_secs {
        builder = builder.connect_timeout(Duration::from_secs(secs));
    }

    builder.build()
}

/// Fetches pages over HTTP and extracts their links from the HTML
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates a fetcher with a client built from configuration
    ///
    /// Fails with `CrawlError::HttpClient` if the TLS backend cannot be set up.
    pub fn new(user_agent: &UserAgentConfig, http: &HttpConfig) -> crate::Result<Self> {
        Ok(Self::with_client(build_http_client(user_agent, http)?))
    }

    /// Creates a fetcher around an existing client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    /// GETs the page and parses it as HTML
    ///
    /// Anything but `200 OK` is an error. Relative links resolve against the
    /// final URL after redirects.
    async fn fetch(&self, url: &str) -> FetchResult<Vec<String>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let base_url = response.url().clone();
        let body = response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })?;

        let links = extract_links(&body, &base_url);
        tracing::trace!("Extracted {} links from {}", links.len(), base_url);
        Ok(links)
    }
}

/// Serves links from a fixed table of pages
///
/// Useful in tests and for replaying a known site graph. Unknown URLs fail with
/// `FetchError::NotFound`.
///
/// # Example
///
/// ```
/// use sitemapper::crawler::StaticFetcher;
///
/// let fetcher = StaticFetcher::new()
///     .with_page("http://golang.org", ["http://golang.org/doc/"])
///     .with_page("http://golang.org/doc/", ["http://golang.org"]);
/// assert_eq!(fetcher.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StaticFetcher {
    pages: HashMap<String, Vec<String>>,
}

impl StaticFetcher {
    /// Creates an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page and its links, builder style
    pub fn with_page<I, S>(mut self, url: impl Into<String>, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(url, links);
        self
    }

    /// Adds or replaces a page and its links
    pub fn insert<I, S>(&mut self, url: impl Into<String>, links: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pages
            .insert(url.into(), links.into_iter().map(Into::into).collect());
    }

    /// Links stored for a page
    pub fn get(&self, url: &str) -> Option<&[String]> {
        self.pages.get(url).map(Vec::as_slice)
    }

    /// Number of pages in the table
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns true if the table has no pages
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

impl FromIterator<(String, Vec<String>)> for StaticFetcher {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}

#[async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<Vec<String>> {
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::NotFound {
                url: url.to_string(),
            })
    }
}
