//! Sitemap storage
//!
//! The shared accumulator workers write into, and the sorted sitemap it
//! freezes into once the crawl is over.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// The finished result of a crawl: every crawled page and the links found on it
///
/// Pages iterate in lexicographic order. Link lists keep the order in which the
/// fetcher returned them and may include images and external URLs, which are
/// recorded but never crawled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Sitemap {
    pages: BTreeMap<String, Vec<String>>,
}

impl Sitemap {
    /// Number of crawled pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Returns true if no page was crawled
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Links recorded for a crawled page
    pub fn get(&self, url: &str) -> Option<&[String]> {
        self.pages.get(url).map(Vec::as_slice)
    }

    /// Returns true if the URL was crawled
    pub fn contains(&self, url: &str) -> bool {
        self.pages.contains_key(url)
    }

    /// Iterates pages in sorted order together with their links
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.pages
            .iter()
            .map(|(url, links)| (url.as_str(), links.as_slice()))
    }

    /// Iterates crawled page URLs in sorted order
    pub fn urls(&self) -> impl Iterator<Item = &str> {
        self.pages.keys().map(String::as_str)
    }

    /// Total number of links recorded across all pages
    pub fn total_links(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }
}

impl FromIterator<(String, Vec<String>)> for Sitemap {
    fn from_iter<I: IntoIterator<Item = (String, Vec<String>)>>(iter: I) -> Self {
        Self {
            pages: iter.into_iter().collect(),
        }
    }
}

/// Collects crawl results written concurrently by fetch workers
///
/// Every write takes the lock. Each page is recorded exactly once; a second
/// write for the same URL is refused and leaves the first entry untouched.
#[derive(Debug, Default)]
pub struct SitemapAccumulator {
    pages: Mutex<HashMap<String, Vec<String>>>,
}

impl SitemapAccumulator {
    /// Creates an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the links found on a page
    ///
    /// # Returns
    ///
    /// * `true` - The entry was stored
    /// * `false` - The page already had an entry, which was kept
    pub fn record(&self, url: &str, links: Vec<String>) -> bool {
        let mut pages = self.lock();
        if pages.contains_key(url) {
            tracing::warn!("Refusing to overwrite existing sitemap entry for {}", url);
            return false;
        }
        pages.insert(url.to_string(), links);
        true
    }

    /// Number of pages recorded so far
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Consumes the accumulator and returns the sorted sitemap
    pub fn into_sitemap(self) -> Sitemap {
        let pages = self
            .pages
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner);
        pages.into_iter().collect()
    }

    /// Copies the current contents into a sitemap without consuming the accumulator
    pub fn snapshot(&self) -> Sitemap {
        self.lock()
            .iter()
            .map(|(url, links)| (url.clone(), links.clone()))
            .collect()
    }

    // A worker that panicked mid-write cannot leave a half-inserted entry, so
    // the map is still consistent after poisoning.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<String>>> {
        self.pages.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
