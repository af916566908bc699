//! Visited set
//!
//! Tracks which URLs have already been scheduled during one crawl.

use std::collections::HashSet;

/// Tracks which URLs have already been scheduled for crawling
///
/// The set is owned by the crawl coordinator and only ever mutated through
/// `&mut self` from the scheduling loop, so it needs no lock. A URL is marked at
/// most once; marking it again is a no-op that reports `false`.
#[derive(Debug, Default)]
pub struct VisitedSet {
    seen: HashSet<String>,
}

impl VisitedSet {
    /// Creates an empty visited set
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a URL as discovered
    ///
    /// # Returns
    ///
    /// * `true` - The URL was not seen before and is now marked
    /// * `false` - The URL was already marked
    pub fn mark(&mut self, url: &str) -> bool {
        if self.seen.contains(url) {
            return false;
        }
        self.seen.insert(url.to_string())
    }

    /// Returns true if the URL has been marked
    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// Number of URLs marked so far
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Returns true if nothing has been marked
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
