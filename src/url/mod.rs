//! URL handling for the crawler
//!
//! URLs are treated as opaque strings: nothing here normalizes them. This module
//! provides the eligibility predicates the scheduler applies to every
//! discovered link, and the resolution step the HTML parser uses to turn
//! attribute values into absolute URLs.

mod filters;
mod resolve;

pub use filters::{is_image_link, is_same_domain};
pub use resolve::resolve_link;

/// Returns true if a discovered URL may be scheduled for crawling
///
/// A URL is crawlable when it is not an image and lies inside `root`. Whether it
/// has already been visited is the scheduler's concern, not this function's.
///
/// # Examples
///
/// ```
/// use sitemapper::url::is_crawlable;
///
/// assert!(is_crawlable("http://golang.org", "http://golang.org/test.html"));
/// assert!(!is_crawlable("http://golang.org", "http://golang.org/images/gopher.jpg"));
/// assert!(!is_crawlable("http://golang.org", "http://linkedin.com/golang"));
/// ```
pub fn is_crawlable(root: &str, url: &str) -> bool {
    !is_image_link(url) && is_same_domain(root, url)
}
