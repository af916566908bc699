//! Link eligibility filters
//!
//! Textual checks applied to every discovered link before it is scheduled.

use regex::Regex;
use std::sync::LazyLock;

/// Matches URLs whose final path segment carries a common raster image extension.
static IMAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\S+\.(?i:jpg|png|gif|bmp|tiff)$").expect("image pattern is a valid regex")
});

/// Checks whether a URL points at an image resource
///
/// The check is purely textual: the URL must end in one of `.jpg`, `.png`,
/// `.gif`, `.bmp` or `.tiff`, compared case-insensitively, with at least one
/// non-whitespace character before the dot.
/// Images are recorded as links on a page but are never crawled themselves.
///
/// # Examples
///
/// ```
/// use sitemapper::url::is_image_link;
///
/// assert!(is_image_link("http://golang.org/images/gopher.jpg"));
/// assert!(is_image_link("http://golang.org/images/GOPHER.PNG"));
/// assert!(!is_image_link("http://golang.org/test.html"));
/// ```
pub fn is_image_link(url: &str) -> bool {
    IMAGE_PATTERN.is_match(url)
}

/// Checks whether a URL belongs to the crawl root
///
/// This is a literal string prefix test against the seed URL, not a host
/// comparison. As a consequence `http://golang.org2/x` counts as inside
/// `http://golang.org`, while `https://golang.org/x` does not.
///
/// # Examples
///
/// ```
/// use sitemapper::url::is_same_domain;
///
/// assert!(is_same_domain("http://golang.org", "http://golang.org/test.html"));
/// assert!(!is_same_domain("http://golang.org", "http://goweeklynews.com"));
/// ```
pub fn is_same_domain(root: &str, url: &str) -> bool {
    url.starts_with(root)
}
