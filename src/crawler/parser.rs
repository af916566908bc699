//! HTML parser for extracting outbound links
//!
//! Both anchors and images count as links: `<a href="...">` and
//! `<img src="...">`. Links are returned in document order, resolved against
//! the URL the page was served from.

use crate::url::resolve_link;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

static LINK_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("a[href], img[src]").expect("link selector is valid CSS")
});

/// Extracts all anchor and image links from an HTML document
///
/// # Extraction Rules
///
/// - `<a href="...">` contributes its `href`
/// - `<img src="...">` contributes its `src`
/// - Each value is resolved against `base_url`; values that fail to resolve are
///   dropped
/// - Nothing else is filtered: duplicates, fragments, external hosts and
///   non-HTTP schemes are all kept
///
/// # Example
///
/// ```
/// use sitemapper::crawler::extract_links;
/// use url::Url;
///
/// let html = r#"<a href="/doc/">Docs</a><img src="gopher.png">"#;
/// let base_url = Url::parse("http://golang.org/").unwrap();
/// assert_eq!(
///     extract_links(html, &base_url),
///     vec!["http://golang.org/doc/", "http://golang.org/gopher.png"]
/// );
/// ```
pub fn extract_links(html: &str, base_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);

    document
        .select(&LINK_SELECTOR)
        .filter_map(|element| {
            let attr = match element.value().name() {
                "a" => "href",
                _ => "src",
            };
            element.value().attr(attr)
        })
        .filter_map(|value| resolve_link(value, base_url))
        .collect()
}
