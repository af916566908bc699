use url::Url;

/// Resolves an `href` or `src` attribute value against the page it was found on
///
/// Relative references are joined onto `base`; absolute references are parsed as
/// they are. Values that cannot be resolved are reported as `None` and dropped by
/// the caller. No scheme filtering or normalization happens here, so `mailto:`
/// links and fragments survive exactly as written.
///
/// # Examples
///
/// ```
/// use sitemapper::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("http://golang.org/doc/").unwrap();
/// assert_eq!(
///     resolve_link("install.html", &base),
///     Some("http://golang.org/doc/install.html".to_string())
/// );
/// assert_eq!(resolve_link("http://[::1", &base), None);
/// ```
pub fn resolve_link(href: &str, base: &Url) -> Option<String> {
    match base.join(href.trim()) {
        Ok(resolved) => Some(resolved.to_string()),
        Err(e) => {
            tracing::debug!("Dropping unresolvable link {:?} on {}: {}", href, base, e);
            None
        }
    }
}
