use crate::UrlResult;
use url::Url;

/// Rewrites a navigation href into an absolute URL on the site origin
///
/// # Resolution Rules
///
/// 1. An href that already parses as an absolute URL is returned unchanged
/// 2. An href starting with `/` is appended to the origin
/// 3. Anything else is joined to the origin with a single `/`
///
/// A trailing slash on `base_origin` is ignored, so re-resolving a resolved
/// href is always a no-op.
///
/// # Examples
///
/// ```
/// use sumi_scroll::url::resolve_link;
///
/// assert_eq!(
///     resolve_link("/guide/intro", "https://docs.example.com"),
///     "https://docs.example.com/guide/intro"
/// );
/// assert_eq!(
///     resolve_link("https://x.com/a", "https://docs.example.com"),
///     "https://x.com/a"
/// );
/// ```
pub fn resolve_link(href: &str, base_origin: &str) -> String {
    if is_absolute(href) {
        return href.to_string();
    }

    let origin = base_origin.trim_end_matches('/');
    if href.starts_with('/') {
        format!("{}{}", origin, href)
    } else {
        format!("{}/{}", origin, href)
    }
}

/// Returns the origin (`scheme://host[:port]`) of a site URL
///
/// # Examples
///
/// ```
/// use sumi_scroll::url::site_origin;
///
/// let origin = site_origin("https://docs.example.com/guide/index.html").unwrap();
/// assert_eq!(origin, "https://docs.example.com");
/// ```
pub fn site_origin(base_url: &str) -> UrlResult<String> {
    let url = Url::parse(base_url)?;
    if url.host_str().is_none() {
        return Err(crate::UrlError::MissingHost(base_url.to_string()));
    }
    Ok(url.origin().ascii_serialization())
}

/// Returns true if `url` is an absolute URL on `origin`
pub fn shares_origin(url: &str, origin: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.origin().ascii_serialization() == origin.trim_end_matches('/'),
        Err(_) => false,
    }
}

fn is_absolute(href: &str) -> bool {
    // Scheme-relative hrefs ("//cdn...") parse as relative and are left to rule 2
    Url::parse(href).is_ok()
}
