//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::SiteConfig;

/// Characters escaped in a single path segment; unreserved ones stay as is
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Generate a URL with the root path
///
/// # Examples
/// ```ignore
/// url_for(&config, "/css/style.css") // -> "/blog/css/style.css"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    url_under_root(&config.root, path)
}

/// [`url_for`] with an explicit root, for callers that hold no config
pub fn url_under_root(root: &str, path: &str) -> String {
    let root = root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, path)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&config, "/blogs/hello/") // -> "https://example.com/blogs/hello/"
/// ```
pub fn full_url_for(config: &SiteConfig, path: &str) -> String {
    if is_external(path) {
        return path.to_string();
    }
    let base = config.url.trim_end_matches('/');
    format!("{}{}", base, url_for(config, path))
}

/// Path of an article page below the site root, e.g. `/blogs/hello-world/`.
/// Pass it through [`url_for`] or [`full_url_for`] to get a link.
pub fn article_path(config: &SiteConfig, slug: &str) -> String {
    let blog_dir = config.blog_dir.trim_matches('/');
    if blog_dir.is_empty() {
        format!("/{}/", encode_segment(slug))
    } else {
        format!("/{}/{}/", blog_dir, encode_segment(slug))
    }
}

/// Percent-encode one path segment
pub fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT).to_string()
}

/// True for absolute or protocol-relative URLs
pub fn is_external(path: &str) -> bool {
    path.starts_with("http://") || path.starts_with("https://") || path.starts_with("//")
}
