//! HTML helper functions

use super::url::{is_external, url_for};
use crate::config::SiteConfig;

/// Generate a CSS link tag
///
/// # Examples
/// ```ignore
/// css(&config, "style.css") // -> <link rel="stylesheet" href="/css/style.css">
/// ```
pub fn css(config: &SiteConfig, path: &str) -> String {
    let path = if is_external(path) {
        path.to_string()
    } else {
        let path = if path.ends_with(".css") {
            path.to_string()
        } else {
            format!("{}.css", path)
        };
        url_for(config, &format!("css/{}", path.trim_start_matches('/')))
    };

    format!(r#"<link rel="stylesheet" href="{}">"#, path)
}

/// Generate an anchor tag; `text` is escaped
pub fn link_to(config: &SiteConfig, path: &str, text: &str) -> String {
    if is_external(path) {
        format!(
            r#"<a href="{}" target="_blank" rel="noopener">{}</a>"#,
            html_escape(path),
            html_escape(text)
        )
    } else {
        format!(
            r#"<a href="{}">{}</a>"#,
            html_escape(&url_for(config, path)),
            html_escape(text)
        )
    }
}

/// Generate an image tag
pub fn image_tag(config: &SiteConfig, path: &str, alt: Option<&str>, class: &str) -> String {
    let src = if is_external(path) {
        path.to_string()
    } else {
        url_for(config, path)
    };

    format!(
        r#"<img class="{}" src="{}" alt="{}">"#,
        class,
        html_escape(&src),
        html_escape(alt.unwrap_or(""))
    )
}

/// Generate Open Graph meta tags
pub fn open_graph(
    title: &str,
    description: &str,
    url: &str,
    image: Option<&str>,
    site_name: &str,
) -> String {
    let mut tags = vec![
        r#"<meta property="og:type" content="article">"#.to_string(),
        format!(
            r#"<meta property="og:title" content="{}">"#,
            html_escape(title)
        ),
        format!(r#"<meta property="og:url" content="{}">"#, html_escape(url)),
        format!(
            r#"<meta property="og:site_name" content="{}">"#,
            html_escape(site_name)
        ),
    ];

    if !description.is_empty() {
        tags.push(format!(
            r#"<meta property="og:description" content="{}">"#,
            html_escape(description)
        ));
    }

    if let Some(img) = image {
        tags.push(format!(
            r#"<meta property="og:image" content="{}">"#,
            html_escape(img)
        ));
    }

    tags.join("\n")
}

/// Generate meta generator tag
pub fn meta_generator() -> String {
    format!(
        r#"<meta name="generator" content="folio {}">"#,
        env!("CARGO_PKG_VERSION")
    )
}

/// Escape HTML special characters
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Strip HTML tags from a string
pub fn strip_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut in_tag = false;

    for c in s.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    result
}

/// Truncate a string to a specified length
pub fn truncate(s: &str, length: usize, omission: Option<&str>) -> String {
    let omission = omission.unwrap_or("...");

    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s
            .chars()
            .take(length.saturating_sub(omission.chars().count()))
            .collect();
        format!("{}{}", truncated.trim_end(), omission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css() {
        let config = SiteConfig::default();
        assert_eq!(
            css(&config, "style"),
            r#"<link rel="stylesheet" href="/css/style.css">"#
        );
    }

    #[test]
    fn test_link_to_escapes_text() {
        let config = SiteConfig::default();
        assert_eq!(
            link_to(&config, "/blogs/a/", "Tom & Jerry"),
            r#"<a href="/blogs/a/">Tom &amp; Jerry</a>"#
        );
        assert!(link_to(&config, "https://github.com", "GitHub").contains("noopener"));
    }

    #[test]
    fn test_open_graph() {
        let tags = open_graph("Hi", "", "https://x.dev/blogs/hi/", Some("/c.png"), "Blog");
        assert!(tags.contains(r#"<meta property="og:title" content="Hi">"#));
        assert!(tags.contains(r#"<meta property="og:image" content="/c.png">"#));
        assert!(!tags.contains("og:description"));
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>World</b></p>"), "Hello World");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 8, None), "Hello...");
        assert_eq!(truncate("Hi", 10, None), "Hi");
    }
}
