//! Sitemap generation.
//!
//! One entry for the home route and one per article.

use chrono::NaiveDate;

use crate::config::SiteConfig;
use crate::content::ArticleRecord;
use crate::helpers::{article_path, full_url_for, html_escape};

/// A sitemap URL entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapUrl {
    /// URL location.
    pub loc: String,

    /// Last modification date, from the article date when it parses.
    pub lastmod: Option<NaiveDate>,
}

/// Sitemap entries: the home route first, then articles in index order.
pub fn entries(config: &SiteConfig, articles: &[ArticleRecord]) -> Vec<SitemapUrl> {
    let home = SitemapUrl {
        loc: full_url_for(config, "/"),
        lastmod: None,
    };

    std::iter::once(home)
        .chain(articles.iter().map(|article| SitemapUrl {
            loc: full_url_for(config, &article_path(config, &article.slug)),
            lastmod: article.parsed_date().map(|dt| dt.date()),
        }))
        .collect()
}

/// Render entries as sitemap XML.
pub fn to_xml(urls: &[SitemapUrl]) -> String {
    let mut xml = String::from(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    xml.push('\n');
    xml.push_str(r#"<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">"#);
    xml.push('\n');

    for url in urls {
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", html_escape(&url.loc)));
        if let Some(lastmod) = &url.lastmod {
            xml.push_str(&format!(
                "    <lastmod>{}</lastmod>\n",
                lastmod.format("%Y-%m-%d")
            ));
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries() {
        let mut config = SiteConfig::default();
        config.url = "https://brandonkocur.dev".to_string();
        let articles = vec![
            ArticleRecord::from_source("first-post", "---\ndate: 2024-01-01\n---\n"),
            ArticleRecord::from_source("second post", "no date"),
        ];

        let urls = entries(&config, &articles);
        let locs: Vec<_> = urls.iter().map(|u| u.loc.as_str()).collect();
        assert_eq!(
            locs,
            vec![
                "https://brandonkocur.dev/",
                "https://brandonkocur.dev/blogs/first-post/",
                "https://brandonkocur.dev/blogs/second%20post/",
            ]
        );
        assert_eq!(urls[1].lastmod, NaiveDate::from_ymd_opt(2024, 1, 1));
        assert_eq!(urls[2].lastmod, None);
    }

    #[test]
    fn test_empty_site_has_home_only() {
        let urls = entries(&SiteConfig::default(), &[]);
        assert_eq!(urls.len(), 1);
        assert_eq!(urls[0].loc, "http://example.com/");
    }

    #[test]
    fn test_to_xml() {
        let xml = to_xml(&[
            SitemapUrl {
                loc: "https://x.dev/?a=1&b=2".to_string(),
                lastmod: None,
            },
            SitemapUrl {
                loc: "https://x.dev/blogs/a/".to_string(),
                lastmod: NaiveDate::from_ymd_opt(2023, 5, 4),
            },
        ]);
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains("<loc>https://x.dev/?a=1&amp;b=2</loc>"));
        assert!(xml.contains("<lastmod>2023-05-04</lastmod>"));
        assert_eq!(xml.matches("<url>").count(), 2);
        assert!(xml.trim_end().ends_with("</urlset>"));
    }
}
