//! Built-in page templates
//!
//! Pages are small enough that plain `format!` templates cover them; the
//! stylesheet is embedded in the binary and written next to the pages.

use crate::config::SiteConfig;
use crate::content::{ArticleRecord, Rendered};
use crate::helpers::{
    article_path, css, full_url_for, html_escape, image_tag, link_to, meta_generator, open_graph,
    strip_html, truncate, url_for,
};

/// Embedded stylesheet, written to `css/style.css`
pub const STYLESHEET: &str = include_str!("style.css");

/// Length of generated meta descriptions
const DESCRIPTION_LEN: usize = 160;

/// Metadata for the document head
#[derive(Debug, Clone, Default)]
pub struct PageMeta {
    /// Document title
    pub title: String,
    pub description: String,
    /// Absolute URL of the page
    pub url: String,
    /// Adds Open Graph tags when set
    pub image: Option<String>,
    pub open_graph: bool,
}

/// Wrap a page body in the site layout
pub fn layout(config: &SiteConfig, meta: &PageMeta, body: &str) -> String {
    let mut head = vec![
        r#"<meta charset="utf-8">"#.to_string(),
        r#"<meta name="viewport" content="width=device-width, initial-scale=1">"#.to_string(),
        format!("<title>{}</title>", html_escape(&meta.title)),
        meta_generator(),
        css(config, "style"),
    ];
    if !meta.description.is_empty() {
        head.push(format!(
            r#"<meta name="description" content="{}">"#,
            html_escape(&meta.description)
        ));
    }
    if !meta.url.is_empty() {
        head.push(format!(
            r#"<link rel="canonical" href="{}">"#,
            html_escape(&meta.url)
        ));
    }
    if meta.open_graph {
        head.push(open_graph(
            &meta.title,
            &meta.description,
            &meta.url,
            meta.image.as_deref(),
            &config.title,
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
{head}
</head>
<body>
<main>
{nav}
{body}
</main>
</body>
</html>
"#,
        lang = html_escape(&config.language),
        head = head.join("\n"),
        nav = nav(config),
        body = body,
    )
}

fn nav(config: &SiteConfig) -> String {
    format!(r#"<nav>{}</nav>"#, link_to(config, "/", "Home"))
}

/// Home page: the article list in index order
pub fn home(config: &SiteConfig, articles: &[ArticleRecord]) -> String {
    let mut body = format!("<h1>{}</h1>\n", html_escape(&config.title));
    if !config.description.is_empty() {
        body.push_str(&format!("<p>{}</p>\n", html_escape(&config.description)));
    }

    body.push_str(r#"<ul class="article-list">"#);
    for article in articles {
        body.push_str("\n<li>");
        body.push_str(&link_to(
            config,
            &article_path(config, &article.slug),
            article.display_title(),
        ));
        if let Some(date) = &article.date {
            body.push_str(&format!(
                r#" <span class="article-date">{}</span>"#,
                html_escape(date)
            ));
        }
        body.push_str("</li>");
    }
    body.push_str("\n</ul>");

    let meta = PageMeta {
        title: config.title.clone(),
        description: config.description.clone(),
        url: full_url_for(config, "/"),
        ..Default::default()
    };
    layout(config, &meta, &body)
}

/// Article page: header, rendered body and byline
pub fn article(config: &SiteConfig, article: &ArticleRecord, rendered: &Rendered) -> String {
    let title = article.display_title();

    let mut body = String::from("<article>\n<header>\n");
    if let Some(image) = &article.image {
        body.push_str(&image_tag(config, image, Some(title), "article-cover"));
        body.push('\n');
    }
    body.push_str(&format!("<h1>{}</h1>\n", html_escape(title)));
    if let Some(date) = &article.date {
        body.push_str(&format!(
            r#"<p class="article-meta"><time>{}</time></p>"#,
            html_escape(date)
        ));
        body.push('\n');
    }
    body.push_str("</header>\n");
    body.push_str(&rendered.html);
    body.push_str("</article>\n");

    if !config.author.is_empty() {
        body.push_str(&format!(
            r#"<footer class="byline">Written by <strong>{}</strong></footer>"#,
            html_escape(&config.author)
        ));
    }

    let description = truncate(
        strip_html(&rendered.html).split_whitespace().collect::<Vec<_>>().join(" ").as_str(),
        DESCRIPTION_LEN,
        None,
    );
    let meta = PageMeta {
        title: title.to_string(),
        description,
        url: full_url_for(config, &article_path(config, &article.slug)),
        image: article.image.as_deref().map(|image| full_url_for(config, image)),
        open_graph: true,
    };
    layout(config, &meta, &body)
}

/// Page served for unknown routes
pub fn not_found(config: &SiteConfig) -> String {
    let body = format!(
        r#"<h1>Not found</h1>
<p>There is nothing here. Head back <a href="{}">home</a>.</p>"#,
        html_escape(&url_for(config, "/"))
    );
    let meta = PageMeta {
        title: format!("Not found | {}", config.title),
        ..Default::default()
    };
    layout(config, &meta, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MarkdownRenderer;

    fn record(source: &str) -> ArticleRecord {
        ArticleRecord::from_source("hello-world", source)
    }

    #[test]
    fn test_article_page_uses_title_for_document_title() {
        let config = SiteConfig::default();
        let article = record("---\ntitle: Hi & bye\ndate: 2024-01-01\nimage: /covers/hi.png\n---\n# Hello\n\nSome words.");
        let rendered = MarkdownRenderer::new().render(&article.content).unwrap();
        let page = super::article(&config, &article, &rendered);

        assert!(page.contains("<title>Hi &amp; bye</title>"));
        assert!(page.contains("<time>2024-01-01</time>"));
        assert!(page.contains(r#"class="article-cover" src="/covers/hi.png""#));
        assert!(page.contains(
            r#"<meta property="og:image" content="http://example.com/covers/hi.png">"#
        ));
        assert!(page.contains(r#"<meta name="description" content="Hello Some words.">"#));
    }

    #[test]
    fn test_article_without_metadata() {
        let mut config = SiteConfig::default();
        config.author = "Brandon Kocur".to_string();
        let article = record("Body only.");
        let rendered = MarkdownRenderer::new().render(&article.content).unwrap();
        let page = super::article(&config, &article, &rendered);

        assert!(page.contains("<title>hello-world</title>"));
        assert!(!page.contains("<time>"));
        assert!(!page.contains("article-cover"));
        assert!(page.contains("Written by <strong>Brandon Kocur</strong>"));
    }

    #[test]
    fn test_home_lists_articles_in_order() {
        let config = SiteConfig::default();
        let articles = vec![
            ArticleRecord::from_source("newer", "---\ntitle: Newer\ndate: 2024-02-01\n---\n"),
            ArticleRecord::from_source("older", "---\ntitle: Older\n---\n"),
        ];
        let page = home(&config, &articles);

        let newer = page.find(r#"<a href="/blogs/newer/">Newer</a>"#).unwrap();
        let older = page.find(r#"<a href="/blogs/older/">Older</a>"#).unwrap();
        assert!(newer < older);
        assert!(page.contains(r#"<span class="article-date">2024-02-01</span>"#));
        assert!(page.contains("<title>Blog</title>"));
    }

    #[test]
    fn test_not_found() {
        let page = not_found(&SiteConfig::default());
        assert!(page.contains("<h1>Not found</h1>"));
    }
}
