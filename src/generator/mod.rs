//! Generator module - renders indexed articles into a static site

mod sitemap;

pub use sitemap::{entries as sitemap_entries, to_xml as sitemap_xml, SitemapUrl};

use anyhow::Result;
use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::content::{ArticleRecord, ContentIndex, MarkdownRenderer};
use crate::templates;
use crate::Folio;

/// Static site generator
pub struct Generator {
    folio: Folio,
    renderer: MarkdownRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Self {
        Self {
            folio: folio.clone(),
            renderer: MarkdownRenderer::from_config(&folio.config),
        }
    }

    /// Generate the entire site from already indexed articles
    pub fn generate(&self, articles: &[ArticleRecord]) -> Result<()> {
        let public_dir = &self.folio.public_dir;
        fs::create_dir_all(public_dir)?;

        let flat = self.folio.config.blog_dir.trim_matches('/').is_empty();
        let articles: Vec<ArticleRecord> = articles
            .iter()
            .filter(|article| {
                let safe = is_safe_slug(&article.slug, flat);
                if !safe {
                    tracing::warn!("Skipping article with unusable slug {:?}", article.slug);
                }
                safe
            })
            .cloned()
            .collect();

        write_file(
            &public_dir.join("css").join("style.css"),
            templates::STYLESHEET,
        )?;
        self.copy_static_assets()?;

        write_file(
            &public_dir.join("index.html"),
            &templates::home(&self.folio.config, &articles),
        )?;
        tracing::debug!("Generated home page");

        for article in &articles {
            let html = self.render_article(article)?;
            let output_path = self.article_dir(&article.slug).join("index.html");
            write_file(&output_path, &html)?;
            tracing::debug!("Generated article: {:?}", output_path);
        }

        write_file(
            &public_dir.join("404.html"),
            &templates::not_found(&self.folio.config),
        )?;

        let urls = sitemap::entries(&self.folio.config, &articles);
        write_file(&public_dir.join("sitemap.xml"), &sitemap::to_xml(&urls))?;
        tracing::info!("Generated {} articles and sitemap.xml", articles.len());

        Ok(())
    }

    /// Render one article page
    pub fn render_article(&self, article: &ArticleRecord) -> Result<String> {
        let rendered = self.renderer.render(&article.content)?;
        Ok(templates::article(&self.folio.config, article, &rendered))
    }

    /// Render the page for `slug`, or `None` when no article has it
    pub fn render_page(&self, articles: &[ArticleRecord], slug: &str) -> Result<Option<String>> {
        ContentIndex::find(articles, slug)
            .map(|article| self.render_article(article))
            .transpose()
    }

    fn article_dir(&self, slug: &str) -> std::path::PathBuf {
        let blog_dir = self.folio.config.blog_dir.trim_matches('/');
        let mut dir = self.folio.public_dir.clone();
        if !blog_dir.is_empty() {
            dir.push(blog_dir);
        }
        dir.join(slug)
    }

    /// Copy the static directory verbatim into the public directory
    fn copy_static_assets(&self) -> Result<()> {
        let static_dir = &self.folio.static_dir;
        if !static_dir.exists() {
            return Ok(());
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.folio.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            copied += 1;
        }

        tracing::debug!("Copied {} static files", copied);
        Ok(())
    }
}

/// Files written at the top of the public directory
const TOP_LEVEL_FILES: [&str; 4] = ["index.html", "404.html", "sitemap.xml", "css"];

/// Slugs become directory names; reject ones that would escape the output.
/// Without a blog directory, articles share the top level with generated files.
fn is_safe_slug(slug: &str, flat: bool) -> bool {
    if slug.is_empty() || slug == "." || slug == ".." || slug.contains(['/', '\\']) {
        return false;
    }
    !(flat && TOP_LEVEL_FILES.contains(&slug))
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| anyhow::anyhow!("Failed to create dir {:?}: {}", parent, e))?;
    }
    fs::write(path, contents).map_err(|e| anyhow::anyhow!("Failed to write {:?}: {}", path, e))
}
