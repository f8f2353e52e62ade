//! Content index - lists the articles in the content directory

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::task::JoinSet;

use super::ArticleRecord;
use crate::error::IndexError;
use crate::Folio;

/// Order in which the index returns articles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Newest first; undated articles last
    #[default]
    DateDesc,
    /// Oldest first; undated articles last
    DateAsc,
    /// Alphabetical by slug
    Slug,
    /// Whatever order the directory listing produced
    Listing,
}

impl SortOrder {
    /// Sort articles in place. Date orders break ties by slug.
    pub fn sort(self, articles: &mut [ArticleRecord]) {
        match self {
            SortOrder::Listing => {}
            SortOrder::Slug => articles.sort_by(|a, b| a.slug.cmp(&b.slug)),
            SortOrder::DateDesc => articles.sort_by(|a, b| compare_dates(a, b, true)),
            SortOrder::DateAsc => articles.sort_by(|a, b| compare_dates(a, b, false)),
        }
    }
}

fn compare_dates(a: &ArticleRecord, b: &ArticleRecord, newest_first: bool) -> Ordering {
    match (a.parsed_date(), b.parsed_date()) {
        (Some(x), Some(y)) => {
            let by_date = if newest_first { y.cmp(&x) } else { x.cmp(&y) };
            by_date.then_with(|| a.slug.cmp(&b.slug))
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.slug.cmp(&b.slug),
    }
}

/// Reads article files from one directory
#[derive(Debug, Clone)]
pub struct ContentIndex {
    dir: PathBuf,
    /// Extension without the leading dot
    extension: String,
    order: SortOrder,
}

impl ContentIndex {
    /// Create an index over `dir` for files ending in `.<extension>`
    pub fn new<P: Into<PathBuf>>(dir: P, extension: &str) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.trim_start_matches('.').to_string(),
            order: SortOrder::default(),
        }
    }

    /// Index configured by the site
    pub fn from_folio(folio: &Folio) -> Self {
        Self::new(&folio.content_dir, &folio.config.extension).with_order(folio.config.order)
    }

    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = order;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Slug for a file name, or `None` if it is not an article file.
    ///
    /// Only the known extension is stripped, so `v1.2-notes.mdx` becomes
    /// `v1.2-notes`.
    pub fn slug_for<'a>(&self, file_name: &'a str) -> Option<&'a str> {
        let stem = file_name
            .strip_suffix(self.extension.as_str())?
            .strip_suffix('.')?;
        if stem.is_empty() {
            return None;
        }
        Some(stem)
    }

    /// List every article in the directory.
    ///
    /// Files are read and parsed concurrently. The first failure aborts the
    /// remaining reads and fails the whole listing.
    pub async fn list_articles(&self) -> Result<Vec<ArticleRecord>, IndexError> {
        let read_dir_error = |source| IndexError::ReadDir {
            path: self.dir.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&self.dir)
            .await
            .map_err(read_dir_error)?;

        let mut files = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(read_dir_error)? {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                tracing::debug!("Skipping non UTF-8 file name {:?}", file_name);
                continue;
            };
            let Some(slug) = self.slug_for(name) else {
                continue;
            };

            // Follows symlinks, so a link to an article counts as an article
            let path = entry.path();
            let metadata = tokio::fs::metadata(&path)
                .await
                .map_err(|source| IndexError::ReadFile {
                    path: path.clone(),
                    source,
                })?;
            if !metadata.is_file() {
                tracing::debug!("Skipping {:?}: not a regular file", path);
                continue;
            }

            files.push((slug.to_string(), path));
        }

        let mut tasks = JoinSet::new();
        let count = files.len();
        for (position, (slug, path)) in files.into_iter().enumerate() {
            tasks.spawn(async move {
                let source = tokio::fs::read_to_string(&path)
                    .await
                    .map_err(|source| IndexError::ReadFile { path, source })?;
                Ok::<_, IndexError>((position, ArticleRecord::from_source(slug, &source)))
            });
        }

        // Keep listing order so `SortOrder::Listing` means something
        let mut slots: Vec<Option<ArticleRecord>> = (0..count).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            let (position, record) = joined??;
            slots[position] = Some(record);
        }

        let mut articles: Vec<ArticleRecord> = slots.into_iter().flatten().collect();
        self.order.sort(&mut articles);

        tracing::debug!("Indexed {} articles from {:?}", articles.len(), self.dir);
        Ok(articles)
    }

    /// Look up an article by slug in an already computed listing
    pub fn find<'a>(articles: &'a [ArticleRecord], slug: &str) -> Option<&'a ArticleRecord> {
        articles.iter().find(|article| article.slug == slug)
    }
}
