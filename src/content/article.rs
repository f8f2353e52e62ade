//! Article model

use anyhow::Result;
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::FrontMatter;

/// One parsed content file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// File name minus the article extension; also the URL segment
    pub slug: String,

    /// Article title, if the front-matter has one
    pub title: Option<String>,

    /// Publication date as written in the front-matter
    pub date: Option<String>,

    /// Cover image path
    pub image: Option<String>,

    /// Body text after the front-matter block
    pub content: String,

    /// Custom front-matter fields
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl ArticleRecord {
    /// Build a record from a slug and the full text of its file
    pub fn from_source(slug: impl Into<String>, source: &str) -> Self {
        let (fm, body) = FrontMatter::parse(source);
        Self::from_parts(slug.into(), fm, body.to_string())
    }

    pub fn from_parts(slug: String, fm: FrontMatter, content: String) -> Self {
        Self {
            slug,
            title: fm.title,
            date: fm.date,
            image: fm.image,
            content,
            extra: fm.extra,
        }
    }

    /// The front-matter this record was built from
    pub fn front_matter(&self) -> FrontMatter {
        FrontMatter {
            title: self.title.clone(),
            date: self.date.clone(),
            image: self.image.clone(),
            extra: self.extra.clone(),
        }
    }

    /// Reassemble the file text: front-matter block followed by the body
    pub fn to_source(&self) -> Result<String> {
        Ok(format!("{}{}", self.front_matter().to_block()?, self.content))
    }

    /// Title for display, falling back to the slug
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.slug)
    }

    /// Parsed publication date, used for ordering
    pub fn parsed_date(&self) -> Option<NaiveDateTime> {
        self.date
            .as_deref()
            .and_then(super::frontmatter::parse_date_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_source() {
        let record = ArticleRecord::from_source(
            "hello-world",
            "---\ntitle: \"Hi\"\ndate: \"2024-01-01\"\n---\n# Hello",
        );
        assert_eq!(record.slug, "hello-world");
        assert_eq!(record.title.as_deref(), Some("Hi"));
        assert_eq!(record.date.as_deref(), Some("2024-01-01"));
        assert_eq!(record.image, None);
        assert_eq!(record.content, "# Hello");
    }

    #[test]
    fn test_without_frontmatter() {
        let text = "Plain body with no metadata.\n";
        let record = ArticleRecord::from_source("plain", text);
        assert_eq!(record.title, None);
        assert_eq!(record.date, None);
        assert_eq!(record.image, None);
        assert_eq!(record.content, text);
        assert_eq!(record.display_title(), "plain");
    }

    #[test]
    fn test_source_round_trip() {
        let original = ArticleRecord::from_source(
            "mdx-components",
            "---\ntitle: Using MDX components\ndate: 2024-05-20\nimage: /covers/mdx.png\nseries: nextjs\n---\n\n<Accordion label=\"Why?\">\n\nBecause.\n\n</Accordion>\n",
        );
        let reparsed = ArticleRecord::from_source("mdx-components", &original.to_source().unwrap());
        assert_eq!(reparsed, original);

        let bare = ArticleRecord::from_source("bare", "no metadata");
        let reparsed = ArticleRecord::from_source("bare", &bare.to_source().unwrap());
        assert_eq!(reparsed, bare);
    }

    #[test]
    fn test_parsed_date() {
        let record = ArticleRecord::from_source("d", "---\ndate: 2023-12-24\n---\n");
        let date = record.parsed_date().unwrap();
        assert_eq!(date.format("%Y-%m-%d").to_string(), "2023-12-24");

        let undated = ArticleRecord::from_source("u", "---\ndate: soon\n---\n");
        assert_eq!(undated.date.as_deref(), Some("soon"));
        assert_eq!(undated.parsed_date(), None);
    }
}
