//! List indexed articles

use anyhow::Result;

use crate::content::ArticleRecord;
use crate::Folio;

/// Print every article in index order, or the records as JSON
pub async fn run(folio: &Folio, json: bool) -> Result<()> {
    let articles = folio.index().list_articles().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&articles)?);
    } else {
        print!("{}", format_listing(&articles));
    }

    Ok(())
}

/// Human-readable listing: one line per article
pub fn format_listing(articles: &[ArticleRecord]) -> String {
    let mut out = format!("Articles ({}):\n", articles.len());
    for article in articles {
        out.push_str(&format!(
            "  {:<10} - {} [{}]\n",
            article.date.as_deref().unwrap_or("undated"),
            article.display_title(),
            article.slug
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_listing() {
        let articles = vec![
            ArticleRecord::from_source("hello-world", "---\ntitle: Hello\ndate: 2024-01-01\n---\n"),
            ArticleRecord::from_source("scratch", "no front-matter"),
        ];
        assert_eq!(
            format_listing(&articles),
            "Articles (2):\n  2024-01-01 - Hello [hello-world]\n  undated    - scratch [scratch]\n"
        );
    }

    #[test]
    fn test_format_empty_listing() {
        assert_eq!(format_listing(&[]), "Articles (0):\n");
    }
}
