//! Content module - articles, front-matter and markdown rendering

mod article;
pub mod components;
pub mod emoji;
mod frontmatter;
pub mod index;
mod markdown;

pub use article::ArticleRecord;
pub use frontmatter::{parse_date_string, FrontMatter};
pub use index::{ContentIndex, SortOrder};
pub use markdown::{MarkdownRenderer, Rendered, TocEntry};
