//! Helper functions for page templates
//!
//! Small string builders shared by the generator and the markdown renderer:
//! URL generation, HTML snippets and the table of contents list.

mod html;
mod toc;
mod url;

pub use html::*;
pub use toc::*;
pub use url::*;
