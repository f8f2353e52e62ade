//! Table of contents list

use super::html::html_escape;
use crate::content::TocEntry;

/// Render headings as nested ordered lists.
///
/// Nesting is relative to the shallowest heading given, and a heading never
/// nests more than one level below the previous one.
pub fn toc(entries: &[TocEntry]) -> String {
    let Some(base) = entries.iter().map(|e| e.level).min() else {
        return String::new();
    };

    let mut html = r#"<ol class="toc">"#.to_string();
    let mut depth = base;

    for (i, entry) in entries.iter().enumerate() {
        let level = entry.level.min(depth + 1);

        if i > 0 {
            if level > depth {
                html.push_str("<ol>");
                depth = level;
            } else {
                html.push_str("</li>");
                while depth > level {
                    html.push_str("</ol></li>");
                    depth -= 1;
                }
            }
        }

        html.push_str(&format!(
            r##"<li class="toc-item toc-level-{}"><a class="toc-link" href="#{}"><span class="toc-text">{}</span></a>"##,
            entry.level,
            html_escape(&entry.id),
            html_escape(&entry.text)
        ));
    }

    html.push_str("</li>");
    while depth > base {
        html.push_str("</ol></li>");
        depth -= 1;
    }
    html.push_str("</ol>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: u8, text: &str) -> TocEntry {
        TocEntry {
            level,
            id: slug::slugify(text),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_nested_toc() {
        let html = toc(&[entry(2, "A"), entry(3, "B"), entry(2, "C")]);
        assert!(html.starts_with(r#"<ol class="toc">"#));
        assert!(html.ends_with("</ol>"));
        let a = html.find(">A<").unwrap();
        let inner = html.find("<ol>").unwrap();
        let b = html.find(">B<").unwrap();
        let close_inner = html.find("</ol></li>").unwrap();
        let c = html.find(">C<").unwrap();
        assert!(a < inner && inner < b && b < close_inner && close_inner < c);
        assert_eq!(html.matches("<li").count(), html.matches("</li>").count());
        assert_eq!(html.matches("<ol").count(), html.matches("</ol>").count());
    }

    #[test]
    fn test_skipped_levels_nest_once() {
        let html = toc(&[entry(1, "Top"), entry(4, "Deep"), entry(2, "Back")]);
        assert_eq!(html.matches("<ol>").count(), 1);
        assert_eq!(html.matches("<li").count(), html.matches("</li>").count());
        assert!(html.contains(r#"toc-level-4"#));
    }

    #[test]
    fn test_escapes_text() {
        let html = toc(&[entry(2, "<script>")]);
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_empty() {
        assert_eq!(toc(&[]), "");
    }
}
