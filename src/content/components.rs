//! Embeddable article components
//!
//! Articles can drop two JSX-style components into their Markdown:
//!
//! - `<Image src="..." alt="..." width={800} />` renders a decorated `<img>`
//! - `<Accordion label="...">` ... `</Accordion>` renders a `<details>` block
//!   whose body is regular Markdown
//!
//! Both also answer to their `MDX`-prefixed names. Expansion runs on the raw
//! HTML events pulldown-cmark produces, so code blocks are never touched.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::helpers::{html_escape, is_external, url_under_root};

/// Class applied to every `<Image>`; the stylesheet gives it rounded corners,
/// a border and a shadow.
pub const IMAGE_CLASS: &str = "mdx-image";

lazy_static! {
    // Attribute values may contain `>`, so quoted and braced values are
    // matched as a whole
    static ref IMAGE_RE: Regex = Regex::new(
        r#"<(?:MDX)?Image\b((?:"[^"]*"|'[^']*'|\{[^}]*\}|[^>"'{])*?)\s*/?>"#
    )
    .unwrap();
    static ref ACCORDION_OPEN_RE: Regex = Regex::new(
        r#"<(?:MDX)?Accordion\b((?:"[^"]*"|'[^']*'|\{[^}]*\}|[^>"'{])*?)\s*(/?)>"#
    )
    .unwrap();
    static ref ACCORDION_CLOSE_RE: Regex = Regex::new(r"</(?:MDX)?Accordion\s*>").unwrap();
    static ref ATTR_RE: Regex = Regex::new(
        r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|\{\s*"([^"]*)"\s*\}|\{\s*'([^']*)'\s*\}|\{([^}]*)\}|([^\s"'=<>`]+)))?"#
    )
    .unwrap();
}

/// A single component attribute; `value` is `None` for bare flags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value: Option<String>,
}

/// Parse JSX-ish attributes: quoted strings, `{expr}` and bare flags
pub fn parse_attrs(raw: &str) -> Vec<Attr> {
    ATTR_RE
        .captures_iter(raw)
        .map(|caps| {
            let value = (2..=7)
                .find_map(|i| caps.get(i))
                .map(|m| m.as_str().trim().to_string());
            Attr {
                name: caps[1].to_string(),
                value,
            }
        })
        .collect()
}

/// True if the fragment mentions one of the components
pub fn has_component(html: &str) -> bool {
    html.contains("Image") || html.contains("Accordion")
}

/// Replace every component tag in an HTML fragment.
///
/// Root-relative image sources (`/images/a.png`) are placed under `root`.
pub fn expand(html: &str, root: &str) -> String {
    if !has_component(html) {
        return html.to_string();
    }

    let html = IMAGE_RE.replace_all(html, |caps: &Captures| image(&parse_attrs(&caps[1]), root));
    let html = ACCORDION_OPEN_RE.replace_all(&html, |caps: &Captures| {
        let open = accordion_open(&parse_attrs(&caps[1]));
        if caps[2].is_empty() {
            open
        } else {
            format!("{}{}", open, ACCORDION_CLOSE)
        }
    });
    ACCORDION_CLOSE_RE
        .replace_all(&html, ACCORDION_CLOSE)
        .into_owned()
}

const ACCORDION_CLOSE: &str = "</div></details>";

fn image(attrs: &[Attr], root: &str) -> String {
    let mut html = format!(r#"<img class="{}""#, IMAGE_CLASS);
    let mut has_alt = false;

    for attr in attrs {
        match attr.name.as_str() {
            // Styling is fixed, and framework-only props have no HTML meaning
            "className" | "class" | "style" | "priority" | "fill" | "placeholder" => continue,
            "alt" => has_alt = true,
            _ => {}
        }
        let value = match (attr.name.as_str(), &attr.value) {
            ("src", Some(src)) if src.starts_with('/') && !is_external(src) => {
                Some(url_under_root(root, src))
            }
            (_, value) => value.clone(),
        };
        match &value {
            Some(value) => html.push_str(&format!(
                r#" {}="{}""#,
                attr.name,
                value.replace('"', "&quot;")
            )),
            None => html.push_str(&format!(" {}", attr.name)),
        }
    }

    if !has_alt {
        html.push_str(r#" alt="""#);
    }
    html.push_str(r#" loading="lazy">"#);
    html
}

fn accordion_open(attrs: &[Attr]) -> String {
    let label = attrs
        .iter()
        .find(|attr| attr.name == "label")
        .and_then(|attr| attr.value.as_deref())
        .unwrap_or("");

    format!(
        r#"<details class="accordion"><summary>{}</summary><div class="accordion-content">"#,
        html_escape(label)
    )
}
