//! Markdown rendering with syntax highlighting

use anyhow::Result;
use lazy_static::lazy_static;
use pulldown_cmark::{
    html, CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use super::{components, emoji};
use crate::config::SiteConfig;
use crate::helpers::{html_escape, toc};

lazy_static! {
    /// Headings that ask for a table of contents right below them
    static ref TOC_HEADING_RE: Regex =
        Regex::new(r"(?i)^(table[ -]of[ -])?contents?$|^toc$").unwrap();
}

/// One heading, as listed in a table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub level: u8,
    pub id: String,
    pub text: String,
}

/// Output of rendering one article body
#[derive(Debug, Clone, Default, Serialize)]
pub struct Rendered {
    pub html: String,
    /// Headings up to the configured depth, in document order
    pub toc: Vec<TocEntry>,
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    line_numbers: bool,
    toc_depth: usize,
    /// Site root that root-relative component image sources live under
    root: String,
}

/// A heading whose inner events are still being collected
struct PendingHeading<'a> {
    level: HeadingLevel,
    id: Option<CowStr<'a>>,
    classes: Vec<CowStr<'a>>,
    attrs: Vec<(CowStr<'a>, Option<CowStr<'a>>)>,
    inner: Vec<Event<'a>>,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options("base16-ocean.dark", false)
    }

    /// Create with custom settings
    pub fn with_options(theme: &str, line_numbers: bool) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: theme.to_string(),
            line_numbers,
            toc_depth: 3,
            root: "/".to_string(),
        }
    }

    /// Create from the site configuration
    pub fn from_config(config: &SiteConfig) -> Self {
        let mut renderer =
            Self::with_options(&config.highlight.theme, config.highlight.line_number);
        renderer.toc_depth = config.toc.max_depth;
        renderer.root = config.root.clone();
        if !renderer.theme_set.themes.contains_key(&renderer.theme_name) {
            tracing::warn!(
                "Unknown highlight theme {:?}, falling back to a default theme",
                renderer.theme_name
            );
        }
        renderer
    }

    pub fn with_toc_depth(mut self, depth: usize) -> Self {
        self.toc_depth = depth;
        self
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> Result<Rendered> {
        // Front-matter is split off before rendering, so no metadata blocks
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;
        let parser = Parser::new_ext(markdown, options);

        let mut events: Vec<Event> = Vec::new();
        let mut code_block: Option<(Option<String>, String)> = None;
        let mut html_block: Option<String> = None;
        // Image alt text is written out as plain text, so no markup inside
        let mut image_depth = 0usize;

        for event in parser {
            if let Some((lang, code)) = code_block.as_mut() {
                match event {
                    Event::Text(text) => code.push_str(&text),
                    Event::End(TagEnd::CodeBlock) => {
                        let highlighted = self.highlight_code(code, lang.as_deref());
                        events.push(Event::Html(CowStr::from(highlighted)));
                        code_block = None;
                    }
                    _ => {}
                }
                continue;
            }

            if let Some(block) = html_block.as_mut() {
                match event {
                    Event::Html(html) => block.push_str(&html),
                    Event::End(TagEnd::HtmlBlock) => {
                        let expanded = components::expand(block, &self.root);
                        events.push(Event::Html(CowStr::from(expanded)));
                        html_block = None;
                    }
                    _ => {}
                }
                continue;
            }

            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|lang| lang.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some((lang, String::new()));
                }
                Event::Start(Tag::HtmlBlock) => html_block = Some(String::new()),
                Event::InlineHtml(html) if components::has_component(&html) => {
                    events.push(Event::InlineHtml(CowStr::from(components::expand(&html, &self.root))));
                }
                Event::Start(Tag::Image { .. }) => {
                    image_depth += 1;
                    events.push(event);
                }
                Event::End(TagEnd::Image) => {
                    image_depth = image_depth.saturating_sub(1);
                    events.push(event);
                }
                Event::Text(text) if image_depth == 0 && emoji::contains_emoji(&text) => {
                    for segment in emoji::split(&text) {
                        match segment {
                            emoji::Segment::Text(s) => {
                                events.push(Event::Text(CowStr::from(s.to_string())))
                            }
                            emoji::Segment::Emoji(e) => {
                                events.push(Event::InlineHtml(CowStr::from(emoji::wrap(e))))
                            }
                        }
                    }
                }
                other => events.push(other),
            }
        }

        let (mut events, headings, toc_slot) = anchor_headings(events);

        let entries: Vec<TocEntry> = headings
            .iter()
            .filter(|h| usize::from(h.level) <= self.toc_depth)
            .cloned()
            .collect();

        if let Some((position, after)) = toc_slot {
            let listed: Vec<TocEntry> = headings[after..]
                .iter()
                .filter(|h| usize::from(h.level) <= self.toc_depth)
                .cloned()
                .collect();
            if !listed.is_empty() {
                events.insert(position, Event::Html(CowStr::from(toc(&listed))));
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(Rendered {
            html: html_output,
            toc: entries,
        })
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        // Try to find syntax for the language
        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let theme = self
            .theme_set
            .themes
            .get(&self.theme_name)
            .or_else(|| self.theme_set.themes.values().next());

        let highlighted =
            theme.and_then(|theme| highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok());

        match highlighted {
            Some(highlighted) if self.line_numbers => self.add_line_numbers(&highlighted, lang),
            Some(highlighted) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                html_escape(lang),
                highlighted
            ),
            None => {
                // Fallback to plain code block
                format!(
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    html_escape(lang),
                    html_escape(code)
                )
            }
        }
    }

    /// Add line numbers to highlighted code
    fn add_line_numbers(&self, code: &str, lang: &str) -> String {
        let lines: Vec<&str> = code.lines().collect();

        let gutter = (1..=lines.len())
            .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
            html_escape(lang),
            gutter,
            lines.join("\n")
        )
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Give every heading a unique id and a leading anchor link.
///
/// Returns the rewritten events, the headings in order, and where a table
/// of contents goes: the event index right after the first "Contents"
/// heading plus the number of headings up to and including it.
fn anchor_headings(
    events: Vec<Event<'_>>,
) -> (Vec<Event<'_>>, Vec<TocEntry>, Option<(usize, usize)>) {
    let mut out = Vec::with_capacity(events.len());
    let mut headings = Vec::new();
    let mut toc_slot = None;
    // Explicit `{#id}`s are reserved up front so generated ids avoid them
    let mut seen: HashSet<String> = events
        .iter()
        .filter_map(|event| match event {
            Event::Start(Tag::Heading { id: Some(id), .. }) => Some(id.to_string()),
            _ => None,
        })
        .collect();
    let mut pending: Option<PendingHeading> = None;

    for event in events {
        match event {
            Event::Start(Tag::Heading {
                level,
                id,
                classes,
                attrs,
            }) => {
                pending = Some(PendingHeading {
                    level,
                    id,
                    classes,
                    attrs,
                    inner: Vec::new(),
                });
            }
            Event::End(TagEnd::Heading(end_level)) => {
                let Some(heading) = pending.take() else {
                    out.push(Event::End(TagEnd::Heading(end_level)));
                    continue;
                };

                let text = heading_text(&heading.inner);
                let id = match &heading.id {
                    Some(explicit) => explicit.to_string(),
                    None => unique_slug(&text, &mut seen),
                };

                out.push(Event::Start(Tag::Heading {
                    level: heading.level,
                    id: Some(CowStr::from(id.clone())),
                    classes: heading.classes,
                    attrs: heading.attrs,
                }));
                out.push(Event::Html(CowStr::from(format!(
                    r##"<a class="heading-anchor" aria-hidden="true" tabindex="-1" href="#{}"></a>"##,
                    html_escape(&id)
                ))));
                out.extend(heading.inner);
                out.push(Event::End(TagEnd::Heading(end_level)));

                headings.push(TocEntry {
                    level: heading.level as u8,
                    id,
                    text: text.clone(),
                });
                if toc_slot.is_none() && TOC_HEADING_RE.is_match(text.trim()) {
                    toc_slot = Some((out.len(), headings.len()));
                }
            }
            other => match pending.as_mut() {
                Some(heading) => heading.inner.push(other),
                None => out.push(other),
            },
        }
    }

    (out, headings, toc_slot)
}

/// Visible text of a heading
fn heading_text(events: &[Event<'_>]) -> String {
    events
        .iter()
        .filter_map(|event| match event {
            Event::Text(text) | Event::Code(text) => Some(text.as_ref()),
            _ => None,
        })
        .collect()
}

/// Slugify heading text, suffixing repeats with `-1`, `-2`, ... until the
/// id is unused
fn unique_slug(text: &str, seen: &mut HashSet<String>) -> String {
    let mut base = slug::slugify(text);
    if base.is_empty() {
        base = "section".to_string();
    }

    let mut id = base.clone();
    let mut suffix = 1;
    while seen.contains(&id) {
        id = format!("{}-{}", base, suffix);
        suffix += 1;
    }
    seen.insert(id.clone());
    id
}
