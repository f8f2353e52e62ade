//! Accessible emoji
//!
//! Screen readers announce bare emoji inconsistently, so runs of emoji in
//! prose are wrapped in `<span role="img" aria-label="...">`.

use crate::helpers::html_escape;

/// A piece of prose split around emoji runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Text(&'a str),
    Emoji(&'a str),
}

/// Names for the emoji that show up in articles; anything else is
/// announced as "emoji".
const NAMES: &[(&str, &str)] = &[
    ("😀", "grinning face"),
    ("😃", "grinning face with big eyes"),
    ("😄", "grinning face with smiling eyes"),
    ("😁", "beaming face with smiling eyes"),
    ("😅", "grinning face with sweat"),
    ("😂", "face with tears of joy"),
    ("🙂", "slightly smiling face"),
    ("😉", "winking face"),
    ("😊", "smiling face with smiling eyes"),
    ("😍", "smiling face with heart-eyes"),
    ("🤔", "thinking face"),
    ("😎", "smiling face with sunglasses"),
    ("😬", "grimacing face"),
    ("😢", "crying face"),
    ("😱", "face screaming in fear"),
    ("🤯", "exploding head"),
    ("🥳", "partying face"),
    ("👋", "waving hand"),
    ("👍", "thumbs up"),
    ("👎", "thumbs down"),
    ("👏", "clapping hands"),
    ("🙌", "raising hands"),
    ("🙏", "folded hands"),
    ("💪", "flexed biceps"),
    ("👀", "eyes"),
    ("🧠", "brain"),
    ("❤", "red heart"),
    ("💙", "blue heart"),
    ("🔥", "fire"),
    ("✨", "sparkles"),
    ("⭐", "star"),
    ("🎉", "party popper"),
    ("🚀", "rocket"),
    ("💡", "light bulb"),
    ("⚡", "high voltage"),
    ("⚠", "warning"),
    ("✅", "check mark button"),
    ("❌", "cross mark"),
    ("❓", "red question mark"),
    ("📝", "memo"),
    ("📚", "books"),
    ("📦", "package"),
    ("🔧", "wrench"),
    ("🛠", "hammer and wrench"),
    ("🐛", "bug"),
    ("💻", "laptop"),
    ("🖥", "desktop computer"),
    ("📱", "mobile phone"),
    ("🤖", "robot"),
    ("🎨", "artist palette"),
    ("🌙", "crescent moon"),
    ("☀", "sun"),
    ("☕", "hot beverage"),
    ("🍕", "pizza"),
    ("🏆", "trophy"),
    ("🎯", "bullseye"),
    ("📈", "chart increasing"),
    ("🔍", "magnifying glass tilted left"),
    ("🔒", "locked"),
    ("⏱", "stopwatch"),
];

/// True for code points that start or continue an emoji presentation
fn is_emoji(c: char) -> bool {
    matches!(
        c as u32,
        0x1F1E6..=0x1F1FF // regional indicators (flags)
            | 0x1F300..=0x1F5FF
            | 0x1F600..=0x1F64F
            | 0x1F680..=0x1F6FF
            | 0x1F900..=0x1F9FF
            | 0x1FA70..=0x1FAFF
            | 0x2600..=0x26FF
            | 0x2700..=0x27BF
            | 0x231A..=0x231B
            | 0x23E9..=0x23F3
            | 0x2B50
            | 0x2B55
    )
}

/// Zero-width joiner, variation selector and skin tone modifiers
fn is_modifier(c: char) -> bool {
    matches!(c as u32, 0x200D | 0xFE0F | 0x1F3FB..=0x1F3FF)
}

/// True if `text` contains at least one emoji
pub fn contains_emoji(text: &str) -> bool {
    text.chars().any(is_emoji)
}

/// Split prose into text and emoji runs
pub fn split(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_emoji = false;

    for (i, c) in text.char_indices() {
        let emoji_char = is_emoji(c) || (in_emoji && is_modifier(c));
        if emoji_char != in_emoji {
            if i > start {
                segments.push(if in_emoji {
                    Segment::Emoji(&text[start..i])
                } else {
                    Segment::Text(&text[start..i])
                });
            }
            start = i;
            in_emoji = emoji_char;
        }
    }

    if start < text.len() {
        segments.push(if in_emoji {
            Segment::Emoji(&text[start..])
        } else {
            Segment::Text(&text[start..])
        });
    }

    segments
}

/// Spoken name for an emoji run
pub fn label(emoji: &str) -> &'static str {
    let bare: String = emoji.chars().filter(|c| *c != '\u{fe0f}').collect();
    NAMES
        .iter()
        .find(|(glyph, _)| *glyph == bare)
        .map(|(_, name)| *name)
        .unwrap_or("emoji")
}

/// Wrap an emoji run in an accessible span
pub fn wrap(emoji: &str) -> String {
    format!(
        r#"<span role="img" aria-label="{}">{}</span>"#,
        html_escape(label(emoji)),
        emoji
    )
}
