//! Front-matter parsing
//!
//! Articles open with a YAML block fenced by `---` lines. The split follows
//! the gray-matter convention: the block must start at the very first byte,
//! it ends at the first line beginning with `---`, and exactly one line break
//! after the closing fence is dropped from the body.

use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

const DELIMITER: &str = "---";
const CLOSING: &str = "\n---";

/// Custom deserializer that reads any YAML scalar as its string form
fn scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct ScalarString;

    impl<'de> Visitor<'de> for ScalarString {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, number or boolean")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value))
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(ScalarString)
        }
    }

    deserializer.deserialize_any(ScalarString)
}

/// Front-matter data from an article
///
/// The recognized keys are optional; anything else lands in `extra` in the
/// order it was written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,

    /// Opaque display string, parsed only for ordering
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<String>,

    /// Cover asset path
    #[serde(
        deserialize_with = "scalar_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub image: Option<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Split `text` into front-matter and body.
    ///
    /// Never fails: a missing, unclosed or malformed block yields empty
    /// front-matter and the whole text as the body.
    pub fn parse(text: &str) -> (Self, &str) {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let Some(rest) = opening_fence(text) else {
            return (FrontMatter::default(), text);
        };

        let Some(end_pos) = rest.find(CLOSING) else {
            tracing::warn!("Front-matter block is never closed, treating as content");
            return (FrontMatter::default(), text);
        };

        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + CLOSING.len()..];
        let remaining = remaining.strip_prefix('\r').unwrap_or(remaining);
        let remaining = remaining.strip_prefix('\n').unwrap_or(remaining);

        match Self::from_yaml(yaml_content) {
            Ok(fm) => (fm, remaining),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse YAML front-matter, treating as content: {}",
                    e
                );
                (FrontMatter::default(), text)
            }
        }
    }

    fn from_yaml(yaml_content: &str) -> Result<Self> {
        // Comment-only blocks carry no data
        let is_blank = yaml_content.lines().all(|line| {
            let trimmed = line.trim();
            trimmed.is_empty() || trimmed.starts_with('#')
        });
        if is_blank {
            return Ok(FrontMatter::default());
        }

        Ok(serde_yaml::from_str(yaml_content)?)
    }

    /// True when no key at all is set
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.date.is_none() && self.image.is_none() && self.extra.is_empty()
    }

    /// Render this front-matter as a fenced block that `parse` reads back
    /// to an equal value. The block ends with a line break, so the body can
    /// be appended directly.
    pub fn to_block(&self) -> Result<String> {
        if self.is_empty() {
            return Ok(format!("{DELIMITER}\n{DELIMITER}\n"));
        }
        let yaml = serde_yaml::to_string(self)?;
        Ok(format!("{DELIMITER}\n{yaml}{DELIMITER}\n"))
    }

    /// Parse the date string into a timestamp
    pub fn parse_date(&self) -> Option<NaiveDateTime> {
        self.date.as_deref().and_then(parse_date_string)
    }
}

/// Returns the text after the opening fence line, starting at its line break
fn opening_fence(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(DELIMITER)?;
    // `----` is a thematic break, not a fence
    if rest.starts_with('-') {
        return None;
    }

    let line_end = rest.find('\n').unwrap_or(rest.len());
    let language = rest[..line_end].trim();
    if !(language.is_empty() || language == "yaml" || language == "yml") {
        return None;
    }

    Some(&rest[line_end..])
}

/// Parse a date string in various formats
pub fn parse_date_string(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y"];
    for fmt in date_formats {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    // RFC 3339 / ISO 8601 with offset, compared in UTC
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc())
}
