//! # Text Codec
//!
//! Converts a [`Thought`] to the markdown document stored on disk and back.
//!
//! ## Document Format
//!
//! ```text
//! # <title>
//!
//! <body, trimmed>
//!
//! Tags: <tag1>, <tag2>, ...
//! ```
//!
//! ## Parsing Rules
//!
//! - Line 1 is the title when it starts with `# `. Otherwise the title falls
//!   back to the file stem and line 1 is dropped.
//! - Every following line is body until the first line whose trimmed text
//!   starts with `tags:` (any case). Body accumulation stops there.
//! - Tag lines are comma-split and trimmed; empty entries are ignored. If a
//!   document carries more than one tag line, all of them are merged.
//! - Inline `#word` markers in the final body are added to the tag set.
//!
//! A missing tag line is not an error: it just means no explicit tags.
//!
//! Nothing is escaped. A body line starting with `Tags:` ends the body on
//! the next parse, and a title containing a newline splits. Both are known
//! limits of the format.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::{merge_tags, Thought};

const HEADING_MARKER: &str = "# ";
const TAGS_SENTINEL: &str = "tags:";
const TAGS_LABEL: &str = "Tags: ";

// ASCII word characters only: `#café` tags `caf`.
static INLINE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#((?-u:\w)+)").expect("valid regex"));

/// The fields recovered from a document. Identity and timestamps are not
/// stored in the file, so the caller assigns them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedThought {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

impl ParsedThought {
    pub fn into_thought(self) -> Thought {
        Thought::new(self.title, self.body, self.tags)
    }
}

/// Renders a thought as a markdown document. Pure and total.
pub fn serialize(thought: &Thought) -> String {
    format!(
        "{}{}\n\n{}\n\n{}{}",
        HEADING_MARKER,
        thought.title,
        thought.body.trim(),
        TAGS_LABEL,
        thought.tags.join(", ")
    )
}

/// Parses a document. `fallback_title` is used when the first line is not a
/// level-1 heading (usually the file name without its extension).
pub fn deserialize(text: &str, fallback_title: &str) -> ParsedThought {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut lines = text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line));

    let first = lines.next().unwrap_or("");
    let title = match first.strip_prefix(HEADING_MARKER) {
        Some(rest) => rest.to_string(),
        None => fallback_title.to_string(),
    };

    let mut body_lines = Vec::new();
    let mut explicit_tags = Vec::new();
    let mut in_body = true;

    for line in lines {
        if let Some(tag_text) = strip_tags_sentinel(line) {
            in_body = false;
            explicit_tags.extend(
                tag_text
                    .split(',')
                    .map(|tag| tag.trim().to_string())
                    .filter(|tag| !tag.is_empty()),
            );
        } else if in_body {
            body_lines.push(line);
        }
    }

    let body = body_lines.join("\n").trim().to_string();
    let tags = merge_tags(explicit_tags, extract_inline_tags(&body));

    ParsedThought { title, body, tags }
}

/// Returns the text after the `tags:` sentinel if this line is a tag line.
fn strip_tags_sentinel(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let head = trimmed.get(..TAGS_SENTINEL.len())?;
    if head.eq_ignore_ascii_case(TAGS_SENTINEL) {
        Some(&trimmed[TAGS_SENTINEL.len()..])
    } else {
        None
    }
}

/// Collects `#word` markers from free text, without the hash, in order of
/// appearance. Duplicates are left for [`merge_tags`] to collapse.
pub fn extract_inline_tags(text: &str) -> Vec<String> {
    INLINE_TAG
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect()
}
