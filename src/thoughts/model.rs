//! # Domain Model
//!
//! A [`Thought`] is the unit of persistence: a title, a free-form body and a
//! set of tags, plus timestamps.
//!
//! ## Identity
//!
//! The `id` is a short opaque token that only joins the in-memory index to
//! the UI. It is **not** written to disk, so every hydration hands out fresh
//! ids. The title is what decides where a thought lives on disk (see
//! [`crate::naming`]), which makes a title edit a file rename.
//!
//! ## Tags
//!
//! Tags behave as a set (case-sensitive) but keep first-seen order for
//! display. Both the explicit tag line and inline `#word` markers feed the
//! set; [`merge_tags`] is the one place duplicates collapse.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::codec::extract_inline_tags;
use crate::naming::generate_id;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thought {
    pub id: String,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Thought {
    /// Creates a thought with a fresh id. Inline `#tags` in the body are
    /// merged into the explicit tags.
    pub fn new(title: String, body: String, tags: Vec<String>) -> Self {
        let now = Utc::now();
        let tags = merge_tags(tags, extract_inline_tags(&body));
        Self {
            id: generate_id(),
            title,
            body,
            tags,
            created_at: now,
            updated_at: now,
        }
    }

    /// Marks the thought as modified now. Never moves `updated_at` before
    /// `created_at`.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now < self.created_at {
            self.created_at
        } else {
            now
        };
    }

    /// Adds any inline tags the body gained. Existing tags are kept.
    pub fn refresh_inline_tags(&mut self) {
        let explicit = std::mem::take(&mut self.tags);
        self.tags = merge_tags(explicit, extract_inline_tags(&self.body));
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Tag equality with set semantics.
    pub fn same_tags(&self, other: &[String]) -> bool {
        let mine: HashSet<&str> = self.tags.iter().map(String::as_str).collect();
        let theirs: HashSet<&str> = other.iter().map(String::as_str).collect();
        mine == theirs
    }
}

/// Unions two tag lists, dropping empty entries and duplicates while keeping
/// the order in which tags were first seen.
pub fn merge_tags<I, J>(first: I, second: J) -> Vec<String>
where
    I: IntoIterator<Item = String>,
    J: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    first
        .into_iter()
        .chain(second)
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}
