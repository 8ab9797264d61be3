//! # In-Memory Index
//!
//! The working set of thoughts the UI filters, sorts and reorders. It is
//! rebuilt wholesale on every hydration ([`ThoughtIndex::replace_all`]) and
//! kept in step with the folder by the commands that save or delete.
//!
//! ## Display Indexes
//!
//! Ids are regenerated on every load, so they cannot be typed by a user
//! across runs. [`index_thoughts`] assigns 1-based display indexes from an
//! order that depends only on file content (title, case-insensitive), so
//! `thoughts view 3` refers to the same note as long as titles do not
//! change. Filtering and sorting keep each entry's canonical index.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::model::Thought;
use crate::store::thought_store::collect_tags;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Created,
    #[default]
    Updated,
    Title,
    Custom,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "created" | "created_at" => Ok(SortKey::Created),
            "updated" | "updated_at" => Ok(SortKey::Updated),
            "title" => Ok(SortKey::Title),
            "custom" => Ok(SortKey::Custom),
            other => Err(format!("Unknown sort key: {}", other)),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SortKey::Created => "created",
            SortKey::Updated => "updated",
            SortKey::Title => "title",
            SortKey::Custom => "custom",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(format!("Unknown sort order: {}", other)),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SortOrder::Asc => write!(f, "asc"),
            SortOrder::Desc => write!(f, "desc"),
        }
    }
}

/// What to show: optional tag and text filters plus ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThoughtQuery {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub sort_by: SortKey,
    pub order: SortOrder,
}

impl ThoughtQuery {
    pub fn matches(&self, thought: &Thought) -> bool {
        if let Some(tag) = &self.tag {
            if !thought.has_tag(tag) {
                return false;
            }
        }
        match &self.search {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                thought.title.to_lowercase().contains(&term)
                    || thought.body.to_lowercase().contains(&term)
                    || thought.tags.iter().any(|t| t.to_lowercase().contains(&term))
            }
            _ => true,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ThoughtIndex {
    thoughts: Vec<Thought>,
    custom_order: Vec<String>,
}

impl ThoughtIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hydration: drops everything held, including the custom order, since
    /// ids from the previous load no longer exist.
    pub fn replace_all(&mut self, thoughts: Vec<Thought>) {
        self.thoughts = thoughts;
        self.custom_order.clear();
    }

    pub fn insert(&mut self, thought: Thought) {
        if !self.custom_order.is_empty() {
            self.custom_order.push(thought.id.clone());
        }
        self.thoughts.push(thought);
    }

    /// Replaces the thought with the same id and bumps `updated_at`.
    /// Returns false when the id is unknown.
    pub fn update(&mut self, mut thought: Thought) -> bool {
        match self.thoughts.iter_mut().find(|t| t.id == thought.id) {
            Some(slot) => {
                thought.touch();
                *slot = thought;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: &str) -> Option<Thought> {
        let pos = self.thoughts.iter().position(|t| t.id == id)?;
        self.custom_order.retain(|other| other != id);
        Some(self.thoughts.remove(pos))
    }

    pub fn get(&self, id: &str) -> Option<&Thought> {
        self.thoughts.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.thoughts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thoughts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Thought> {
        self.thoughts.iter()
    }

    pub fn all_tags(&self) -> Vec<String> {
        collect_tags(&self.thoughts)
    }

    /// Moves the entry at `from` to `to` in the custom order. The custom
    /// order starts out as the insertion order. Out-of-range positions are
    /// ignored and return false.
    pub fn reorder(&mut self, from: usize, to: usize) -> bool {
        if self.custom_order.is_empty() {
            self.custom_order = self.thoughts.iter().map(|t| t.id.clone()).collect();
        }
        if from >= self.custom_order.len() || to >= self.custom_order.len() {
            return false;
        }
        let moved = self.custom_order.remove(from);
        self.custom_order.insert(to, moved);
        true
    }

    fn custom_position(&self, thought: &Thought) -> usize {
        self.custom_order
            .iter()
            .position(|id| id == &thought.id)
            .or_else(|| self.thoughts.iter().position(|t| t.id == thought.id))
            .unwrap_or(usize::MAX)
    }

    /// Filters and sorts the working set.
    pub fn query(&self, query: &ThoughtQuery) -> Vec<&Thought> {
        let mut found: Vec<&Thought> = self.thoughts.iter().filter(|t| query.matches(t)).collect();

        found.sort_by(|a, b| {
            let ord = match query.sort_by {
                SortKey::Created => a.created_at.cmp(&b.created_at),
                SortKey::Updated => a.updated_at.cmp(&b.updated_at),
                SortKey::Title => a.title.cmp(&b.title),
                SortKey::Custom => self.custom_position(a).cmp(&self.custom_position(b)),
            };
            match query.order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
        found
    }
}

/// A thought with its user-facing index.
#[derive(Debug, Clone)]
pub struct DisplayThought {
    pub index: usize,
    pub thought: Thought,
}

fn canonical_order(a: &Thought, b: &Thought) -> Ordering {
    a.title
        .to_lowercase()
        .cmp(&b.title.to_lowercase())
        .then_with(|| a.title.cmp(&b.title))
        .then_with(|| a.body.cmp(&b.body))
}

/// Assigns canonical 1-based indexes.
pub fn index_thoughts<'a, I>(thoughts: I) -> Vec<DisplayThought>
where
    I: IntoIterator<Item = &'a Thought>,
{
    let mut sorted: Vec<&Thought> = thoughts.into_iter().collect();
    sorted.sort_by(|a, b| canonical_order(a, b));
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, t)| DisplayThought {
            index: i + 1,
            thought: t.clone(),
        })
        .collect()
}

/// User input selecting thoughts: a display index or a title search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThoughtSelector {
    Index(usize),
    Title(String),
}

impl std::fmt::Display for ThoughtSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThoughtSelector::Index(i) => write!(f, "{}", i),
            ThoughtSelector::Title(t) => write!(f, "\"{}\"", t),
        }
    }
}

/// All-numeric input is read as indexes; anything else is joined into one
/// title search.
pub fn parse_selectors<I: AsRef<str>>(inputs: &[I]) -> Vec<ThoughtSelector> {
    let indexes: Result<Vec<usize>, _> = inputs.iter().map(|s| s.as_ref().parse()).collect();
    if let Ok(indexes) = indexes {
        return indexes.into_iter().map(ThoughtSelector::Index).collect();
    }
    let term = inputs
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<&str>>()
        .join(" ");
    vec![ThoughtSelector::Title(term)]
}
