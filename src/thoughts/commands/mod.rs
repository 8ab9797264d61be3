//! # Commands
//!
//! Business logic for every user-facing operation. Each submodule exposes a
//! `run` function that takes the store and index it needs as plain arguments
//! and returns a [`CmdResult`]. Nothing here prints.

use crate::config::ThoughtsConfig;
use crate::index::DisplayThought;
use crate::model::Thought;

pub mod config;
pub mod create;
pub mod delete;
pub mod helpers;
pub mod init;
pub mod list;
pub mod load;
pub mod tags;
pub mod update;
pub mod view;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_thoughts: Vec<Thought>,
    pub listed_thoughts: Vec<DisplayThought>,
    pub tags: Vec<String>,
    pub file_names: Vec<String>,
    pub config: Option<ThoughtsConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_thoughts(mut self, thoughts: Vec<DisplayThought>) -> Self {
        self.listed_thoughts = thoughts;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_config(mut self, config: ThoughtsConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}

/// Field edits for `update`. `None` leaves a field as it is.
#[derive(Debug, Clone, Default)]
pub struct ThoughtUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl ThoughtUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.body.is_none() && self.tags.is_none()
    }

    pub(crate) fn apply(&self, thought: &mut Thought) {
        if let Some(title) = &self.title {
            thought.title = title.clone();
        }
        if let Some(body) = &self.body {
            thought.body = body.clone();
        }
        if let Some(tags) = &self.tags {
            thought.tags = tags.clone();
        }
        if self.tags.is_some() || self.body.is_some() {
            thought.refresh_inline_tags();
        }
    }
}
