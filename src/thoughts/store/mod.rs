//! # Storage Layer
//!
//! Notes live as one markdown file each in a folder the user picked. The
//! folder is the source of truth; everything in memory is rebuilt from it.
//!
//! ## Layers
//!
//! - [`FolderPicker`] / [`FolderHandle`]: the host's folder-access
//!   capability. The picker turns a user selection into a granted handle; the
//!   handle can enumerate, read, write and remove entries by name and open
//!   sub-folders.
//! - [`directory::DirectoryStore`]: owns the root and trash handles. It is
//!   either uninitialized or ready, never half of each.
//! - [`thought_store::ThoughtStore`]: the reconciliation layer. Hydration,
//!   save, soft delete and rename in terms of thoughts rather than files.
//!
//! ## Implementations
//!
//! - [`fs_folder::FsPicker`] / [`fs_folder::FsFolder`]: real folders via
//!   `tokio::fs`.
//! - [`mem_folder::MemPicker`] / [`mem_folder::MemFolder`]: in-memory folders
//!   for tests, with simulated failures.
//!
//! ## Storage Layout
//!
//! ```text
//! <root>/
//! ├── my_note_.md        # one file per thought, named from its title
//! ├── groceries.md
//! └── deleted/           # soft-deleted files, same name and content
//!     └── old_idea.md
//! ```
//!
//! No operation retries. Every failure reaches the caller as a
//! [`crate::error::ThoughtsError`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::BoxStream;
use std::path::Path;

use crate::error::Result;

pub mod directory;
pub mod fs_folder;
pub mod mem_folder;
pub mod thought_store;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    /// Sockets, devices and dangling links.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// A one-shot listing. Enumerating again means calling
/// [`FolderHandle::entries`] again; there are no change notifications.
pub type EntryStream<'a> = BoxStream<'a, Result<DirEntry>>;

/// A granted folder.
#[async_trait]
pub trait FolderHandle: Send + Sync + Sized {
    /// Human-readable location, for messages and logs.
    fn location(&self) -> String;

    async fn entries(&self) -> Result<EntryStream<'_>>;

    /// Reads an entry. `NotFound` if absent.
    async fn read(&self, name: &str) -> Result<String>;

    /// Creates or replaces an entry.
    async fn write(&self, name: &str, content: &str) -> Result<()>;

    /// Removes an entry. `NotFound` if absent.
    async fn remove(&self, name: &str) -> Result<()>;

    /// Last-modified time, when the host knows it.
    async fn modified(&self, name: &str) -> Result<Option<DateTime<Utc>>>;

    /// Opens a child folder, creating it first when `create` is set.
    async fn subdirectory(&self, name: &str, create: bool) -> Result<Self>;
}

/// The host's access grant. Declining must surface as `PermissionDenied`.
#[async_trait]
pub trait FolderPicker: Send + Sync {
    type Handle: FolderHandle;

    async fn pick(&self, selection: &Path) -> Result<Self::Handle>;
}
