//! # Directory Store
//!
//! Holds the granted root folder and its trash sub-folder, and performs the
//! per-entry operations the reconciliation layer needs.
//!
//! The store starts [`StoreState::Uninitialized`]. [`DirectoryStore::acquire`]
//! is the only way to reach [`StoreState::Ready`]; nothing here prompts for
//! access on its own. Acquiring again replaces both handles.
//!
//! ## Soft-delete Move
//!
//! [`DirectoryStore::move_to_trash`] reads, writes the copy into the trash,
//! then removes the original. It is not atomic. A failure after the copy
//! leaves the file in both places and reports `PartialMoveFailure`: content
//! may be duplicated but is never lost.

use chrono::{DateTime, Utc};
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use std::path::Path;
use tracing::{debug, info, warn};

use super::{FolderHandle, FolderPicker};
use crate::error::{Result, ThoughtsError};
use crate::naming::normalize_ext;

pub const DEFAULT_FILE_EXT: &str = ".md";
pub const DEFAULT_TRASH_DIR: &str = "deleted";

pub enum StoreState<H> {
    Uninitialized,
    Ready { root: H, trash: H },
}

/// A file read during enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    pub name: String,
    pub content: String,
    pub modified: Option<DateTime<Utc>>,
}

impl StoredEntry {
    /// The name without the store extension.
    pub fn stem<'a>(&'a self, file_ext: &str) -> &'a str {
        self.name.strip_suffix(file_ext).unwrap_or(&self.name)
    }
}

pub struct DirectoryStore<H: FolderHandle> {
    state: StoreState<H>,
    file_ext: String,
    trash_dir: String,
}

impl<H: FolderHandle> Default for DirectoryStore<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H: FolderHandle> DirectoryStore<H> {
    pub fn new() -> Self {
        Self {
            state: StoreState::Uninitialized,
            file_ext: DEFAULT_FILE_EXT.to_string(),
            trash_dir: DEFAULT_TRASH_DIR.to_string(),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        self.file_ext = normalize_ext(ext);
        self
    }

    pub fn with_trash_dir(mut self, name: &str) -> Self {
        self.trash_dir = name.to_string();
        self
    }

    pub fn file_ext(&self) -> &str {
        &self.file_ext
    }

    pub fn trash_dir(&self) -> &str {
        &self.trash_dir
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, StoreState::Ready { .. })
    }

    /// Root location, if acquired.
    pub fn location(&self) -> Option<String> {
        match &self.state {
            StoreState::Ready { root, .. } => Some(root.location()),
            StoreState::Uninitialized => None,
        }
    }

    /// Obtains the root through the picker and gets-or-creates the trash
    /// folder under it. `PermissionDenied` from the picker is passed through
    /// untouched and leaves the previous state in place.
    pub async fn acquire<P>(&mut self, picker: &P, selection: &Path) -> Result<()>
    where
        P: FolderPicker<Handle = H>,
    {
        let root = picker.pick(selection).await?;
        let trash = root.subdirectory(&self.trash_dir, true).await?;
        info!(root = %root.location(), trash = %trash.location(), "notes folder acquired");
        self.state = StoreState::Ready { root, trash };
        Ok(())
    }

    fn root(&self) -> Result<&H> {
        match &self.state {
            StoreState::Ready { root, .. } => Ok(root),
            StoreState::Uninitialized => Err(ThoughtsError::DirectoryNotSet),
        }
    }

    fn folders(&self) -> Result<(&H, &H)> {
        match &self.state {
            StoreState::Ready { root, trash } => Ok((root, trash)),
            StoreState::Uninitialized => Err(ThoughtsError::StoreNotInitialized),
        }
    }

    /// Lazily reads every root file ending with the store extension.
    /// One-shot: call again for a fresh view.
    pub async fn list(&self) -> Result<BoxStream<'_, Result<StoredEntry>>> {
        let root = self.root()?;
        let ext = self.file_ext.clone();
        let entries = root.entries().await?;

        let files = entries
            .try_filter(move |entry| {
                let keep = entry.is_file() && entry.name.ends_with(&ext);
                async move { keep }
            })
            .and_then(move |entry| async move {
                let content = root.read(&entry.name).await?;
                let modified = root.modified(&entry.name).await?;
                debug!(file = %entry.name, bytes = content.len(), "read note file");
                Ok(StoredEntry {
                    name: entry.name,
                    content,
                    modified,
                })
            });

        Ok(files.boxed())
    }

    pub async fn read(&self, name: &str) -> Result<String> {
        self.root()?.read(name).await
    }

    /// Create-or-truncate. No diffing against what is there.
    pub async fn write(&self, name: &str, content: &str) -> Result<()> {
        self.root()?.write(name, content).await?;
        debug!(file = %name, bytes = content.len(), "wrote note file");
        Ok(())
    }

    pub async fn remove(&self, name: &str) -> Result<()> {
        self.root()?.remove(name).await?;
        debug!(file = %name, "removed note file");
        Ok(())
    }

    /// Moves a root entry into the trash under the same name.
    pub async fn move_to_trash(&self, name: &str) -> Result<()> {
        let (root, trash) = self.folders()?;

        let content = root.read(name).await?;
        trash.write(name, &content).await?;

        if let Err(source) = root.remove(name).await {
            warn!(file = %name, error = %source, "copied to trash but original remains");
            return Err(ThoughtsError::PartialMoveFailure {
                name: name.to_string(),
                source: Box::new(source),
            });
        }

        debug!(file = %name, trash = %self.trash_dir, "moved note file to trash");
        Ok(())
    }
}
