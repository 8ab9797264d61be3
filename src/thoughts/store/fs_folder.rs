use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use uuid::Uuid;

use super::{DirEntry, EntryKind, EntryStream, FolderHandle, FolderPicker};
use crate::error::{Result, ThoughtsError};

/// Grants access to folders on the local filesystem.
///
/// A selection is accepted only if it exists, is a directory, can be listed
/// and is not read-only.
#[derive(Debug, Default, Clone)]
pub struct FsPicker;

impl FsPicker {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FolderPicker for FsPicker {
    type Handle = FsFolder;

    async fn pick(&self, selection: &Path) -> Result<FsFolder> {
        let shown = selection.display().to_string();
        let meta = fs::metadata(selection)
            .await
            .map_err(|e| ThoughtsError::from_io(e, &shown))?;

        if !meta.is_dir() {
            return Err(ThoughtsError::NotADirectory(selection.to_path_buf()));
        }
        if meta.permissions().readonly() {
            return Err(ThoughtsError::PermissionDenied(shown));
        }
        // Listing is the read half of the grant.
        let _listing = fs::read_dir(selection)
            .await
            .map_err(|e| ThoughtsError::from_io(e, &shown))?;

        let path = fs::canonicalize(selection)
            .await
            .map_err(|e| ThoughtsError::from_io(e, &shown))?;
        debug!(folder = %path.display(), "folder access granted");
        Ok(FsFolder::new(path))
    }
}

/// Symlinks are classified by their target. A dangling link is neither a
/// file nor a directory.
async fn classify(entry: &fs::DirEntry) -> std::io::Result<EntryKind> {
    let mut file_type = entry.file_type().await?;
    if file_type.is_symlink() {
        match fs::metadata(entry.path()).await {
            Ok(meta) => file_type = meta.file_type(),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(EntryKind::Other),
            Err(e) => return Err(e),
        }
    }
    Ok(if file_type.is_dir() {
        EntryKind::Directory
    } else if file_type.is_file() {
        EntryKind::File
    } else {
        EntryKind::Other
    })
}

#[derive(Debug, Clone)]
pub struct FsFolder {
    path: PathBuf,
}

impl FsFolder {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entry_path(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }
}

#[async_trait]
impl FolderHandle for FsFolder {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    async fn entries(&self) -> Result<EntryStream<'_>> {
        let read_dir = fs::read_dir(&self.path)
            .await
            .map_err(|e| ThoughtsError::from_io(e, &self.location()))?;

        let entries = stream::unfold(Some(read_dir), |state| async move {
            let mut read_dir = state?;
            match read_dir.next_entry().await {
                Ok(Some(entry)) => {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    let item = classify(&entry)
                        .await
                        .map(|kind| DirEntry { name, kind })
                        .map_err(ThoughtsError::Io);
                    Some((item, Some(read_dir)))
                }
                Ok(None) => None,
                // Stop after reporting the failure once.
                Err(e) => Some((Err(ThoughtsError::Io(e)), None)),
            }
        });

        Ok(entries.boxed())
    }

    async fn read(&self, name: &str) -> Result<String> {
        let bytes = fs::read(self.entry_path(name))
            .await
            .map_err(|e| ThoughtsError::from_io(e, name))?;
        // Invalid sequences become U+FFFD instead of failing the whole load.
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn write(&self, name: &str, content: &str) -> Result<()> {
        let target = self.entry_path(name);

        // Write next to the target, then rename over it.
        let tmp = self.entry_path(&format!(".thought-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp, content)
            .await
            .map_err(|e| ThoughtsError::from_io(e, name))?;
        if let Err(e) = fs::rename(&tmp, &target).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ThoughtsError::from_io(e, name));
        }
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<()> {
        fs::remove_file(self.entry_path(name))
            .await
            .map_err(|e| ThoughtsError::from_io(e, name))
    }

    async fn modified(&self, name: &str) -> Result<Option<DateTime<Utc>>> {
        let meta = fs::metadata(self.entry_path(name))
            .await
            .map_err(|e| ThoughtsError::from_io(e, name))?;
        Ok(meta.modified().ok().map(DateTime::<Utc>::from))
    }

    async fn subdirectory(&self, name: &str, create: bool) -> Result<Self> {
        let path = self.entry_path(name);
        if create {
            fs::create_dir_all(&path)
                .await
                .map_err(|e| ThoughtsError::from_io(e, name))?;
        } else {
            let meta = fs::metadata(&path)
                .await
                .map_err(|e| ThoughtsError::from_io(e, name))?;
            if !meta.is_dir() {
                return Err(ThoughtsError::NotADirectory(path));
            }
        }
        Ok(FsFolder::new(path))
    }
}
