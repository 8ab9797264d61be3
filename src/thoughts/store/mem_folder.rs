use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{DirEntry, EntryKind, EntryStream, FolderHandle, FolderPicker};
use crate::error::{Result, ThoughtsError};

#[derive(Clone)]
struct MemFile {
    text: String,
    mtime: DateTime<Utc>,
}

#[derive(Default)]
struct MemDir {
    files: BTreeMap<String, MemFile>,
    dirs: BTreeMap<String, MemFolder>,
    fail_writes: bool,
    fail_removes: bool,
}

/// In-memory folder for testing.
///
/// Clones share the same contents, so a test can keep a handle to a folder
/// it gave to a store and inspect it afterwards. `Mutex` rather than
/// `RefCell` because the capability traits require `Send + Sync`.
#[derive(Clone)]
pub struct MemFolder {
    name: String,
    inner: Arc<Mutex<MemDir>>,
}

impl Default for MemFolder {
    fn default() -> Self {
        Self::new("memory")
    }
}

impl MemFolder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            inner: Arc::new(Mutex::new(MemDir::default())),
        }
    }

    fn dir(&self) -> MutexGuard<'_, MemDir> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Test helper: put a file in place without going through `write`.
    pub fn insert(&self, name: &str, text: &str) {
        self.dir().files.insert(
            name.to_string(),
            MemFile {
                text: text.to_string(),
                mtime: Utc::now(),
            },
        );
    }

    /// Test helper: direct content lookup.
    pub fn get(&self, name: &str) -> Option<String> {
        self.dir().files.get(name).map(|f| f.text.clone())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.dir().files.contains_key(name)
    }

    pub fn file_names(&self) -> Vec<String> {
        self.dir().files.keys().cloned().collect()
    }

    /// Sum of file sizes in this folder, not counting sub-folders.
    pub fn total_bytes(&self) -> usize {
        self.dir().files.values().map(|f| f.text.len()).sum()
    }

    /// Test helper to set mtime directly. Returns true if the file existed.
    pub fn set_modified(&self, name: &str, mtime: DateTime<Utc>) -> bool {
        match self.dir().files.get_mut(name) {
            Some(file) => {
                file.mtime = mtime;
                true
            }
            None => false,
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_fail_writes(&self, fail: bool) {
        self.dir().fail_writes = fail;
    }

    /// Enable remove error simulation for testing partial moves.
    pub fn set_fail_removes(&self, fail: bool) {
        self.dir().fail_removes = fail;
    }

    /// Existing child folder, if any.
    pub fn child(&self, name: &str) -> Option<MemFolder> {
        self.dir().dirs.get(name).cloned()
    }

    fn child_or_create(&self, name: &str, create: bool) -> Result<MemFolder> {
        let mut dir = self.dir();
        if let Some(child) = dir.dirs.get(name) {
            return Ok(child.clone());
        }
        if !create {
            return Err(ThoughtsError::NotFound(name.to_string()));
        }
        let child = MemFolder::new(&format!("{}/{}", self.name, name));
        dir.dirs.insert(name.to_string(), child.clone());
        Ok(child)
    }

    fn snapshot(&self) -> Vec<DirEntry> {
        let dir = self.dir();
        let files = dir.files.keys().map(|name| DirEntry {
            name: name.clone(),
            kind: EntryKind::File,
        });
        let dirs = dir.dirs.keys().map(|name| DirEntry {
            name: name.clone(),
            kind: EntryKind::Directory,
        });
        files.chain(dirs).collect()
    }
}

#[async_trait]
impl FolderHandle for MemFolder {
    fn location(&self) -> String {
        format!("memory://{}", self.name)
    }

    async fn entries(&self) -> Result<EntryStream<'_>> {
        Ok(stream::iter(self.snapshot().into_iter().map(Ok)).boxed())
    }

    async fn read(&self, name: &str) -> Result<String> {
        self.get(name)
            .ok_or_else(|| ThoughtsError::NotFound(name.to_string()))
    }

    async fn write(&self, name: &str, content: &str) -> Result<()> {
        let mut dir = self.dir();
        if dir.fail_writes {
            return Err(ThoughtsError::Io(std::io::Error::other(
                "simulated write error",
            )));
        }
        dir.files.insert(
            name.to_string(),
            MemFile {
                text: content.to_string(),
                mtime: Utc::now(),
            },
        );
        Ok(())
    }

    async fn remove(&self, name: &str) -> Result<()> {
        let mut dir = self.dir();
        if dir.fail_removes {
            return Err(ThoughtsError::PermissionDenied(name.to_string()));
        }
        dir.files
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| ThoughtsError::NotFound(name.to_string()))
    }

    async fn modified(&self, name: &str) -> Result<Option<DateTime<Utc>>> {
        self.dir()
            .files
            .get(name)
            .map(|f| Some(f.mtime))
            .ok_or_else(|| ThoughtsError::NotFound(name.to_string()))
    }

    async fn subdirectory(&self, name: &str, create: bool) -> Result<Self> {
        self.child_or_create(name, create)
    }
}

/// Picker over a fixed in-memory root. `deny` simulates the user declining
/// the access prompt.
#[derive(Clone, Default)]
pub struct MemPicker {
    root: MemFolder,
    deny: bool,
}

impl MemPicker {
    pub fn new(root: MemFolder) -> Self {
        Self { root, deny: false }
    }

    pub fn denying() -> Self {
        Self {
            root: MemFolder::default(),
            deny: true,
        }
    }

    pub fn root(&self) -> &MemFolder {
        &self.root
    }
}

#[async_trait]
impl FolderPicker for MemPicker {
    type Handle = MemFolder;

    async fn pick(&self, selection: &Path) -> Result<MemFolder> {
        if self.deny {
            return Err(ThoughtsError::PermissionDenied(
                selection.display().to_string(),
            ));
        }
        Ok(self.root.clone())
    }
}
