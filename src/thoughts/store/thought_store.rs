//! # Reconciliation Layer
//!
//! Maps thoughts onto files in the [`DirectoryStore`] and back.
//!
//! - **Hydration** ([`ThoughtStore::load_all`]): enumerate, decode, assign
//!   fresh ids and file timestamps. The result replaces whatever the caller
//!   held before; there is no merging.
//! - **Save**: write the document under the name derived from the current
//!   title. A previous file under an older title is left alone and becomes an
//!   orphan that the next hydration will load as a separate thought.
//! - **Rename**: the opt-in alternative for title edits. Saves under the new
//!   name, then soft-deletes the old file.
//! - **Soft delete**: move the file to the trash folder.
//!
//! Concurrent calls that target the same file name race; the last write wins.

use chrono::Utc;
use futures::TryStreamExt;
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{info, warn};

use super::directory::{DirectoryStore, StoredEntry};
use super::{FolderHandle, FolderPicker};
use crate::codec;
use crate::error::Result;
use crate::model::Thought;
use crate::naming::file_name_for;

pub struct ThoughtStore<H: FolderHandle> {
    dir: DirectoryStore<H>,
}

impl<H: FolderHandle> ThoughtStore<H> {
    pub fn new(dir: DirectoryStore<H>) -> Self {
        Self { dir }
    }

    pub fn directory(&self) -> &DirectoryStore<H> {
        &self.dir
    }

    pub fn is_ready(&self) -> bool {
        self.dir.is_ready()
    }

    pub async fn acquire<P>(&mut self, picker: &P, selection: &Path) -> Result<()>
    where
        P: FolderPicker<Handle = H>,
    {
        self.dir.acquire(picker, selection).await
    }

    pub fn file_name_for(&self, thought: &Thought) -> String {
        file_name_for(&thought.title, self.dir.file_ext())
    }

    /// Reads every note file into a fresh set of thoughts.
    pub async fn load_all(&self) -> Result<Vec<Thought>> {
        let thoughts: Vec<Thought> = self
            .dir
            .list()
            .await?
            .map_ok(|entry| self.decode(entry))
            .try_collect()
            .await?;

        info!(count = thoughts.len(), "loaded thoughts");
        Ok(thoughts)
    }

    fn decode(&self, entry: StoredEntry) -> Thought {
        let parsed = codec::deserialize(&entry.content, entry.stem(self.dir.file_ext()));
        let mut thought = parsed.into_thought();
        let stamp = entry.modified.unwrap_or_else(Utc::now);
        thought.created_at = stamp;
        thought.updated_at = stamp;
        thought
    }

    /// Writes the thought under the name derived from its current title and
    /// returns that name.
    pub async fn save(&self, thought: &Thought) -> Result<String> {
        let name = self.file_name_for(thought);
        self.dir.write(&name, &codec::serialize(thought)).await?;
        Ok(name)
    }

    /// Moves the thought's file to the trash and returns its name. Fails
    /// with `NotFound` when no file matches the current title.
    pub async fn soft_delete(&self, thought: &Thought) -> Result<String> {
        let name = self.file_name_for(thought);
        self.dir.move_to_trash(&name).await?;
        info!(file = %name, "thought moved to trash");
        Ok(name)
    }

    /// Saves after a title change and retires the file of the previous
    /// title. Returns the new name and, when it differed, the retired one.
    ///
    /// The new file is written first, so a failure while retiring the old
    /// one leaves two copies rather than none.
    pub async fn rename(
        &self,
        thought: &Thought,
        previous_title: &str,
    ) -> Result<(String, Option<String>)> {
        let new_name = self.save(thought).await?;
        let old_name = file_name_for(previous_title, self.dir.file_ext());
        if old_name == new_name {
            return Ok((new_name, None));
        }

        if let Err(err) = self.dir.move_to_trash(&old_name).await {
            warn!(old = %old_name, new = %new_name, error = %err, "could not retire renamed file");
            return Err(err);
        }
        Ok((new_name, Some(old_name)))
    }
}

/// Sorted union of every tag on the given thoughts.
pub fn collect_tags<'a, I>(thoughts: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Thought>,
{
    thoughts
        .into_iter()
        .flat_map(|t| t.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ThoughtsError;
    use crate::store::mem_folder::{MemFolder, MemPicker};
    use chrono::{Duration, TimeZone};

    async fn make_store() -> (ThoughtStore<MemFolder>, MemFolder) {
        let root = MemFolder::new("root");
        let mut store = ThoughtStore::new(DirectoryStore::new());
        store
            .acquire(&MemPicker::new(root.clone()), Path::new("/notes"))
            .await
            .unwrap();
        (store, root)
    }

    fn thought(title: &str, body: &str, tags: &[&str]) -> Thought {
        Thought::new(
            title.into(),
            body.into(),
            tags.iter().map(|t| t.to_string()).collect(),
        )
    }

    #[tokio::test]
    async fn load_requires_acquired_folder() {
        let store: ThoughtStore<MemFolder> = ThoughtStore::new(DirectoryStore::new());
        assert!(matches!(
            store.load_all().await,
            Err(ThoughtsError::DirectoryNotSet)
        ));
    }

    #[tokio::test]
    async fn empty_folder_loads_nothing() {
        let (store, _root) = make_store().await;
        assert!(store.load_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn load_counts_only_matching_files() {
        let (store, root) = make_store().await;
        root.insert("one.md", "# One");
        root.insert("two.md", "# Two");
        root.insert("three.md", "# Three");
        root.insert("readme.txt", "# Not a note");
        root.insert(".DS_Store", "");

        assert_eq!(store.load_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn load_ignores_trash() {
        let (store, root) = make_store().await;
        root.insert("live.md", "# Live");
        root.child("deleted").unwrap().insert("gone.md", "# Gone");

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, "Live");
    }

    #[tokio::test]
    async fn load_uses_file_timestamps() {
        let (store, root) = make_store().await;
        root.insert("a.md", "# A");
        let stamp = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        root.set_modified("a.md", stamp);

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded[0].created_at, stamp);
        assert_eq!(loaded[0].updated_at, stamp);
    }

    #[tokio::test]
    async fn load_falls_back_to_file_stem_for_title() {
        let (store, root) = make_store().await;
        root.insert("loose_note.md", "no heading here\nsecond line #tagged");

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded[0].title, "loose_note");
        assert_eq!(loaded[0].body, "second line #tagged");
        assert_eq!(loaded[0].tags, vec!["tagged"]);
    }

    #[tokio::test]
    async fn reload_issues_fresh_ids() {
        let (store, root) = make_store().await;
        root.insert("a.md", "# A");
        let first = store.load_all().await.unwrap();
        let second = store.load_all().await.unwrap();
        assert_ne!(first[0].id, second[0].id);
    }

    #[tokio::test]
    async fn save_then_load_roundtrips() {
        let (store, _root) = make_store().await;
        let original = thought("Trip Ideas", "Lisbon\nPorto", &["travel", "2025"]);
        let name = store.save(&original).await.unwrap();
        assert_eq!(name, "trip_ideas.md");

        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].title, original.title);
        assert_eq!(loaded[0].body, original.body);
        assert!(loaded[0].same_tags(&original.tags));
    }

    #[tokio::test]
    async fn save_overwrites_same_name() {
        let (store, root) = make_store().await;
        let mut t = thought("Draft", "v1", &[]);
        store.save(&t).await.unwrap();
        t.body = "v2".into();
        store.save(&t).await.unwrap();

        assert_eq!(root.file_names(), vec!["draft.md"]);
        assert!(root.get("draft.md").unwrap().contains("v2"));
    }

    #[tokio::test]
    async fn save_after_title_change_orphans_old_file() {
        let (store, root) = make_store().await;
        let mut t = thought("Old Name", "body", &[]);
        store.save(&t).await.unwrap();
        t.title = "New Name".into();
        store.save(&t).await.unwrap();

        assert!(root.contains("old_name.md"));
        assert!(root.contains("new_name.md"));
        assert_eq!(store.load_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn colliding_titles_last_writer_wins() {
        let (store, root) = make_store().await;
        store.save(&thought("My Note!", "first", &[])).await.unwrap();
        store.save(&thought("my note?", "second", &[])).await.unwrap();

        assert_eq!(root.file_names(), vec!["my_note_.md"]);
        let loaded = store.load_all().await.unwrap();
        assert_eq!(loaded[0].body, "second");
    }

    #[tokio::test]
    async fn soft_delete_moves_identical_content() {
        let (store, root) = make_store().await;
        let t = thought("Bye", "so long", &["x"]);
        store.save(&t).await.unwrap();
        let before = root.get("bye.md").unwrap();

        let name = store.soft_delete(&t).await.unwrap();

        assert_eq!(name, "bye.md");
        assert!(!root.contains("bye.md"));
        assert_eq!(root.child("deleted").unwrap().get("bye.md"), Some(before));
    }

    #[tokio::test]
    async fn soft_delete_never_shrinks_total_bytes() {
        let (store, root) = make_store().await;
        let a = thought("A", "alpha body", &[]);
        let b = thought("B", "beta body", &["t"]);
        store.save(&a).await.unwrap();
        store.save(&b).await.unwrap();
        let trash = root.child("deleted").unwrap();

        let total = |r: &MemFolder, t: &MemFolder| r.total_bytes() + t.total_bytes();
        let mut last = total(&root, &trash);
        for t in [&a, &b] {
            store.soft_delete(t).await.unwrap();
            let now = total(&root, &trash);
            assert!(now >= last);
            last = now;
        }
    }

    #[tokio::test]
    async fn soft_delete_after_unsaved_rename_is_not_found() {
        let (store, _root) = make_store().await;
        let mut t = thought("Saved Title", "", &[]);
        store.save(&t).await.unwrap();
        t.title = "Edited Title".into();

        assert!(matches!(
            store.soft_delete(&t).await,
            Err(ThoughtsError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn soft_delete_requires_initialized_store() {
        let store: ThoughtStore<MemFolder> = ThoughtStore::new(DirectoryStore::new());
        let t = thought("A", "", &[]);
        assert!(matches!(
            store.soft_delete(&t).await,
            Err(ThoughtsError::StoreNotInitialized)
        ));
    }

    #[tokio::test]
    async fn second_soft_delete_replaces_trash_copy() {
        let (store, root) = make_store().await;
        let t = thought("Twice", "first", &[]);
        store.save(&t).await.unwrap();
        store.soft_delete(&t).await.unwrap();

        let again = thought("Twice", "second", &[]);
        store.save(&again).await.unwrap();
        store.soft_delete(&again).await.unwrap();

        let trash = root.child("deleted").unwrap();
        assert!(trash.get("twice.md").unwrap().contains("second"));
    }

    #[tokio::test]
    async fn rename_retires_old_file() {
        let (store, root) = make_store().await;
        let mut t = thought("Before", "body", &[]);
        store.save(&t).await.unwrap();
        t.title = "After".into();

        let (new_name, old_name) = store.rename(&t, "Before").await.unwrap();

        assert_eq!(new_name, "after.md");
        assert_eq!(old_name.as_deref(), Some("before.md"));
        assert_eq!(root.file_names(), vec!["after.md"]);
        assert!(root.child("deleted").unwrap().contains("before.md"));
    }

    #[tokio::test]
    async fn rename_with_same_slug_is_plain_save() {
        let (store, root) = make_store().await;
        let mut t = thought("Case", "body", &[]);
        store.save(&t).await.unwrap();
        t.title = "CASE".into();

        let (_, old_name) = store.rename(&t, "Case").await.unwrap();
        assert!(old_name.is_none());
        assert_eq!(root.file_names(), vec!["case.md"]);
    }

    #[test]
    fn collect_tags_sorted_unique() {
        let a = thought("A", "#zeta", &["beta"]);
        let b = thought("B", "", &["alpha", "beta"]);
        assert_eq!(collect_tags([&a, &b]), vec!["alpha", "beta", "zeta"]);
    }

    #[tokio::test]
    async fn timestamps_never_regress() {
        let (store, root) = make_store().await;
        root.insert("a.md", "# A");
        root.set_modified("a.md", Utc::now() - Duration::days(3));
        let loaded = store.load_all().await.unwrap();
        assert!(loaded[0].updated_at >= loaded[0].created_at);
    }
}
