//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! operation, whatever the UI.
//!
//! It dispatches to `commands/*.rs`, turns raw user input into typed values
//! (selectors, sort keys) and fills in defaults from [`ThoughtsConfig`]. It
//! does no I/O of its own beyond what the commands do and never prints.
//!
//! `ThoughtsApi<P: FolderPicker>` is generic over how folders are granted:
//! `ThoughtsApi<FsPicker>` in the binary, `ThoughtsApi<MemPicker>` in tests.
//! Store-touching methods are `async`.

use std::path::{Path, PathBuf};

use crate::commands;
use crate::config::ThoughtsConfig;
use crate::error::{Result, ThoughtsError};
use crate::index::{parse_selectors, SortKey, SortOrder, ThoughtIndex, ThoughtQuery, ThoughtSelector};
use crate::store::directory::DirectoryStore;
use crate::store::thought_store::ThoughtStore;
use crate::store::FolderPicker;

pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, ThoughtUpdate};

pub struct ThoughtsApi<P: FolderPicker> {
    picker: P,
    store: ThoughtStore<P::Handle>,
    index: ThoughtIndex,
    config: ThoughtsConfig,
    config_dir: PathBuf,
}

impl<P: FolderPicker> ThoughtsApi<P> {
    /// Reads `config.json` from `config_dir` (defaults when absent).
    pub fn new(picker: P, config_dir: PathBuf) -> Result<Self> {
        let config = ThoughtsConfig::load(&config_dir)?;
        Ok(Self::with_config(picker, config, config_dir))
    }

    pub fn with_config(picker: P, config: ThoughtsConfig, config_dir: PathBuf) -> Self {
        let store = ThoughtStore::new(
            DirectoryStore::new()
                .with_file_ext(&config.file_ext)
                .with_trash_dir(&config.trash_dir),
        );
        Self {
            picker,
            store,
            index: ThoughtIndex::new(),
            config,
            config_dir,
        }
    }

    pub fn config(&self) -> &ThoughtsConfig {
        &self.config
    }

    pub fn index(&self) -> &ThoughtIndex {
        &self.index
    }

    pub fn store(&self) -> &ThoughtStore<P::Handle> {
        &self.store
    }

    /// Grants `folder`, hydrates from it and saves it as the root.
    pub async fn init(&mut self, folder: &Path) -> Result<CmdResult> {
        let result = commands::init::run(
            &mut self.store,
            &mut self.index,
            &self.picker,
            folder,
            &self.config_dir,
        )
        .await?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    /// Hydrates from `root`, or from the configured root.
    pub async fn open(&mut self, root: Option<&Path>) -> Result<CmdResult> {
        let root = match root {
            Some(path) => path.to_path_buf(),
            None => self.config.root.clone().ok_or(ThoughtsError::DirectoryNotSet)?,
        };
        commands::load::open(&mut self.store, &mut self.index, &self.picker, &root).await
    }

    pub async fn reload(&mut self) -> Result<CmdResult> {
        commands::load::run(&self.store, &mut self.index).await
    }

    pub async fn create_thought(
        &mut self,
        title: String,
        body: String,
        tags: Vec<String>,
    ) -> Result<CmdResult> {
        commands::create::run(&self.store, &mut self.index, title, body, tags).await
    }

    pub async fn update_thoughts<I: AsRef<str>>(
        &mut self,
        selectors: &[I],
        update: &ThoughtUpdate,
    ) -> Result<CmdResult> {
        let selectors = selectors_from(selectors)?;
        commands::update::run(
            &self.store,
            &mut self.index,
            &selectors,
            update,
            self.config.rename_files,
        )
        .await
    }

    pub async fn delete_thoughts<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = selectors_from(selectors)?;
        commands::delete::run(&self.store, &mut self.index, &selectors).await
    }

    /// Sort settings fall back to the configured ones.
    pub fn list_thoughts(
        &self,
        search: Option<String>,
        tag: Option<String>,
        sort_by: Option<SortKey>,
        order: Option<SortOrder>,
    ) -> Result<CmdResult> {
        let query = ThoughtQuery {
            search,
            tag,
            sort_by: sort_by.unwrap_or(self.config.sort_by),
            order: order.unwrap_or(self.config.sort_order),
        };
        commands::list::run(&self.index, &query)
    }

    pub fn view_thoughts<I: AsRef<str>>(&self, selectors: &[I]) -> Result<CmdResult> {
        let selectors = selectors_from(selectors)?;
        commands::view::run(&self.index, &selectors)
    }

    pub fn tags(&self) -> Result<CmdResult> {
        commands::tags::run(&self.index)
    }

    /// Custom ordering for `SortKey::Custom`. Lives in memory only and is
    /// reset by every load, so until this is called `Custom` means load order.
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<()> {
        if self.index.reorder(from, to) {
            Ok(())
        } else {
            Err(ThoughtsError::Api(format!(
                "Cannot move {} to {}: out of range",
                from, to
            )))
        }
    }

    /// Settings changes take effect for this instance except `file-ext` and
    /// `trash-dir`, which apply from the next start.
    pub fn config_action(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.config_dir, action)?;
        if let Some(config) = &result.config {
            self.config.rename_files = config.rename_files;
            self.config.sort_by = config.sort_by;
            self.config.sort_order = config.sort_order;
            self.config.root = config.root.clone();
        }
        Ok(result)
    }
}

fn selectors_from<I: AsRef<str>>(inputs: &[I]) -> Result<Vec<ThoughtSelector>> {
    if inputs.is_empty() {
        return Err(ThoughtsError::Api("No thoughts selected".to_string()));
    }
    Ok(parse_selectors(inputs))
}
