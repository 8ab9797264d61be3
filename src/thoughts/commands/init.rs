use std::path::{Path, PathBuf};

use crate::commands::{CmdMessage, CmdResult};
use crate::config::ThoughtsConfig;
use crate::error::Result;
use crate::index::ThoughtIndex;
use crate::store::thought_store::ThoughtStore;
use crate::store::FolderPicker;

use super::load;

/// Acquires the notes folder, hydrates the index from it and records it as
/// the configured root. A denied grant leaves store, index and config as
/// they were.
pub async fn run<P: FolderPicker>(
    store: &mut ThoughtStore<P::Handle>,
    index: &mut ThoughtIndex,
    picker: &P,
    selection: &Path,
    config_dir: &Path,
) -> Result<CmdResult> {
    let mut result = load::open(store, index, picker, selection).await?;

    let mut config = ThoughtsConfig::load(config_dir)?;
    let location = store
        .directory()
        .location()
        .map(PathBuf::from)
        .unwrap_or_else(|| selection.to_path_buf());
    config.root = Some(location.clone());
    config.save(config_dir)?;

    result.add_message(CmdMessage::success(format!(
        "Notes folder set to {}",
        location.display()
    )));
    Ok(result.with_config(config))
}
